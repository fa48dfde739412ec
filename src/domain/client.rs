use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientEmail, ClientId, ClientName, TypeConstraintError, normalize_optional_text,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    /// Unset until the first mutation after creation.
    pub updated_at: Option<NaiveDateTime>,
}

impl Client {
    /// Builds a client from raw storage values, validating every field.
    pub fn try_new(
        id: i32,
        name: String,
        email: String,
        phone: Option<String>,
        created_at: NaiveDateTime,
        updated_at: Option<NaiveDateTime>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: ClientId::new(id)?,
            name: ClientName::new(name)?,
            email: ClientEmail::new(email)?,
            phone: normalize_optional_text(phone),
            created_at,
            updated_at,
        })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewClient {
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: ClientName, email: ClientEmail, phone: Option<String>) -> Self {
        Self {
            name,
            email,
            phone: normalize_optional_text(phone),
        }
    }

    pub fn try_new(
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(
            ClientName::new(name)?,
            ClientEmail::new(email)?,
            phone,
        ))
    }
}

/// Full replacement of the mutable client fields.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateClient {
    pub name: ClientName,
    pub email: ClientEmail,
    pub phone: Option<String>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(name: ClientName, email: ClientEmail, phone: Option<String>) -> Self {
        Self {
            name,
            email,
            phone: normalize_optional_text(phone),
        }
    }

    pub fn try_new(
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(
            ClientName::new(name)?,
            ClientEmail::new(email)?,
            phone,
        ))
    }
}
