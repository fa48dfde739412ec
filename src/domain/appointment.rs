use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::types::{
    AppointmentId, ClientId, TypeConstraintError, normalize_optional_text,
};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown appointment status `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub time: Option<NaiveDateTime>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// Builds an appointment from raw storage values.
    pub fn try_new(
        id: i32,
        client_id: i32,
        time: Option<NaiveDateTime>,
        status: Option<String>,
        notes: Option<String>,
        created_at: NaiveDateTime,
        updated_at: Option<NaiveDateTime>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: AppointmentId::new(id)?,
            client_id: ClientId::new(client_id)?,
            time,
            status: status.as_deref().map(str::parse).transpose()?,
            notes,
            created_at,
            updated_at,
        })
    }
}

/// Appointment serialized together with the client it belongs to.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AppointmentWithClient {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub client: Client,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub client_id: ClientId,
    pub time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl NewAppointment {
    /// Status falls back to [`AppointmentStatus::Scheduled`] when not supplied.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        time: NaiveDateTime,
        status: Option<AppointmentStatus>,
        notes: Option<String>,
    ) -> Self {
        Self {
            client_id,
            time,
            status: status.unwrap_or_default(),
            notes: normalize_optional_text(notes),
        }
    }
}

/// Full overwrite of the base appointment fields; `None` clears the column.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UpdateAppointment {
    pub time: Option<NaiveDateTime>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

impl UpdateAppointment {
    #[must_use]
    pub fn new(
        time: Option<NaiveDateTime>,
        status: Option<AppointmentStatus>,
        notes: Option<String>,
    ) -> Self {
        Self {
            time,
            status,
            notes: normalize_optional_text(notes),
        }
    }
}
