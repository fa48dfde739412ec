use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{ClientEmail, ClientName};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
/// Body of client create and update requests.
pub struct ClientForm {
    /// Display name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Contact email, unique across clients.
    #[validate(email)]
    pub email: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

impl ClientForm {
    fn parts(self) -> Result<(ClientName, ClientEmail, Option<String>), FormError> {
        let name = ClientName::new(self.name).map_err(|_| FormError::InvalidName)?;
        let email = ClientEmail::new(self.email).map_err(|_| FormError::InvalidEmail)?;
        Ok((name, email, self.phone))
    }
}

impl TryFrom<ClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        let (name, email, phone) = form.parts()?;
        Ok(NewClient::new(name, email, phone))
    }
}

impl TryFrom<ClientForm> for UpdateClient {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        let (name, email, phone) = form.parts()?;
        Ok(UpdateClient::new(name, email, phone))
    }
}
