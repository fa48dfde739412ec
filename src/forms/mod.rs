//! Request payloads accepted by the JSON endpoints.

use thiserror::Error;

pub mod appointment;
pub mod client;

#[derive(Debug, Error)]
/// Errors that can occur when turning a payload into a domain value.
pub enum FormError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid name")]
    InvalidName,
}
