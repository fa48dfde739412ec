//! DTO modules that bridge services with the JSON API.

use serde::Serialize;

pub mod appointment;
pub mod client;
pub mod pagination;

/// Body returned by the delete endpoints.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl DeleteConfirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
