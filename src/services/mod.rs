//! Business rules between the HTTP handlers and the repositories.

pub mod appointments;
pub mod clients;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};
