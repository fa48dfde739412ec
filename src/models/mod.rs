//! Database models shared across the scheduling repository.

pub mod appointment;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
