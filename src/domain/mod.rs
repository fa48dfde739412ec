//! Domain aggregates exposed by the scheduling service layer.

pub mod appointment;
pub mod client;
pub mod types;
