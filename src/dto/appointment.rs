//! DTOs used by the appointment endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::AppointmentStatus;
use crate::dto::pagination::PageQuery;

/// Query parameters accepted by `GET /appointments`.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct AppointmentsQuery {
    pub page: Option<i64>,
    #[validate(range(min = 1))]
    pub page_size: Option<i64>,
    /// Matched against the owning client's name.
    pub search: Option<String>,
    /// Inclusive, from the start of the day.
    pub start_date: Option<NaiveDate>,
    /// Inclusive, up to the end of the day.
    pub end_date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentsQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}
