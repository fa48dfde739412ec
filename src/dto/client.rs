//! DTOs used by the client endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::dto::pagination::PageQuery;

/// Query parameters accepted by `GET /clients`.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct ClientsQuery {
    pub page: Option<i64>,
    #[validate(range(min = 1))]
    pub page_size: Option<i64>,
    /// Free-form term matched against name, email and phone.
    pub search: Option<String>,
}

impl ClientsQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}
