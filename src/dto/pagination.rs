//! Query parameters shared by the paginated endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Pagination};

/// `page` and `page_size` as sent by the caller; both optional.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct PageQuery {
    /// 1-based page number; out-of-range values are clamped.
    pub page: Option<i64>,
    /// Items per page.
    #[validate(range(min = 1))]
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}
