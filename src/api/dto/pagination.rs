//! Pagination query parameters and the pagination object returned in list metadata.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::error::AppError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters (`page`, `pageSize`).
///
/// Uses `serde_with` to parse numbers from query strings, which also keeps
/// parsing working under `#[serde(flatten)]`.
#[serde_as]
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self { page, page_size }
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Rejects a zero page, and a page size outside `1..=100`.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page() == 0 {
            return Err(AppError::validation(
                "Page must be greater than 0",
                json!({ "page": self.page() }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size()) {
            return Err(AppError::validation(
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
                json!({ "pageSize": self.page_size() }),
            ));
        }

        Ok(())
    }

    /// Row offset of the first item on the requested page: `(page - 1) * pageSize`.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page()) - 1).max(0) * i64::from(self.page_size())
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size())
    }

    /// Builds the pagination object for a result set of `count` items.
    pub fn paginate(&self, count: i64) -> Pagination {
        let page_size = i64::from(self.page_size().max(1));
        let count = count.max(0);

        Pagination {
            page: self.page(),
            page_count: (count + page_size - 1) / page_size,
            page_size: self.page_size(),
            count,
        }
    }
}

/// Pagination metadata: `{page, pageCount, pageSize, count}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_count: i64,
    pub page_size: u32,
    pub count: i64,
}

/// Serde adapter for optional RFC 3339 datetimes in query strings.
pub mod optional_rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}
