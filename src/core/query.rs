//! Query parameters, result pages and pagination utilities

use crate::core::error::ValidationError;
use crate::query::filter::FilterDescriptor;
use crate::query::page::Direction;
use serde::{Deserialize, Serialize};

/// Query parameters for pagination, sorting and filtering
///
/// This structure is used to extract listing parameters from URL query
/// strings. Pages are zero-based.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_items(
///     Query(params): Query<QueryParams>,
/// ) -> Result<Json<PaginatedResponse<Item>>, QueryError> {
///     // params.page defaults to 0
///     // params.size falls back to the configured default
/// }
///
/// // Usage:
/// GET /people?page=2&size=10
/// GET /people?sort=surname,name&direction=DESC
/// GET /people?filter=[{"field":"birthday","value":"2010-11-23","operator":"NE"}]
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page index (starts at 0)
    pub page: i64,

    /// Number of items per page
    pub size: Option<i64>,

    /// Direction shared by every sort field
    pub direction: Option<Direction>,

    /// Sort fields, comma separated
    ///
    /// # Example
    /// ```text
    /// sort=surname,name
    /// ```
    pub sort: Option<String>,

    /// Filters as a JSON array of filter descriptors
    ///
    /// # Example
    /// ```text
    /// filter=[{"field": "name", "value": "Jo", "operator": "STARTS_WITH"}]
    /// ```
    pub filter: Option<String>,
}

impl QueryParams {
    /// Page size, or `default` when the request names none
    pub fn size_or(&self, default: i64) -> i64 {
        self.size.unwrap_or(default)
    }

    /// Sort field list; `None` when absent or blank
    pub fn sort_fields(&self) -> Option<Vec<String>> {
        let fields: Vec<String> = self
            .sort
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();
        if fields.is_empty() { None } else { Some(fields) }
    }

    /// Parse the filter JSON
    pub fn filters(&self) -> Result<Option<Vec<FilterDescriptor>>, ValidationError> {
        match self.filter.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => serde_json::from_str(raw).map(Some).map_err(|e| {
                ValidationError::InvalidJson {
                    message: e.to_string(),
                }
            }),
        }
    }
}

/// One page of entities as returned by a repository
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The entities of this page, in order
    pub content: Vec<T>,

    /// Number of matching entities over all pages
    pub total: u64,

    /// Zero-based page index
    pub page_index: u64,

    pub page_size: u64,
}

impl<T> Page<T> {
    /// Map the page content, keeping the pagination state
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total: self.total,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            pagination: PaginationMeta::new(page.page_index, page.page_size, page.total),
            data: page.content,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page index (starts at 0)
    pub page: u64,

    /// Number of items per page
    pub size: u64,

    /// Total number of items (after filters)
    pub total: u64,

    /// Total number of pages
    pub total_pages: u64,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: u64, size: u64, total: u64) -> Self {
        // Ensure size is at least 1 to avoid division by zero
        let size = size.max(1);
        let total_pages = total.div_ceil(size);
        let end = page.saturating_add(1).saturating_mul(size);

        Self {
            page,
            size,
            total,
            total_pages,
            has_next: end < total,
            has_prev: page > 0,
        }
    }
}
