//! Collection request parameters and pagination metadata

use crate::config::PagingConfig;
use serde::{Deserialize, Serialize};

/// Query parameters of a collection request
///
/// Extracted from the URL query string. Everything is optional; the page
/// size default and maximum come from [`PagingConfig`].
///
/// # Example
/// ```rust,ignore
/// pub async fn get_authors(
///     State(state): State<AppState>,
///     Query(params): Query<ResourceParameters>,
/// ) -> Result<Response, ShapingError> {
///     let page_size = params.page_size(&state.paging);
///     // ...
/// }
///
/// // Usage:
/// GET /api/authors?pageNumber=2&pageSize=5
/// GET /api/authors?orderBy=name desc,age&fields=id,name
/// GET /api/authors?genre=Fantasy&searchQuery=king
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceParameters {
    /// Page number (starts at 1)
    pub page_number: Option<usize>,

    /// Requested number of items per page
    pub page_size: Option<usize>,

    /// Sort clause, e.g. `name desc, age`
    pub order_by: Option<String>,

    /// Field selection, e.g. `id,name`
    pub fields: Option<String>,

    /// Exact genre filter (case-insensitive)
    pub genre: Option<String>,

    /// Free-text filter over genre and names (case-insensitive)
    pub search_query: Option<String>,
}

impl ResourceParameters {
    /// Get page number, ensuring minimum of 1
    pub fn page_number(&self) -> usize {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Get page size, clamped to `1..=max_page_size`
    ///
    /// Oversized requests are clamped, never rejected.
    pub fn page_size(&self, paging: &PagingConfig) -> usize {
        self.page_size
            .unwrap_or(paging.default_page_size)
            .clamp(1, paging.max_page_size.max(1))
    }

    pub fn order_by(&self) -> Option<&str> {
        non_blank(self.order_by.as_deref())
    }

    pub fn fields(&self) -> Option<&str> {
        non_blank(self.fields.as_deref())
    }

    pub fn genre(&self) -> Option<&str> {
        non_blank(self.genre.as_deref())
    }

    pub fn search_query(&self) -> Option<&str> {
        non_blank(self.search_query.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Pagination metadata, serialized into the `X-Pagination` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Total number of items (after filters)
    pub total_count: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Link to the previous page, if any
    pub previous_page_link: Option<String>,

    /// Link to the next page, if any
    pub next_page_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paging() -> PagingConfig {
        PagingConfig {
            default_page_size: 10,
            max_page_size: 20,
        }
    }

    #[test]
    fn test_resource_parameters_defaults() {
        let params = ResourceParameters::default();
        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(&paging()), 10);
        assert_eq!(params.order_by(), None);
        assert_eq!(params.fields(), None);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let params = ResourceParameters {
            page_size: Some(500),
            ..Default::default()
        };
        assert_eq!(params.page_size(&paging()), 20);

        let params = ResourceParameters {
            page_size: Some(0),
            page_number: Some(0),
            ..Default::default()
        };
        assert_eq!(params.page_size(&paging()), 1);
        assert_eq!(params.page_number(), 1);
    }

    #[test]
    fn test_blank_clauses_are_absent() {
        let params = ResourceParameters {
            order_by: Some("  ".to_string()),
            fields: Some(" id ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.order_by(), None);
        assert_eq!(params.fields(), Some("id"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let params: ResourceParameters = serde_json::from_value(serde_json::json!({
            "pageNumber": 2,
            "pageSize": 5,
            "orderBy": "name desc",
            "searchQuery": "king"
        }))
        .unwrap();
        assert_eq!(params.page_number(), 2);
        assert_eq!(params.page_size(&paging()), 5);
        assert_eq!(params.order_by(), Some("name desc"));
        assert_eq!(params.search_query(), Some("king"));
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let meta = PaginationMetadata {
            total_count: 3,
            page_size: 2,
            current_page: 1,
            total_pages: 2,
            previous_page_link: None,
            next_page_link: Some("/api/authors?pageNumber=2".to_string()),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["totalPages"], 2);
        assert!(json["previousPageLink"].is_null());
        assert_eq!(json["nextPageLink"], "/api/authors?pageNumber=2");
    }
}
