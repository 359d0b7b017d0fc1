//! Navigation links for paged collection responses

use crate::core::paged::PagedList;
use crate::core::query::{PaginationMetadata, ResourceParameters};
use serde::Serialize;

/// Which page a link points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceUriType {
    PreviousPage,
    NextPage,
    Current,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<&'a str>,
    page_number: usize,
    page_size: usize,
}

/// Build a link to `base_path` carrying the original request parameters
///
/// `page_size` is the effective (clamped) size so that followed links stay
/// consistent with the page just served.
pub fn resource_uri(
    base_path: &str,
    params: &ResourceParameters,
    page_size: usize,
    kind: ResourceUriType,
) -> String {
    let current = params.page_number();
    let page_number = match kind {
        ResourceUriType::PreviousPage => current.saturating_sub(1).max(1),
        ResourceUriType::NextPage => current.saturating_add(1),
        ResourceUriType::Current => current,
    };

    let query = LinkQuery {
        fields: params.fields(),
        order_by: params.order_by(),
        search_query: params.search_query(),
        genre: params.genre(),
        page_number,
        page_size,
    };

    match serde_urlencoded::to_string(&query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", base_path, qs),
        _ => base_path.to_string(),
    }
}

/// Metadata for `page` with previous/next links when those pages exist
pub fn pagination_metadata<T>(
    base_path: &str,
    params: &ResourceParameters,
    page: &PagedList<T>,
) -> PaginationMetadata {
    let previous = page.has_previous().then(|| {
        resource_uri(
            base_path,
            params,
            page.page_size(),
            ResourceUriType::PreviousPage,
        )
    });
    let next = page
        .has_next()
        .then(|| resource_uri(base_path, params, page.page_size(), ResourceUriType::NextPage));

    page.metadata(previous, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ResourceParameters {
        ResourceParameters {
            page_number: Some(2),
            page_size: Some(5),
            order_by: Some("name desc".to_string()),
            fields: Some("id,name".to_string()),
            genre: None,
            search_query: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_next_and_previous_links() {
        let params = params();
        assert_eq!(
            resource_uri("/api/authors", &params, 5, ResourceUriType::NextPage),
            "/api/authors?fields=id%2Cname&orderBy=name+desc&pageNumber=3&pageSize=5"
        );
        assert_eq!(
            resource_uri("/api/authors", &params, 5, ResourceUriType::PreviousPage),
            "/api/authors?fields=id%2Cname&orderBy=name+desc&pageNumber=1&pageSize=5"
        );
        assert_eq!(
            resource_uri("/api/authors", &params, 5, ResourceUriType::Current),
            "/api/authors?fields=id%2Cname&orderBy=name+desc&pageNumber=2&pageSize=5"
        );
    }

    #[test]
    fn test_links_follow_page_flags() {
        let params = ResourceParameters::default();
        let first = PagedList::create(vec![1, 2, 3], 1, 2);
        let meta = pagination_metadata("/api/authors", &params, &first);
        assert_eq!(meta.previous_page_link, None);
        assert_eq!(
            meta.next_page_link.as_deref(),
            Some("/api/authors?pageNumber=2&pageSize=2")
        );

        let params = ResourceParameters {
            page_number: Some(2),
            ..Default::default()
        };
        let last = PagedList::create(vec![1, 2, 3], 2, 2);
        let meta = pagination_metadata("/api/authors", &params, &last);
        assert_eq!(
            meta.previous_page_link.as_deref(),
            Some("/api/authors?pageNumber=1&pageSize=2")
        );
        assert_eq!(meta.next_page_link, None);
    }
}
