//! Offset pagination over a materialized candidate set

use crate::core::query::PaginationMetadata;
use serde::Serialize;

/// One page of an ordered candidate set plus its counters
///
/// The total count and the slice are both taken from the same `Vec`, so they
/// can never disagree within a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    items: Vec<T>,
    current_page: usize,
    page_size: usize,
    total_count: usize,
    total_pages: usize,
}

impl<T> PagedList<T> {
    /// Build a page from already-sliced items and the full count
    pub fn new(items: Vec<T>, total_count: usize, page_number: usize, page_size: usize) -> Self {
        // Ensure page size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let total_pages = if total_count == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            items,
            current_page: page_number.max(1),
            page_size,
            total_count,
            total_pages,
        }
    }

    /// Count the candidate set and slice out one page
    ///
    /// A page number beyond the last page yields an empty page.
    pub fn create(source: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        let total_count = source.len();
        let offset = (page_number - 1).saturating_mul(page_size);

        let items: Vec<T> = source.into_iter().skip(offset).take(page_size).collect();

        tracing::trace!(
            total_count,
            page_number,
            page_size,
            returned = items.len(),
            "sliced page"
        );

        Self::new(items, total_count, page_number, page_size)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Convert the items, keeping the counters
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    /// Metadata value for the response, with links built by the caller
    pub fn metadata(
        &self,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            previous_page_link,
            next_page_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = PagedList::create(vec!["Apple", "Young", "Zephyr"], 1, 2);
        assert_eq!(page.items(), &["Apple", "Young"]);
        assert_eq!(page.total_count(), 3);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page() {
        let page = PagedList::create(vec![1, 2, 3], 2, 2);
        assert_eq!(page.items(), &[3]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_beyond_range_is_empty() {
        let page = PagedList::create(vec![1, 2, 3], 5, 2);
        assert!(page.is_empty());
        assert_eq!(page.total_count(), 3);
        assert_eq!(page.current_page(), 5);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty_candidate_set() {
        let page = PagedList::create(Vec::<u8>::new(), 1, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let page = PagedList::create(vec![1, 2, 3], usize::MAX, 20);
        assert!(page.is_empty());
    }

    #[test]
    fn test_conservation_law() {
        for n in 0..40usize {
            for p in 1..12usize {
                let source: Vec<usize> = (0..n).collect();
                let total_pages = n.div_ceil(p);
                let mut seen = Vec::new();
                for page_number in 1..=total_pages {
                    let page = PagedList::create(source.clone(), page_number, p);
                    assert_eq!(page.total_pages(), total_pages);
                    assert_eq!(page.has_previous(), page_number > 1);
                    assert_eq!(page.has_next(), page_number < total_pages);
                    if page_number == total_pages {
                        let expected = if n % p == 0 { p } else { n % p };
                        assert_eq!(page.len(), expected);
                    }
                    seen.extend(page.into_items());
                }
                assert_eq!(seen, source, "n={} p={}", n, p);
            }
        }
    }

    #[test]
    fn test_map_keeps_counters() {
        let page = PagedList::create(vec![1, 2, 3], 1, 2).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.total_count(), 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_metadata() {
        let page = PagedList::create(vec![1, 2, 3], 1, 2);
        let meta = page.metadata(None, Some("/next".to_string()));
        assert_eq!(meta.total_count, 3);
        assert_eq!(meta.page_size, 2);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.previous_page_link, None);
        assert_eq!(meta.next_page_link.as_deref(), Some("/next"));
    }
}
