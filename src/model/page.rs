//! One bounded slice of a larger ordered collection, plus where it sits in the whole.

use serde::{Deserialize, Serialize};

/// A page of results as returned by the catalog service.
///
/// Page numbers are 1-based. For a well-formed page `first == (page == 1)`,
/// `last == (page == total_pages)` and `content.len() <= size`; see
/// [`Page::is_consistent`]. The pagination controller accepts the server's answer as-is
/// and never clamps locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Builds a page whose `first`/`last` flags are derived from its position.
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        };
        Self {
            content,
            page,
            size,
            total_pages,
            total_elements,
            first: page == 1,
            last: page >= total_pages,
        }
    }

    /// A page with nothing in it, used before the first fetch completes.
    pub fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            page: 1,
            size,
            total_pages: 0,
            total_elements: 0,
            first: true,
            last: true,
        }
    }

    /// Checks the paging invariants against the page's own metadata.
    ///
    /// An empty collection has zero pages; its only page counts as the last one.
    pub fn is_consistent(&self) -> bool {
        let expected_last = self.total_pages == 0 || self.page == self.total_pages;
        self.first == (self.page == 1)
            && self.last == expected_last
            && self.content.len() <= self.size as usize
    }

    /// "Showing page P of T (N total items)".
    pub fn status_line(&self) -> String {
        format!(
            "Showing page {} of {} ({} total items)",
            self.page, self.total_pages, self.total_elements
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_catalog_page() {
        let json = r#"{
            "content": [1, 2, 3, 4, 5, 6, 7, 8],
            "page": 2, "size": 10, "totalPages": 2, "totalElements": 18,
            "first": false, "last": true
        }"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 8);
        assert_eq!(page.total_pages, 2);
        assert!(page.last);
        assert!(page.is_consistent());
        assert_eq!(page.status_line(), "Showing page 2 of 2 (18 total items)");
    }

    #[test]
    fn test_new_derives_flags() {
        let page = Page::new(vec!['a'; 5], 1, 5, 12);
        assert_eq!(page.total_pages, 3);
        assert!(page.first);
        assert!(!page.last);
        assert!(page.is_consistent());

        let last = Page::new(vec!['a'; 2], 3, 5, 12);
        assert!(!last.first);
        assert!(last.last);
        assert!(last.is_consistent());
    }

    #[test]
    fn test_inconsistent_page_detected() {
        let mut page = Page::new(vec![0u8; 3], 1, 2, 3);
        assert!(!page.is_consistent());
        page.content.pop();
        assert!(page.is_consistent());
        page.first = false;
        assert!(!page.is_consistent());
    }

    #[test]
    fn test_empty_page_is_consistent() {
        let page = Page::<u8>::empty(10);
        assert!(page.first && page.last);
        assert!(page.is_consistent());
        assert!(Page::<u8>::new(Vec::new(), 1, 10, 0).is_consistent());
    }
}
