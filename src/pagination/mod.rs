//! Offset-based pagination over ordered collections.
//!
//! Every list endpoint paginates through this module, whether the records
//! come from a MongoDB skip/limit query or from a vector already in memory.
//! The module only does the arithmetic and the metadata envelope; fetching
//! records and counting them is the caller's job.

use serde::Serialize;

use crate::constants::{
    DEFAULT_PAGE_NUMBER, ERR_PAGE_SIZE_MISCONFIGURED, MAX_PAGE_SIZE,
};
use crate::errors::ApiError;

/// A resolved page request: both fields are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Resolve a page request from untrusted query parameters.
    ///
    /// A value that does not parse as an integer >= 1 falls back to its
    /// default (page 1, or the configured default page size) instead of
    /// failing the request. The resolved page size is capped at
    /// [`MAX_PAGE_SIZE`].
    ///
    /// The only error case is a `default_page_size` of zero, which is a
    /// server misconfiguration rather than bad client input.
    pub fn resolve(
        page: Option<&str>,
        page_size: Option<&str>,
        default_page_size: u64,
    ) -> Result<Self, ApiError> {
        if default_page_size == 0 {
            return Err(ApiError::InternalServerError(
                ERR_PAGE_SIZE_MISCONFIGURED.to_string(),
            ));
        }

        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE_NUMBER);
        let page_size = parse_positive(page_size)
            .unwrap_or(default_page_size)
            .min(MAX_PAGE_SIZE);

        Ok(Self { page, page_size })
    }

    /// Zero-based index of the first record on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of documents to skip in a store-backed query.
    pub fn skip(&self) -> u64 {
        self.offset()
    }

    /// Query limit for a store-backed query.
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

/// Parse an untrusted query value as a positive integer.
///
/// Returns `None` for absent, unparseable, or non-positive values;
/// defaulting is the caller's policy, applied separately.
pub fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n >= 1)
}

/// Total number of pages needed to hold `total_records` records.
///
/// Zero exactly when the collection is empty.
pub fn total_pages(total_records: u64, page_size: u64) -> u64 {
    total_records.div_ceil(page_size)
}

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub total_records: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Build the metadata envelope around records a store already sliced
    /// with the request's skip/limit window.
    pub fn from_parts(items: Vec<T>, request: PageRequest, total_records: u64) -> Self {
        Self {
            current_page: request.page,
            total_pages: total_pages(total_records, request.page_size),
            page_size: request.page_size,
            total_records,
            items,
        }
    }
}

/// Slice one page out of an in-memory collection.
///
/// The slice is clamped to the collection bounds: a page past the end
/// yields empty items, never an error. The input order is preserved as-is;
/// this function never re-sorts.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total_records = items.len() as u64;
    let start = request.offset().min(total_records) as usize;
    let end = (request.offset().saturating_add(request.page_size)).min(total_records) as usize;

    Page {
        current_page: request.page,
        total_pages: total_pages(total_records, request.page_size),
        page_size: request.page_size,
        total_records,
        items: items[start..end].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PAGE_SIZE;

    fn request(page: u64, page_size: u64) -> PageRequest {
        PageRequest { page, page_size }
    }

    #[test]
    fn test_resolve_defaults_when_absent() {
        let req = PageRequest::resolve(None, None, DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_parses_valid_values() {
        let req = PageRequest::resolve(Some("3"), Some("25"), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req, request(3, 25));
    }

    #[test]
    fn test_resolve_unparseable_page_falls_back_to_one() {
        let req = PageRequest::resolve(Some("abc"), Some("5"), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 5);
    }

    #[test]
    fn test_resolve_non_positive_values_fall_back() {
        let req = PageRequest::resolve(Some("0"), Some("0"), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);

        let req = PageRequest::resolve(Some("-4"), Some("-1"), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let req = PageRequest::resolve(Some(" 2 "), Some(" 7 "), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req, request(2, 7));
    }

    #[test]
    fn test_resolve_caps_page_size() {
        let req = PageRequest::resolve(None, Some("10000"), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_rejects_zero_default_page_size() {
        let err = PageRequest::resolve(None, None, 0).unwrap_err();
        assert!(matches!(err, ApiError::InternalServerError(_)));
    }

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(request(1, 10).offset(), 0);
        assert_eq!(request(2, 10).offset(), 10);
        assert_eq!(request(4, 3).offset(), 9);
        assert_eq!(request(2, 10).skip(), 10);
        assert_eq!(request(2, 10).limit(), 10);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(10, 3), 4);
    }

    #[test]
    fn test_paginate_five_records_page_size_two() {
        let data = vec!["a", "b", "c", "d", "e"];

        let first = paginate(&data, request(1, 2));
        assert_eq!(first.items, vec!["a", "b"]);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_records, 5);

        let last = paginate(&data, request(3, 2));
        assert_eq!(last.items, vec!["e"]);
        assert_eq!(last.total_pages, 3);

        let past_end = paginate(&data, request(4, 2));
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.current_page, 4);
        assert_eq!(past_end.total_pages, 3);
        assert_eq!(past_end.total_records, 5);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let data: Vec<i32> = vec![];
        let page = paginate(&data, request(1, 5));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_records, 0);

        // Any requested page on an empty collection behaves the same.
        let page = paginate(&data, request(9, 5));
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 9);
    }

    #[test]
    fn test_paginate_partitions_without_loss_or_duplication() {
        let data: Vec<u32> = (0..37).collect();

        for page_size in 1..=8 {
            let pages = total_pages(data.len() as u64, page_size);
            let mut rebuilt: Vec<u32> = Vec::new();
            for page in 1..=pages {
                rebuilt.extend(paginate(&data, request(page, page_size)).items);
            }
            assert_eq!(rebuilt, data, "page_size {} must partition exactly", page_size);
        }
    }

    #[test]
    fn test_paginate_matches_plain_slice() {
        let data: Vec<u32> = (0..20).collect();
        for page in 1..=6 {
            let req = request(page, 7);
            let start = (req.offset() as usize).min(data.len());
            let end = (start + 7).min(data.len());
            assert_eq!(paginate(&data, req).items, &data[start..end]);
        }
    }

    #[test]
    fn test_paginate_preserves_input_order() {
        let data = vec![5, 1, 9, 3];
        let page = paginate(&data, request(1, 4));
        assert_eq!(page.items, vec![5, 1, 9, 3]);
    }

    #[test]
    fn test_paginate_is_idempotent() {
        let data: Vec<u32> = (0..11).collect();
        let req = request(2, 4);
        assert_eq!(paginate(&data, req), paginate(&data, req));
    }

    #[test]
    fn test_paginate_offset_overflow_is_clamped() {
        let data = vec![1, 2, 3];
        let page = paginate(&data, request(u64::MAX, u64::MAX));
        assert!(page.items.is_empty());
        assert_eq!(page.total_records, 3);
    }

    #[test]
    fn test_from_parts_mirrors_in_memory_metadata() {
        let req = request(2, 2);
        let store_backed = Page::from_parts(vec!["c", "d"], req, 5);
        let in_memory = paginate(&["a", "b", "c", "d", "e"], req);
        assert_eq!(store_backed, in_memory);
    }
}
