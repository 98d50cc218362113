//! Pagination response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::pagination::Page;

/// Paginated list response.
///
/// Field names follow the wire contract existing clients rely on:
/// `{ success, currentPage, totalPages, pageSize, totalRecords, data }`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T: Serialize> {
    /// Whether the request was successful
    pub success: bool,
    /// Current page number
    pub current_page: u64,
    /// Total number of pages
    pub total_pages: u64,
    /// Items per page
    pub page_size: u64,
    /// Total number of records across all pages
    pub total_records: u64,
    /// Records on this page
    pub data: Vec<T>,
}

impl<T: Serialize> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            current_page: page.current_page,
            total_pages: page.total_pages,
            page_size: page.page_size,
            total_records: page.total_records,
            data: page.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{paginate, PageRequest};

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let page = paginate(
            &["a", "b", "c"],
            PageRequest {
                page: 1,
                page_size: 2,
            },
        );
        let body: PaginatedResponse<&str> = page.into();
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalRecords"], 3);
        assert_eq!(json["data"], serde_json::json!(["a", "b"]));
    }
}
