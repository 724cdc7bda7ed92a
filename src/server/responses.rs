//! Shared response envelopes.

use serde::Serialize;

use crate::label_store::{Page, PageRequest};

/// Paginated listing envelope: the page of rows, the total count across all
/// pages, and the resolved window echoed back as integers.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub count: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Paginated<T> {
    pub fn new(window: PageRequest, page: Page<T>) -> Self {
        Paginated {
            data: page.rows,
            count: page.total,
            page: window.page,
            limit: window.limit,
        }
    }
}

/// Confirmation body for delete operations.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    pub fn new(entity: &str) -> Self {
        DeletedResponse {
            message: format!("{} deleted successfully", entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_echoes_window_and_total() {
        let envelope = Paginated::new(
            PageRequest::new(2, 5),
            Page {
                rows: vec![1, 2, 3],
                total: 13,
            },
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["count"], 13);
        assert_eq!(value["page"], 2);
        assert_eq!(value["limit"], 5);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
    }
}
