//! Shared response envelope types for API handlers.
//!
//! Paginated lists use `{ "data": [...], "pagination": {...} }`; mutating
//! endpoints that return no entity use [`MessageResponse`].

use schoolrec_core::pagination::{total_pages, PageRequest};
use serde::Serialize;

/// Standard envelope for paginated list endpoints.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Pagination metadata computed from the filtered total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: PageRequest) -> Self {
        Self {
            data,
            pagination: Pagination {
                total,
                page: page.page,
                limit: page.limit,
                total_pages: total_pages(total, page.limit),
            },
        }
    }
}

/// `{ "message": ... }` body for deletes and other entity-less successes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
