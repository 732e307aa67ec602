//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

pub mod course;
pub mod student;

// Re-export commonly used types
pub use course::*;
pub use student::*;

use serde::Serialize;

/// Pagination block of a list envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// `{meta, data}` envelope returned by list endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(meta: PageMeta, data: Vec<T>) -> Self {
        Self { meta, data }
    }
}

/// Message-only response (no data)
#[derive(Serialize)]
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
