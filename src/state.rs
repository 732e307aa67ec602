//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::config::PaginationConfig;
use crate::db::StudentRepository;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Student and course storage
    pub repository: Arc<dyn StudentRepository>,

    /// Default and maximum page sizes for list queries
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn StudentRepository>, pagination: PaginationConfig) -> Self {
        Self {
            repository,
            pagination,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
