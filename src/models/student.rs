//! Student models and DTOs

use super::Course;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Student record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Only present when `populate=courses` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
}

/// Request to create a student.
///
/// Fields stay optional here; a missing value is rejected by the
/// `NOT NULL` constraint, not by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Request to update a student; omitted fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}
