//! Course route handlers
//!
//! Courses exist so students can be enrolled and later listed with
//! `populate=courses`.

use crate::error::{course_not_found, student_not_found, ApiResult, AppError};
use crate::models::{Course, CreateCourseRequest, Student};
use crate::query::Include;
use crate::state::SharedState;
use super::record_id;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, info};

/// Create a new course
pub async fn create_course(
    State(state): State<SharedState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateCourseRequest>, AppError>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    debug!("Creating course: {:?}", payload.title);

    let course = state.repository.create_course(payload).await?;

    info!("Course created: {} (id: {})", course.title, course.id);
    Ok((StatusCode::CREATED, Json(course)))
}

/// List all courses
pub async fn list_courses(State(state): State<SharedState>) -> ApiResult<Json<Vec<Course>>> {
    Ok(Json(state.repository.list_courses().await?))
}

/// Enroll a student in a course and return the student with its courses
pub async fn enroll_student(
    State(state): State<SharedState>,
    WithRejection(Path((raw_student, raw_course)), _): WithRejection<Path<(i64, i64)>, AppError>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    debug!("Enrolling student {} in course {}", raw_student, raw_course);
    let student_id = record_id(raw_student, student_not_found)?;
    let course_id = record_id(raw_course, course_not_found)?;

    let repo = &state.repository;
    repo.find_student(student_id, Include::default())
        .await?
        .ok_or_else(student_not_found)?;
    repo.find_course(course_id)
        .await?
        .ok_or_else(course_not_found)?;

    repo.enroll(student_id, course_id).await?;

    let student = repo
        .find_student(student_id, Include { courses: true })
        .await?
        .ok_or_else(student_not_found)?;

    info!("Student {} enrolled in course {}", student_id, course_id);
    Ok((StatusCode::CREATED, Json(student)))
}
