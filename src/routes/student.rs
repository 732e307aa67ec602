//! Student route handlers
//!
//! CRUD over the `students` table. Missing ids answer 404 with a fixed
//! message, storage failures answer 500 with the raw error text.

use crate::error::{student_not_found, ApiResult, AppError};
use crate::models::{
    CreateStudentRequest, ListResponse, MessageResponse, PageMeta, Student, UpdateStudentRequest,
};
use crate::query::{ListQuery, PopulateQuery};
use crate::state::SharedState;
use super::record_id;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, info};

/// Create a new student
pub async fn create_student(
    State(state): State<SharedState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateStudentRequest>, AppError>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    debug!("Creating student: {:?}", payload.email);

    let student = state.repository.create_student(payload).await?;

    info!("Student created: {} (id: {})", student.email, student.id);
    Ok((StatusCode::CREATED, Json(student)))
}

/// List students with pagination, sorting and optional course include
pub async fn list_students(
    State(state): State<SharedState>,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> ApiResult<Json<ListResponse<Student>>> {
    let params = query.resolve(&state.pagination);
    debug!("Listing students: {:?}", params);

    let (students, total) = state.repository.list_students(&params).await?;

    debug!("Found {} of {} students", students.len(), total);
    Ok(Json(ListResponse::new(
        PageMeta::new(params.page, params.limit, total),
        students,
    )))
}

/// Get a specific student
pub async fn get_student(
    State(state): State<SharedState>,
    WithRejection(Path(raw_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<PopulateQuery>, AppError>,
) -> ApiResult<Json<Student>> {
    debug!("Getting student: {}", raw_id);
    let id = record_id(raw_id, student_not_found)?;

    let student = state
        .repository
        .find_student(id, query.include())
        .await?
        .ok_or_else(student_not_found)?;

    Ok(Json(student))
}

/// Update a student; only supplied fields change
pub async fn update_student(
    State(state): State<SharedState>,
    WithRejection(Path(raw_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateStudentRequest>, AppError>,
) -> ApiResult<Json<Student>> {
    debug!("Updating student: {}", raw_id);
    let id = record_id(raw_id, student_not_found)?;

    let student = state
        .repository
        .update_student(id, payload)
        .await?
        .ok_or_else(student_not_found)?;

    info!("Student updated: {} (id: {})", student.email, student.id);
    Ok(Json(student))
}

/// Delete a student
pub async fn delete_student(
    State(state): State<SharedState>,
    WithRejection(Path(raw_id), _): WithRejection<Path<i64>, AppError>,
) -> ApiResult<Json<MessageResponse>> {
    debug!("Deleting student: {}", raw_id);
    let id = record_id(raw_id, student_not_found)?;

    if !state.repository.delete_student(id).await? {
        return Err(student_not_found());
    }

    info!("Student deleted: {}", id);
    Ok(Json(MessageResponse::new("Student deleted successfully")))
}
