//! Storage boundary used by the HTTP handlers

use crate::error::AppError;
use crate::models::{Course, CreateCourseRequest, CreateStudentRequest, Student, UpdateStudentRequest};
use crate::query::{Include, ListParams};
use async_trait::async_trait;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create_student(&self, input: CreateStudentRequest) -> Result<Student, AppError>;

    /// One page of students plus the total row count
    async fn list_students(&self, params: &ListParams) -> Result<(Vec<Student>, i64), AppError>;

    async fn find_student(&self, id: i32, include: Include) -> Result<Option<Student>, AppError>;

    /// `None` when no student has this id
    async fn update_student(
        &self,
        id: i32,
        changes: UpdateStudentRequest,
    ) -> Result<Option<Student>, AppError>;

    /// `false` when no student has this id
    async fn delete_student(&self, id: i32) -> Result<bool, AppError>;

    async fn create_course(&self, input: CreateCourseRequest) -> Result<Course, AppError>;

    async fn list_courses(&self) -> Result<Vec<Course>, AppError>;

    async fn find_course(&self, id: i32) -> Result<Option<Course>, AppError>;

    /// Link a student to a course; linking twice is a no-op
    async fn enroll(&self, student_id: i32, course_id: i32) -> Result<(), AppError>;
}
