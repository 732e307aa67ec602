//! In-memory repository used by the handler tests
//!
//! Mirrors the constraints of the PostgreSQL schema (NOT NULL, UNIQUE email)
//! so error paths can be exercised without a database.

use super::StudentRepository;
use crate::error::AppError;
use crate::models::{Course, CreateCourseRequest, CreateStudentRequest, Student, UpdateStudentRequest};
use crate::query::{Include, ListParams, SortField, SortOrder};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    students: BTreeMap<i32, Student>,
    courses: BTreeMap<i32, Course>,
    enrollments: BTreeSet<(i32, i32)>,
    next_student_id: i32,
    next_course_id: i32,
}

impl Tables {
    fn courses_of(&self, student_id: i32) -> Vec<Course> {
        self.enrollments
            .range((student_id, i32::MIN)..=(student_id, i32::MAX))
            .filter_map(|(_, course_id)| self.courses.get(course_id).cloned())
            .collect()
    }

    fn with_include(&self, mut student: Student, include: Include) -> Student {
        if include.courses {
            student.courses = Some(self.courses_of(student.id));
        }
        student
    }

    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.students
            .values()
            .any(|s| s.email == email && Some(s.id) != except)
    }
}

fn not_null(column: &str, table: &str) -> AppError {
    AppError::Internal(format!(
        "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
        column, table
    ))
}

fn duplicate_email() -> AppError {
    AppError::Internal(
        "duplicate key value violates unique constraint \"students_email_key\"".to_string(),
    )
}

fn compare(a: &Student, b: &Student, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

#[async_trait]
impl StudentRepository for MemoryRepository {
    async fn create_student(&self, input: CreateStudentRequest) -> Result<Student, AppError> {
        let name = input.name.ok_or_else(|| not_null("name", "students"))?;
        let email = input.email.ok_or_else(|| not_null("email", "students"))?;

        let mut tables = self.tables.write().await;
        if tables.email_taken(&email, None) {
            return Err(duplicate_email());
        }

        tables.next_student_id += 1;
        let now = Utc::now();
        let student = Student {
            id: tables.next_student_id,
            name,
            email,
            created_at: now,
            updated_at: now,
            courses: None,
        };
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn list_students(&self, params: &ListParams) -> Result<(Vec<Student>, i64), AppError> {
        let tables = self.tables.read().await;

        let mut all: Vec<Student> = tables.students.values().cloned().collect();
        all.sort_by(|a, b| {
            let primary = match params.sort.order {
                SortOrder::Asc => compare(a, b, params.sort.field),
                SortOrder::Desc => compare(b, a, params.sort.field),
            };
            primary.then(a.id.cmp(&b.id))
        });

        let total = all.len() as i64;
        let page = all
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit as usize)
            .map(|s| tables.with_include(s, params.include))
            .collect();

        Ok((page, total))
    }

    async fn find_student(&self, id: i32, include: Include) -> Result<Option<Student>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .get(&id)
            .cloned()
            .map(|s| tables.with_include(s, include)))
    }

    async fn update_student(
        &self,
        id: i32,
        changes: UpdateStudentRequest,
    ) -> Result<Option<Student>, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            if tables.email_taken(email, Some(id)) {
                return Err(duplicate_email());
            }
        }

        let Some(student) = tables.students.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            student.name = name;
        }
        if let Some(email) = changes.email {
            student.email = email;
        }
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn delete_student(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let removed = tables.students.remove(&id).is_some();
        tables.enrollments.retain(|(student_id, _)| *student_id != id);
        Ok(removed)
    }

    async fn create_course(&self, input: CreateCourseRequest) -> Result<Course, AppError> {
        let title = input.title.ok_or_else(|| not_null("title", "courses"))?;

        let mut tables = self.tables.write().await;
        tables.next_course_id += 1;
        let now = Utc::now();
        let course = Course {
            id: tables.next_course_id,
            title,
            code: input.code,
            created_at: now,
            updated_at: now,
        };
        tables.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.tables.read().await.courses.values().cloned().collect())
    }

    async fn find_course(&self, id: i32) -> Result<Option<Course>, AppError> {
        Ok(self.tables.read().await.courses.get(&id).cloned())
    }

    async fn enroll(&self, student_id: i32, course_id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if !tables.students.contains_key(&student_id) || !tables.courses.contains_key(&course_id) {
            return Err(AppError::Internal(
                "insert or update on table \"student_courses\" violates foreign key constraint"
                    .to_string(),
            ));
        }
        tables.enrollments.insert((student_id, course_id));
        Ok(())
    }
}
