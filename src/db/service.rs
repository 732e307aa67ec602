// PostgreSQL implementation of the student repository
//
// Provides direct database access for students and courses

use super::queries::{
    SqlBuilder, COUNT_STUDENTS, COURSES_FOR_STUDENTS, DELETE_STUDENT, ENROLL_STUDENT, GET_COURSE,
    GET_STUDENT, INSERT_COURSE, INSERT_STUDENT, LIST_COURSES, UPDATE_STUDENT,
};
use super::StudentRepository;
use crate::error::AppError;
use crate::models::{Course, CreateCourseRequest, CreateStudentRequest, Student, UpdateStudentRequest};
use crate::query::{Include, ListParams};
use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::{Object, Pool};
use std::collections::HashMap;
use tokio_postgres::Row;
use tracing::debug;

fn student_from_row(row: &Row) -> Result<Student, tokio_postgres::Error> {
    Ok(Student {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        courses: None,
    })
}

fn course_from_row(row: &Row) -> Result<Course, tokio_postgres::Error> {
    Ok(Course {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        code: row.try_get("code")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// Student repository backed by a deadpool connection pool
pub struct PgStudentRepository {
    pool: Pool,
}

impl PgStudentRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn client(&self) -> Result<Object, AppError> {
        Ok(self.pool.get().await?)
    }

    // Attach each student's courses with a single query over all ids
    async fn attach_courses(&self, client: &Object, students: &mut [Student]) -> Result<(), AppError> {
        let ids: Vec<i32> = students.iter().map(|s| s.id).collect();
        let rows = client.query(COURSES_FOR_STUDENTS, &[&ids]).await?;

        let mut by_student: HashMap<i32, Vec<Course>> = HashMap::new();
        for row in &rows {
            let student_id: i32 = row.try_get("student_id")?;
            by_student
                .entry(student_id)
                .or_default()
                .push(course_from_row(row)?);
        }

        for student in students.iter_mut() {
            student.courses = Some(by_student.remove(&student.id).unwrap_or_default());
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn create_student(&self, input: CreateStudentRequest) -> Result<Student, AppError> {
        let client = self.client().await?;
        let row = client
            .query_one(INSERT_STUDENT, &[&input.name, &input.email, &Utc::now()])
            .await?;
        Ok(student_from_row(&row)?)
    }

    async fn list_students(&self, params: &ListParams) -> Result<(Vec<Student>, i64), AppError> {
        let client = self.client().await?;

        let sql = SqlBuilder::list_students(&params.sort);
        debug!("Listing students: {} (limit {}, offset {})", sql, params.limit, params.offset());

        let rows = client
            .query(sql.as_str(), &[&params.limit, &params.offset()])
            .await?;
        let mut students = rows
            .iter()
            .map(student_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let total: i64 = client.query_one(COUNT_STUDENTS, &[]).await?.try_get(0)?;

        if params.include.courses {
            self.attach_courses(&client, &mut students).await?;
        }

        Ok((students, total))
    }

    async fn find_student(&self, id: i32, include: Include) -> Result<Option<Student>, AppError> {
        let client = self.client().await?;
        let Some(row) = client.query_opt(GET_STUDENT, &[&id]).await? else {
            return Ok(None);
        };

        let mut student = student_from_row(&row)?;
        if include.courses {
            self.attach_courses(&client, std::slice::from_mut(&mut student))
                .await?;
        }
        Ok(Some(student))
    }

    async fn update_student(
        &self,
        id: i32,
        changes: UpdateStudentRequest,
    ) -> Result<Option<Student>, AppError> {
        let client = self.client().await?;
        let row = client
            .query_opt(
                UPDATE_STUDENT,
                &[&changes.name, &changes.email, &Utc::now(), &id],
            )
            .await?;
        Ok(row.as_ref().map(student_from_row).transpose()?)
    }

    async fn delete_student(&self, id: i32) -> Result<bool, AppError> {
        let client = self.client().await?;
        let rows_affected = client.execute(DELETE_STUDENT, &[&id]).await?;
        Ok(rows_affected > 0)
    }

    async fn create_course(&self, input: CreateCourseRequest) -> Result<Course, AppError> {
        let client = self.client().await?;
        let row = client
            .query_one(INSERT_COURSE, &[&input.title, &input.code, &Utc::now()])
            .await?;
        Ok(course_from_row(&row)?)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let client = self.client().await?;
        let rows = client.query(LIST_COURSES, &[]).await?;
        Ok(rows
            .iter()
            .map(course_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn find_course(&self, id: i32) -> Result<Option<Course>, AppError> {
        let client = self.client().await?;
        let row = client.query_opt(GET_COURSE, &[&id]).await?;
        Ok(row.as_ref().map(course_from_row).transpose()?)
    }

    async fn enroll(&self, student_id: i32, course_id: i32) -> Result<(), AppError> {
        let client = self.client().await?;
        client
            .execute(ENROLL_STUDENT, &[&student_id, &course_id])
            .await?;
        Ok(())
    }
}
