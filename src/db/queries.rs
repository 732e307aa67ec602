//! SQL query constants and builders
//!
//! Contains all SQL queries used by the application.

use crate::query::Sort;

/// Schema bootstrap, run in order at startup
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) UNIQUE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        code VARCHAR(50),
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS student_courses (
        student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
        course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (student_id, course_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_student_courses_course_id ON student_courses(course_id)",
];

pub const STUDENT_COLUMNS: &str = "id, name, email, created_at, updated_at";

pub const INSERT_STUDENT: &str = r#"
    INSERT INTO students (name, email, created_at, updated_at)
    VALUES ($1, $2, $3, $3)
    RETURNING id, name, email, created_at, updated_at
"#;

pub const GET_STUDENT: &str = r#"
    SELECT id, name, email, created_at, updated_at
    FROM students
    WHERE id = $1
"#;

pub const COUNT_STUDENTS: &str = "SELECT COUNT(*) FROM students";

/// Only the supplied fields change; NULL parameters keep the stored value
pub const UPDATE_STUDENT: &str = r#"
    UPDATE students
    SET name = COALESCE($1, name),
        email = COALESCE($2, email),
        updated_at = $3
    WHERE id = $4
    RETURNING id, name, email, created_at, updated_at
"#;

pub const DELETE_STUDENT: &str = "DELETE FROM students WHERE id = $1";

/// Courses of every student id in `$1`
pub const COURSES_FOR_STUDENTS: &str = r#"
    SELECT sc.student_id, c.id, c.title, c.code, c.created_at, c.updated_at
    FROM student_courses sc
    JOIN courses c ON c.id = sc.course_id
    WHERE sc.student_id = ANY($1)
    ORDER BY sc.student_id, c.id
"#;

pub const INSERT_COURSE: &str = r#"
    INSERT INTO courses (title, code, created_at, updated_at)
    VALUES ($1, $2, $3, $3)
    RETURNING id, title, code, created_at, updated_at
"#;

pub const GET_COURSE: &str = r#"
    SELECT id, title, code, created_at, updated_at
    FROM courses
    WHERE id = $1
"#;

pub const LIST_COURSES: &str = r#"
    SELECT id, title, code, created_at, updated_at
    FROM courses
    ORDER BY id
"#;

pub const ENROLL_STUDENT: &str = r#"
    INSERT INTO student_courses (student_id, course_id)
    VALUES ($1, $2)
    ON CONFLICT (student_id, course_id) DO NOTHING
"#;

/// SQL builder for statements with a dynamic shape
pub struct SqlBuilder;

impl SqlBuilder {
    /// Paged student listing. The ORDER BY column comes from a closed enum,
    /// `id` breaks ties so pages never overlap.
    pub fn list_students(sort: &Sort) -> String {
        let tiebreak = if sort.field.column() == "id" {
            String::new()
        } else {
            ", id ASC".to_string()
        };

        format!(
            "SELECT {} FROM students ORDER BY {} {}{} LIMIT $1 OFFSET $2",
            STUDENT_COLUMNS,
            sort.field.column(),
            sort.order.as_sql(),
            tiebreak
        )
    }
}
