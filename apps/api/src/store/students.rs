use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::student::StudentRow;

#[derive(Debug, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: Option<String>,
    pub university: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<f64>,
    pub career_goal: Option<String>,
}

pub async fn insert_student(pool: &PgPool, student: &NewStudent) -> sqlx::Result<StudentRow> {
    sqlx::query_as::<_, StudentRow>(
        r#"
        INSERT INTO students (id, name, email, university, branch, cgpa, career_goal)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(student.name.trim())
    .bind(&student.email)
    .bind(&student.university)
    .bind(&student.branch)
    .bind(student.cgpa)
    .bind(&student.career_goal)
    .fetch_one(pool)
    .await
}

pub async fn get_student(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<StudentRow>> {
    sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn student_exists(pool: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}
