use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::extraction::ExtractedResume;
use crate::models::resume::{ExtractionStatus, ResumeRow};

/// Parameters for persisting one upload.
pub struct NewResume<'a> {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub file_name: &'a str,
    pub s3_key: &'a str,
    pub extracted: &'a ExtractedResume,
    pub status: ExtractionStatus,
    pub extraction_error: Option<&'a str>,
}

pub async fn insert_resume(pool: &PgPool, params: NewResume<'_>) -> sqlx::Result<ResumeRow> {
    let NewResume {
        id,
        student_id,
        file_name,
        s3_key,
        extracted,
        status,
        extraction_error,
    } = params;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (id, student_id, file_name, s3_key, name, email, phone, skills,
             experience, education, certifications, extraction_status,
             extraction_error, text_excerpt)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(student_id)
    .bind(file_name)
    .bind(s3_key)
    .bind(&extracted.name)
    .bind(&extracted.email)
    .bind(&extracted.phone)
    .bind(&extracted.skills)
    .bind(&extracted.experience)
    .bind(&extracted.education)
    .bind(&extracted.certifications)
    .bind(status.as_str())
    .bind(extraction_error)
    .bind(&extracted.text_excerpt)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored resume {id} ({}, {} skills)",
        status.as_str(),
        row.skills.len()
    );
    Ok(row)
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<ResumeRow>> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Most recent upload for a student, if any.
pub async fn latest_resume_for_student(
    pool: &PgPool,
    student_id: Uuid,
) -> sqlx::Result<Option<ResumeRow>> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE student_id = $1 ORDER BY uploaded_at DESC LIMIT 1",
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await
}
