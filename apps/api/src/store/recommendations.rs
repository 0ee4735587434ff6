use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::report::GapReport;
use crate::models::recommendation::RecommendationRow;

/// Appends a gap report to the student's history.
pub async fn record_report(
    pool: &PgPool,
    student_id: Uuid,
    resume_id: Uuid,
    report: &GapReport,
) -> sqlx::Result<RecommendationRow> {
    let row = sqlx::query_as::<_, RecommendationRow>(
        r#"
        INSERT INTO recommendations
            (id, student_id, resume_id, domain, missing_skills, suggested_courses)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(student_id)
    .bind(resume_id)
    .bind(&report.domain)
    .bind(&report.missing)
    .bind(&report.courses)
    .fetch_one(pool)
    .await?;

    info!(
        "Recorded {} report {} for student {student_id}",
        report.domain, row.id
    );
    Ok(row)
}

/// Newest first.
pub async fn history_for_student(
    pool: &PgPool,
    student_id: Uuid,
) -> sqlx::Result<Vec<RecommendationRow>> {
    sqlx::query_as::<_, RecommendationRow>(
        "SELECT * FROM recommendations WHERE student_id = $1 ORDER BY created_at DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}
