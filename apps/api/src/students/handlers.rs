use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::recommendation::RecommendationRow;
use crate::models::resume::ResumeRow;
use crate::models::student::StudentRow;
use crate::resumes::handlers::{
    report_for_resume, ResumeGapReportRequest, ResumeGapReportResponse,
};
use crate::state::AppState;
use crate::store::recommendations::history_for_student;
use crate::store::resumes::latest_resume_for_student;
use crate::store::students::{get_student, insert_student, student_exists, NewStudent};

/// Read-only: recording history goes through the POST variant.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainQuery {
    pub domain: String,
}

/// POST /api/v1/students
pub async fn handle_create_student(
    State(state): State<AppState>,
    Json(request): Json<NewStudent>,
) -> Result<(StatusCode, Json<StudentRow>), AppError> {
    validate_new_student(&request)?;
    let student = insert_student(&state.db, &request).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentRow>, AppError> {
    let student = get_student(&state.db, student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;
    Ok(Json(student))
}

/// GET /api/v1/students/:id/recommendations
pub async fn handle_recommendation_history(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<RecommendationRow>>, AppError> {
    if !student_exists(&state.db, student_id).await? {
        return Err(AppError::NotFound(format!("Student {student_id} not found")));
    }
    Ok(Json(history_for_student(&state.db, student_id).await?))
}

/// GET /api/v1/students/:id/gap-report?domain=...
///
/// Report against the student's most recent upload. Nothing is stored.
pub async fn handle_student_gap_report(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(query): Query<DomainQuery>,
) -> Result<Json<ResumeGapReportResponse>, AppError> {
    let resume = latest_resume(&state, student_id).await?;
    let response = report_for_resume(&state, &resume, &query.domain, false).await?;
    Ok(Json(response))
}

/// POST /api/v1/students/:id/gap-report
///
/// Same report; with `record: true` it is appended to the student's history.
pub async fn handle_record_student_gap_report(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(request): Json<ResumeGapReportRequest>,
) -> Result<Json<ResumeGapReportResponse>, AppError> {
    let resume = latest_resume(&state, student_id).await?;
    let response = report_for_resume(&state, &resume, &request.domain, request.record).await?;
    Ok(Json(response))
}

async fn latest_resume(state: &AppState, student_id: Uuid) -> Result<ResumeRow, AppError> {
    latest_resume_for_student(&state.db, student_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Student {student_id} has no uploaded resume"))
        })
}

fn validate_new_student(student: &NewStudent) -> Result<(), AppError> {
    if student.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if let Some(cgpa) = student.cgpa {
        if !(0.0..=10.0).contains(&cgpa) {
            return Err(AppError::Validation(format!(
                "cgpa must be between 0 and 10, got {cgpa}"
            )));
        }
    }
    if let Some(email) = &student.email {
        if !email.contains('@') {
            return Err(AppError::Validation(format!("'{email}' is not an email address")));
        }
    }
    Ok(())
}
