//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::report::{build_report, GapReport};
use crate::errors::AppError;
use crate::extraction::extract_or_degrade;
use crate::models::resume::{ExtractionStatus, ResumeRow};
use crate::resumes::upload::read_upload;
use crate::state::AppState;
use crate::store::documents::{delete_document, document_key, put_document};
use crate::store::recommendations::record_report;
use crate::store::resumes::{get_resume, insert_resume, NewResume};
use crate::store::students::student_exists;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub resume_id: Uuid,
    pub extraction_status: ExtractionStatus,
    pub message: String,
    pub record: ResumeRow,
}

#[derive(Debug, Deserialize)]
pub struct ResumeGapReportRequest {
    pub domain: String,
    /// Append the report to the owning student's history.
    #[serde(default)]
    pub record: bool,
}

#[derive(Debug, Serialize)]
pub struct ResumeGapReportResponse {
    pub resume_id: Uuid,
    /// `Failed` means the report was computed from an empty skill list.
    pub extraction_status: ExtractionStatus,
    #[serde(flatten)]
    pub report: GapReport,
    pub coverage_percent: u32,
    pub recommendation_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Stores the document, runs extraction, persists the record. An extraction
/// failure is not an HTTP error: the record is stored with an empty skill list and
/// `extraction_status = "failed"` so the caller can still run (degraded) analysis.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;

    if let Some(student_id) = upload.student_id {
        if !student_exists(&state.db, student_id).await? {
            return Err(AppError::NotFound(format!("Student {student_id} not found")));
        }
    }

    let resume_id = Uuid::new_v4();
    let s3_key = document_key(resume_id, &upload.file_name);
    put_document(
        &state.s3,
        &state.config.s3_bucket,
        &s3_key,
        upload.bytes.clone(),
        &upload.content_type,
    )
    .await
    .map_err(|e| AppError::S3(e.to_string()))?;

    let outcome =
        extract_or_degrade(state.extractor.as_ref(), upload.bytes, &upload.file_name).await;
    let status = outcome.status;

    let inserted = insert_resume(
        &state.db,
        NewResume {
            id: resume_id,
            student_id: upload.student_id,
            file_name: &upload.file_name,
            s3_key: &s3_key,
            extracted: &outcome.resume,
            status,
            extraction_error: outcome.error.as_deref(),
        },
    )
    .await;

    let record = match inserted {
        Ok(record) => record,
        Err(e) => {
            // No row will ever point at the object; remove it.
            let bucket = &state.config.s3_bucket;
            warn!("Storing resume {resume_id} failed; removing s3://{bucket}/{s3_key}");
            if let Err(cleanup) = delete_document(&state.s3, bucket, &s3_key).await {
                warn!("Orphaned document left at s3://{bucket}/{s3_key}: {cleanup}");
            }
            return Err(e.into());
        }
    };

    let message = match status {
        ExtractionStatus::Parsed => "Resume uploaded and parsed successfully".to_string(),
        ExtractionStatus::Failed => {
            "Resume uploaded but parsing failed; no skills were detected".to_string()
        }
    };

    Ok(Json(UploadResponse {
        resume_id,
        extraction_status: status,
        message,
        record,
    }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = get_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(resume))
}

/// POST /api/v1/resumes/:id/gap-report
///
/// Computes a fresh report for the stored record's skills against one domain.
pub async fn handle_resume_gap_report(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<ResumeGapReportRequest>,
) -> Result<Json<ResumeGapReportResponse>, AppError> {
    let resume = get_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let response = report_for_resume(&state, &resume, &request.domain, request.record).await?;
    Ok(Json(response))
}

/// Shared by the resume and student gap-report endpoints.
pub async fn report_for_resume(
    state: &AppState,
    resume: &ResumeRow,
    domain: &str,
    record: bool,
) -> Result<ResumeGapReportResponse, AppError> {
    let report = build_report(&state.catalog, &resume.skill_set(), domain)?;

    let recommendation_id = if record {
        let student_id = resume.student_id.ok_or_else(|| {
            AppError::Validation(format!(
                "Resume {} is not linked to a student; history cannot be recorded",
                resume.id
            ))
        })?;
        Some(
            record_report(&state.db, student_id, resume.id, &report)
                .await?
                .id,
        )
    } else {
        None
    };

    info!(
        "Gap report for resume {} against '{}': {} missing",
        resume.id,
        report.domain,
        report.missing.len()
    );

    let coverage_percent = report.coverage_percent();
    Ok(ResumeGapReportResponse {
        resume_id: resume.id,
        extraction_status: resume.extraction_status,
        report,
        coverage_percent,
        recommendation_id,
    })
}
