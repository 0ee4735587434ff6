//! Axum route handlers for the catalog and stateless gap analysis.
//!
//! These only need the catalog, so they run on `Arc<SkillCatalog>` state and can be
//! mounted without a database.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::normalize::SkillSet;
use crate::analysis::report::{build_report, GapReport};
use crate::catalog::{DomainProfile, SkillCatalog};
use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DomainSummary {
    pub name: String,
    pub required_skills: usize,
    pub courses: usize,
}

#[derive(Debug, Serialize)]
pub struct DomainListResponse {
    pub domains: Vec<DomainSummary>,
}

#[derive(Debug, Deserialize)]
pub struct GapAnalysisRequest {
    /// Raw skill strings; blanks and duplicates are dropped.
    #[serde(default)]
    pub skills: Vec<String>,
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct GapAnalysisResponse {
    #[serde(flatten)]
    pub report: GapReport,
    pub coverage_percent: u32,
}

impl From<GapReport> for GapAnalysisResponse {
    fn from(report: GapReport) -> Self {
        let coverage_percent = report.coverage_percent();
        Self {
            report,
            coverage_percent,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/domains
pub async fn handle_list_domains(
    State(catalog): State<Arc<SkillCatalog>>,
) -> Json<DomainListResponse> {
    let domains = catalog
        .domains()
        .iter()
        .map(|d| DomainSummary {
            name: d.name.clone(),
            required_skills: d.required.len(),
            courses: d.courses.len(),
        })
        .collect();
    Json(DomainListResponse { domains })
}

/// GET /api/v1/domains/:name
pub async fn handle_get_domain(
    State(catalog): State<Arc<SkillCatalog>>,
    Path(name): Path<String>,
) -> Result<Json<DomainProfile>, AppError> {
    let profile = catalog.get_domain_profile(&name)?;
    Ok(Json(profile.clone()))
}

/// POST /api/v1/analysis/gap
///
/// Stateless: compares the given skills against one domain. Nothing is stored.
pub async fn handle_gap_analysis(
    State(catalog): State<Arc<SkillCatalog>>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<GapAnalysisResponse>, AppError> {
    let candidate: SkillSet = request.skills.iter().collect();
    let report = build_report(&catalog, &candidate, &request.domain)?;

    info!(
        "Gap analysis for '{}': {} of {} required skills missing",
        report.domain,
        report.missing.len(),
        report.required.len()
    );

    Ok(Json(report.into()))
}

pub fn analysis_routes() -> Router<Arc<SkillCatalog>> {
    Router::new()
        .route("/api/v1/domains", get(handle_list_domains))
        .route("/api/v1/domains/:name", get(handle_get_domain))
        .route("/api/v1/analysis/gap", post(handle_gap_analysis))
}
