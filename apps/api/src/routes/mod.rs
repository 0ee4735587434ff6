pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::analysis_routes;
use crate::resumes::handlers as resumes;
use crate::resumes::upload::MULTIPART_OVERHEAD_BYTES;
use crate::state::AppState;
use crate::students::handlers as students;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(resumes::handle_upload))
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/gap-report",
            post(resumes::handle_resume_gap_report),
        )
        // Student API
        .route("/api/v1/students", post(students::handle_create_student))
        .route("/api/v1/students/:id", get(students::handle_get_student))
        .route(
            "/api/v1/students/:id/recommendations",
            get(students::handle_recommendation_history),
        )
        .route(
            "/api/v1/students/:id/gap-report",
            get(students::handle_student_gap_report)
                .post(students::handle_record_student_gap_report),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state.clone())
        // Catalog + stateless analysis
        .merge(analysis_routes().with_state(state.catalog))
}
