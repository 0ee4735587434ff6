use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::catalog::SkillCatalog;
use crate::config::Config;
use crate::extraction::ResumeExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Read-only after startup.
    pub catalog: Arc<SkillCatalog>,
    /// Pluggable extractor. Default: PdfResumeExtractor. Swap via EXTRACTION_SERVICE_URL.
    pub extractor: Arc<dyn ResumeExtractor>,
}

