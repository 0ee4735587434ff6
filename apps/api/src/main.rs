mod analysis;
mod catalog;
mod config;
mod db;
mod errors;
mod extraction;
mod models;
mod resumes;
mod routes;
mod state;
mod store;
mod students;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::SkillCatalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::heuristics::{SkillMatcher, DEFAULT_SKILL_KEYWORDS};
use crate::extraction::{PdfResumeExtractor, RemoteExtractor, ResumeExtractor};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillGap API v{}", env!("CARGO_PKG_VERSION"));

    // Skill catalog must be complete before the first request
    let catalog = Arc::new(load_catalog(&config)?);
    info!(
        "Skill catalog ready: {}",
        catalog.domain_names().collect::<Vec<_>>().join(", ")
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize extractor (local PDF unless EXTRACTION_SERVICE_URL is set)
    let extractor = build_extractor(&config, &catalog)?;
    info!("Resume extractor initialized (backend: {})", extractor.backend());

    // Build app state
    let state = AppState {
        db,
        s3,
        config: config.clone(),
        catalog,
        extractor,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_catalog(config: &Config) -> Result<SkillCatalog> {
    match &config.catalog_path {
        Some(path) => SkillCatalog::from_path(path)
            .with_context(|| format!("Failed to load skill catalog from {}", path.display())),
        None => SkillCatalog::builtin().context("Built-in skill catalog is invalid"),
    }
}

/// Local extraction looks for the default keywords plus every skill the catalog
/// requires, so catalog edits are picked up without touching the extractor.
fn build_extractor(config: &Config, catalog: &SkillCatalog) -> Result<Arc<dyn ResumeExtractor>> {
    if let Some(url) = &config.extraction_service_url {
        let remote = RemoteExtractor::new(url.clone())
            .context("Failed to build extraction service client")?;
        info!("Using remote extraction service at {url}");
        return Ok(Arc::new(remote));
    }

    let vocabulary = DEFAULT_SKILL_KEYWORDS
        .iter()
        .copied()
        .chain(
            catalog
                .domains()
                .iter()
                .flat_map(|d| d.required.iter().map(String::as_str)),
        );
    let matcher = SkillMatcher::new(vocabulary).context("Failed to compile skill vocabulary")?;
    info!("Skill vocabulary: {} terms", matcher.len());
    Ok(Arc::new(PdfResumeExtractor::new(matcher)))
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "skillgap-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
