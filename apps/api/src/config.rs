use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub port: u16,
    pub rust_log: String,
    /// TOML domain catalog; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// External extraction service; the local PDF extractor is used when unset.
    pub extraction_service_url: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            extraction_service_url: optional_env("EXTRACTION_SERVICE_URL"),
            max_upload_bytes: parse_upload_limit(optional_env("MAX_UPLOAD_BYTES").as_deref())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_upload_limit(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_UPLOAD_BYTES);
    };
    let limit = raw
        .parse::<usize>()
        .context("MAX_UPLOAD_BYTES must be a positive integer")?;
    anyhow::ensure!(limit > 0, "MAX_UPLOAD_BYTES must be greater than zero");
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_limit_default() {
        assert_eq!(parse_upload_limit(None).unwrap(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_upload_limit_parsed() {
        assert_eq!(parse_upload_limit(Some("2048")).unwrap(), 2048);
    }

    #[test]
    fn test_upload_limit_rejects_zero_and_garbage() {
        assert!(parse_upload_limit(Some("0")).is_err());
        assert!(parse_upload_limit(Some("ten megs")).is_err());
        assert!(parse_upload_limit(Some("-1")).is_err());
    }
}
