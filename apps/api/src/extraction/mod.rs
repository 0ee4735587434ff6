//! Resume extraction — raw document bytes in, structured resume fields out.
//!
//! `AppState` carries an `Arc<dyn ResumeExtractor>` chosen at startup:
//! `PdfResumeExtractor` (local, default) or `RemoteExtractor` when
//! `EXTRACTION_SERVICE_URL` is set. Uploads go through `extract_or_degrade`, so
//! callers never see a missing skill list: on failure they get
//! `ExtractedResume::default()` and status `Failed`.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::analysis::normalize::SkillSet;
use crate::models::resume::ExtractionStatus;

pub mod heuristics;
pub mod pdf;
pub mod remote;

pub use pdf::PdfResumeExtractor;
pub use remote::RemoteExtractor;

/// Stored excerpts never exceed this many characters, whichever backend produced them.
pub const EXCERPT_CHARS: usize = 500;

pub fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

/// Fields detected in a resume. Every field may be absent; an empty skill list is a
/// valid (degenerate) input to gap analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResume {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "mobile_number")]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, alias = "raw_text")]
    pub text_excerpt: Option<String>,
}

impl ExtractedResume {
    pub fn skill_set(&self) -> SkillSet {
        self.skills.iter().collect()
    }

    /// Clamps the text excerpt to `EXCERPT_CHARS`. Remote services may send the whole text.
    pub fn bounded(mut self) -> Self {
        self.text_excerpt = self.text_excerpt.take().map(|text| {
            if text.chars().count() > EXCERPT_CHARS {
                excerpt(&text)
            } else {
                text
            }
        });
        self
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Uploaded document is empty")]
    EmptyDocument,

    #[error("No text could be extracted from the document")]
    NoText,

    #[error("Unsupported document: {0}")]
    Unsupported(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Extraction task failed: {0}")]
    Task(String),

    #[error("Extraction service HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Extraction service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Extraction service returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Implement this to swap extraction backends without touching the upload handler.
#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(
        &self,
        document: Bytes,
        file_name: &str,
    ) -> Result<ExtractedResume, ExtractionError>;

    /// Short label recorded in logs: "pdf" | "remote".
    fn backend(&self) -> &'static str;
}

/// What gets persisted for one upload, success or not.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub resume: ExtractedResume,
    pub status: ExtractionStatus,
    pub error: Option<String>,
}

/// Runs `extractor` and never fails: an error becomes an empty record with status
/// `Failed` and the error message kept for storage.
pub async fn extract_or_degrade(
    extractor: &dyn ResumeExtractor,
    document: Bytes,
    file_name: &str,
) -> ExtractionOutcome {
    match extractor.extract(document, file_name).await {
        Ok(resume) => ExtractionOutcome {
            resume: resume.bounded(),
            status: ExtractionStatus::Parsed,
            error: None,
        },
        Err(e) => {
            warn!(
                "Extraction ({}) failed for '{file_name}': {e}",
                extractor.backend()
            );
            ExtractionOutcome {
                resume: ExtractedResume::default(),
                status: ExtractionStatus::Failed,
                error: Some(e.to_string()),
            }
        }
    }
}
