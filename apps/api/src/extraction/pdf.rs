use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::extraction::heuristics::{extract_fields, SkillMatcher};
use crate::extraction::{ExtractedResume, ExtractionError, ResumeExtractor};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Local extractor: `pdf-extract` for the text, regex heuristics for the fields.
/// Plain UTF-8 uploads skip the PDF step.
pub struct PdfResumeExtractor {
    skills: Arc<SkillMatcher>,
}

impl PdfResumeExtractor {
    pub fn new(skills: SkillMatcher) -> Self {
        Self {
            skills: Arc::new(skills),
        }
    }
}

#[async_trait]
impl ResumeExtractor for PdfResumeExtractor {
    async fn extract(
        &self,
        document: Bytes,
        file_name: &str,
    ) -> Result<ExtractedResume, ExtractionError> {
        if document.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        // pdf-extract is CPU-bound and may panic on malformed input; the join
        // handle turns a panic into an ordinary error.
        let skills = Arc::clone(&self.skills);
        let fields = tokio::task::spawn_blocking(move || -> Result<ExtractedResume, ExtractionError> {
            let text = document_text(&document)?;
            if text.trim().is_empty() {
                return Err(ExtractionError::NoText);
            }
            Ok(extract_fields(&text, &skills))
        })
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))??;

        debug!(
            "Extracted {} skills from '{}' (name detected: {})",
            fields.skills.len(),
            file_name,
            fields.name.is_some()
        );
        Ok(fields)
    }

    fn backend(&self) -> &'static str {
        "pdf"
    }
}

fn document_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.starts_with(PDF_MAGIC) {
        return pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()));
    }
    String::from_utf8(bytes.to_vec()).map_err(|_| {
        ExtractionError::Unsupported("expected a PDF or UTF-8 text document".to_string())
    })
}
