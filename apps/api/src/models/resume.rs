use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::normalize::SkillSet;

/// Outcome of the extraction step for one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Parsed,
    Failed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Parsed => "parsed",
            ExtractionStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown extraction status '{0}'")]
pub struct UnknownExtractionStatus(String);

impl TryFrom<String> for ExtractionStatus {
    type Error = UnknownExtractionStatus;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.as_str() {
            "parsed" => Ok(ExtractionStatus::Parsed),
            "failed" => Ok(ExtractionStatus::Failed),
            _ => Err(UnknownExtractionStatus(raw)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub file_name: String,
    pub s3_key: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    #[sqlx(try_from = "String")]
    pub extraction_status: ExtractionStatus,
    pub extraction_error: Option<String>,
    pub text_excerpt: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn skill_set(&self) -> SkillSet {
        self.skills.iter().collect()
    }
}
