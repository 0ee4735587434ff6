use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded gap report. Append-only history per student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub resume_id: Uuid,
    pub domain: String,
    pub missing_skills: Vec<String>,
    pub suggested_courses: Vec<String>,
    pub created_at: DateTime<Utc>,
}
