use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub university: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<f64>,
    pub career_goal: Option<String>,
    pub created_at: DateTime<Utc>,
}
