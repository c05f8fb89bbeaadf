use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub age_range: Option<String>,
    pub current_job_role: Option<String>,
    pub industry: Option<String>,
    pub educational_background: Option<String>,
    pub years_of_experience: Option<i32>,
    pub created_at: DateTime<Utc>,
}
