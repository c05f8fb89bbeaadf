use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessment_type: String,
    pub questions: Value,
    pub answers: Value,
    /// Category → score object; every category of the assessment type is present.
    pub scores: Value,
    pub total_score: f64,
    pub completed_at: DateTime<Utc>,
}
