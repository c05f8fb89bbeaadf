use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillEvaluationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub technical_skills: Value,
    pub soft_skills: Value,
    pub industry_skills: Value,
    /// Serialized `SkillGapAnalysis`.
    pub skill_gaps: Value,
    pub overall_score: f64,
    pub evaluated_at: DateTime<Utc>,
}
