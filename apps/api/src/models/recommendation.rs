use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerRecommendationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recommended_careers: Value,
    pub skill_match_score: f64,
    pub interest_alignment_score: f64,
    pub overall_recommendation_score: f64,
    pub career_progression_path: Value,
    pub skill_development_plan: Value,
    pub market_trend_analysis: Value,
    pub rationale: String,
    /// "llm" | "fallback"
    pub generated_by: String,
    pub generated_at: DateTime<Utc>,
}
