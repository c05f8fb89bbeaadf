use anyhow::Result;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::payload::{GeneratedBy, RecommendationPayload, RecommendationScores};
use crate::models::recommendation::CareerRecommendationRow;

pub struct NewRecommendation<'a> {
    pub user_id: Uuid,
    pub payload: &'a RecommendationPayload,
    pub scores: RecommendationScores,
    pub generated_by: GeneratedBy,
}

pub async fn insert_recommendation(
    pool: &PgPool,
    params: NewRecommendation<'_>,
) -> Result<CareerRecommendationRow> {
    let payload = params.payload;

    Ok(sqlx::query_as::<_, CareerRecommendationRow>(
        r#"
        INSERT INTO career_recommendations
            (id, user_id, recommended_careers, skill_match_score, interest_alignment_score,
             overall_recommendation_score, career_progression_path, skill_development_plan,
             market_trend_analysis, rationale, generated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.user_id)
    .bind(Value::Array(payload.recommended_careers.clone()))
    .bind(params.scores.skill_match)
    .bind(params.scores.interest_alignment)
    .bind(params.scores.overall)
    .bind(Value::Object(payload.career_progression_path.clone()))
    .bind(Value::Object(payload.skill_development_plan.clone()))
    .bind(Value::Object(payload.market_trend_analysis.clone()))
    .bind(&payload.rationale)
    .bind(params.generated_by.as_str())
    .fetch_one(pool)
    .await?)
}

/// All of a user's recommendations, newest first.
pub async fn list_recommendations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CareerRecommendationRow>> {
    Ok(sqlx::query_as::<_, CareerRecommendationRow>(
        "SELECT * FROM career_recommendations WHERE user_id = $1 ORDER BY generated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}
