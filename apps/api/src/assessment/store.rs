use anyhow::Result;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{AssessmentType, ScoreSet};
use crate::models::assessment::AssessmentRow;

/// Parameters for persisting a scored assessment.
pub struct NewAssessment<'a> {
    pub user_id: Uuid,
    pub assessment_type: AssessmentType,
    pub questions: &'a Value,
    pub answers: &'a Value,
    pub scores: &'a ScoreSet,
    pub total_score: f64,
}

pub async fn insert_assessment(pool: &PgPool, params: NewAssessment<'_>) -> Result<AssessmentRow> {
    let scores = serde_json::to_value(params.scores)?;

    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments
            (id, user_id, assessment_type, questions, answers, scores, total_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.user_id)
    .bind(params.assessment_type.as_str())
    .bind(params.questions)
    .bind(params.answers)
    .bind(&scores)
    .bind(params.total_score)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored {} assessment {} for user {}",
        row.assessment_type, row.id, row.user_id
    );
    Ok(row)
}

/// Fetches one assessment, scoped to its owner.
pub async fn get_assessment(
    pool: &PgPool,
    assessment_id: Uuid,
    user_id: Uuid,
) -> Result<Option<AssessmentRow>> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE id = $1 AND user_id = $2",
    )
    .bind(assessment_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// All of a user's assessments, newest first.
pub async fn list_assessments(pool: &PgPool, user_id: Uuid) -> Result<Vec<AssessmentRow>> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY completed_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// The user's most recent assessment of any type.
pub async fn latest_assessment(pool: &PgPool, user_id: Uuid) -> Result<Option<AssessmentRow>> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY completed_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}
