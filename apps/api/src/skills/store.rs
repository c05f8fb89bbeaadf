use anyhow::Result;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::gap_analysis::SkillGapAnalysis;
use crate::models::skill_evaluation::SkillEvaluationRow;

pub struct NewSkillEvaluation<'a> {
    pub user_id: Uuid,
    pub technical_skills: &'a Value,
    pub soft_skills: &'a Value,
    pub industry_skills: &'a Value,
    pub skill_gaps: &'a SkillGapAnalysis,
    pub overall_score: f64,
}

pub async fn insert_evaluation(
    pool: &PgPool,
    params: NewSkillEvaluation<'_>,
) -> Result<SkillEvaluationRow> {
    let skill_gaps = serde_json::to_value(params.skill_gaps)?;

    let row = sqlx::query_as::<_, SkillEvaluationRow>(
        r#"
        INSERT INTO skill_evaluations
            (id, user_id, technical_skills, soft_skills, industry_skills, skill_gaps, overall_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.user_id)
    .bind(params.technical_skills)
    .bind(params.soft_skills)
    .bind(params.industry_skills)
    .bind(&skill_gaps)
    .bind(params.overall_score)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored skill evaluation {} for user {} ({} priority gaps)",
        row.id,
        row.user_id,
        params.skill_gaps.priority_skills.len()
    );
    Ok(row)
}

/// The user's most recent skill evaluation.
pub async fn latest_evaluation(pool: &PgPool, user_id: Uuid) -> Result<Option<SkillEvaluationRow>> {
    Ok(sqlx::query_as::<_, SkillEvaluationRow>(
        "SELECT * FROM skill_evaluations WHERE user_id = $1 ORDER BY evaluated_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}
