//! Recommendation Aggregator: gathers the user's latest records into one prompt,
//! asks the LLM for the fixed-shape payload, and substitutes the static fallback on
//! any failure.
//!
//! Flow: require_user → latest assessment → latest skill evaluation → build_prompt →
//!       LLM generate → merge_with_defaults → persist → return row.

use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::fallback::fallback_recommendations;
use super::payload::{
    GeneratedBy, RecommendationPayload, RecommendationScores, RECOMMENDATION_SCHEMA,
};
use super::prompts::RECOMMENDATION_PROMPT_TEMPLATE;
use super::store::{insert_recommendation, NewRecommendation};
use crate::assessment::store::latest_assessment;
use crate::assessment::{score_set_from_value, ScoreSet};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM, NOT_SPECIFIED};
use crate::llm_client::schema::merge_with_defaults;
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::assessment::AssessmentRow;
use crate::models::recommendation::CareerRecommendationRow;
use crate::models::skill_evaluation::SkillEvaluationRow;
use crate::models::user::UserRow;
use crate::skills::store::latest_evaluation;
use crate::users::store::require_user;

// ────────────────────────────────────────────────────────────────────────────
// Context
// ────────────────────────────────────────────────────────────────────────────

/// Everything the prompt is built from.
#[derive(Debug, Clone)]
pub struct RecommendationContext {
    pub age_range: Option<String>,
    pub current_job_role: Option<String>,
    pub industry: Option<String>,
    pub educational_background: Option<String>,
    pub years_of_experience: Option<i32>,
    /// Scores of the most recent assessment, whatever its type.
    pub aptitude_scores: ScoreSet,
    /// Always empty: interest results are not yet routed here.
    pub interest_scores: ScoreSet,
    /// `{technical_skills, soft_skills, industry_skills}`, each `{}` when absent.
    pub skill_evaluation: Value,
}

impl RecommendationContext {
    pub fn from_records(
        user: &UserRow,
        assessment: Option<&AssessmentRow>,
        evaluation: Option<&SkillEvaluationRow>,
    ) -> Self {
        let skill_group = |group: Option<&Value>| {
            group
                .filter(|v| v.is_object())
                .cloned()
                .unwrap_or_else(|| json!({}))
        };

        Self {
            age_range: user.age_range.clone(),
            current_job_role: user.current_job_role.clone(),
            industry: user.industry.clone(),
            educational_background: user.educational_background.clone(),
            years_of_experience: user.years_of_experience,
            aptitude_scores: assessment
                .map(|a| score_set_from_value(&a.scores))
                .unwrap_or_default(),
            interest_scores: ScoreSet::new(),
            skill_evaluation: json!({
                "technical_skills": skill_group(evaluation.map(|e| &e.technical_skills)),
                "soft_skills": skill_group(evaluation.map(|e| &e.soft_skills)),
                "industry_skills": skill_group(evaluation.map(|e| &e.industry_skills)),
            }),
        }
    }

    fn profile_lines(&self) -> String {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string());
        format!(
            "- Age Range: {}\n- Current Role: {}\n- Industry: {}\n- Education: {}\n- Experience: {} years",
            field(&self.age_range),
            field(&self.current_job_role),
            field(&self.industry),
            field(&self.educational_background),
            self.years_of_experience.unwrap_or(0),
        )
    }
}

pub fn build_prompt(ctx: &RecommendationContext) -> String {
    fill_template(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("profile", ctx.profile_lines().as_str()),
            ("aptitude_scores", pretty(&ctx.aptitude_scores).as_str()),
            ("interest_scores", pretty(&ctx.interest_scores).as_str()),
            ("skill_evaluation", pretty(&ctx.skill_evaluation).as_str()),
        ],
    )
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Never fails. Anything short of a JSON object from a configured provider yields the
/// static fallback.
pub async fn generate_career_recommendations(
    llm: &dyn TextGenerator,
    ctx: &RecommendationContext,
) -> (RecommendationPayload, GeneratedBy) {
    let fallback = || {
        (
            fallback_recommendations(&ctx.aptitude_scores, &ctx.interest_scores),
            GeneratedBy::Fallback,
        )
    };

    if !llm.is_configured() {
        info!("LLM unconfigured; serving fallback recommendations");
        return fallback();
    }

    match generate_json::<Value>(llm, &build_prompt(ctx), JSON_ONLY_SYSTEM).await {
        Ok(Value::Object(raw)) => {
            let merged = merge_with_defaults(&raw, &RECOMMENDATION_SCHEMA);
            if !merged.repaired.is_empty() {
                warn!("Recommendation response repaired fields: {:?}", merged.repaired);
            }
            (RecommendationPayload::from(merged), GeneratedBy::Llm)
        }
        Ok(_) => {
            warn!("Recommendation response was not a JSON object; using fallback");
            fallback()
        }
        Err(e) => {
            warn!("Recommendation generation failed, using fallback: {e}");
            fallback()
        }
    }
}

/// Full pipeline for one user. Only a missing user (or a database failure) is an error.
pub async fn generate_for_user(
    pool: &PgPool,
    llm: &dyn TextGenerator,
    user_id: Uuid,
) -> Result<CareerRecommendationRow, AppError> {
    let user = require_user(pool, user_id).await?;
    let assessment = latest_assessment(pool, user_id).await?;
    let evaluation = latest_evaluation(pool, user_id).await?;

    let ctx = RecommendationContext::from_records(&user, assessment.as_ref(), evaluation.as_ref());
    let (payload, generated_by) = generate_career_recommendations(llm, &ctx).await;
    let scores = RecommendationScores::placeholder();

    let row = insert_recommendation(
        pool,
        NewRecommendation {
            user_id,
            payload: &payload,
            scores,
            generated_by,
        },
    )
    .await?;

    info!(
        "Generated {} recommendation {} for user {user_id}",
        generated_by.as_str(),
        row.id
    );
    Ok(row)
}
