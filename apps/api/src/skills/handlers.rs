use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::gap_analysis::{analyze_skill_gaps, overall_score, SkillLevels};
use super::role_gaps::{analyze_role_gaps, RoleGapReport};
use super::store::{insert_evaluation, NewSkillEvaluation};
use crate::errors::AppError;
use crate::models::skill_evaluation::SkillEvaluationRow;
use crate::state::AppState;
use crate::users::store::require_user;

#[derive(Debug, Deserialize)]
pub struct SkillLevelsRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub technical_skills: Value,
    #[serde(default)]
    pub soft_skills: Value,
    #[serde(default)]
    pub industry_skills: Value,
}

impl SkillLevelsRequest {
    /// Replaces omitted or non-object groups with `{}` so stored evaluations always hold
    /// skill → level objects.
    fn normalized(mut self) -> Self {
        for group in [
            &mut self.technical_skills,
            &mut self.soft_skills,
            &mut self.industry_skills,
        ] {
            if !group.is_object() {
                *group = json!({});
            }
        }
        self
    }

    fn levels(&self) -> SkillLevels<'_> {
        SkillLevels {
            technical: &self.technical_skills,
            soft: &self.soft_skills,
            industry: &self.industry_skills,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoleGapRequest {
    #[serde(default)]
    pub current_skills: Value,
    pub target_role: String,
}

/// POST /api/v1/skills/evaluate
pub async fn handle_evaluate_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillLevelsRequest>,
) -> Result<(StatusCode, Json<SkillEvaluationRow>), AppError> {
    let req = req.normalized();
    require_user(&state.db, req.user_id).await?;

    let levels = req.levels();
    let gaps = analyze_skill_gaps(levels);
    let row = insert_evaluation(
        &state.db,
        NewSkillEvaluation {
            user_id: req.user_id,
            technical_skills: &req.technical_skills,
            soft_skills: &req.soft_skills,
            industry_skills: &req.industry_skills,
            skill_gaps: &gaps,
            overall_score: overall_score(levels),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/v1/skills/role-gaps
pub async fn handle_role_gaps(
    State(state): State<AppState>,
    Json(req): Json<RoleGapRequest>,
) -> Result<Json<RoleGapReport>, AppError> {
    let target_role = req.target_role.trim();
    if target_role.is_empty() {
        return Err(AppError::Validation("target_role cannot be empty".to_string()));
    }
    Ok(Json(
        analyze_role_gaps(state.llm.as_ref(), &req.current_skills, target_role).await,
    ))
}
