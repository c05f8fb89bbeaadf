use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::questions::{generate_questions, GeneratedQuestion};
use super::scoring::{calculate_scores, total_score};
use super::store::{get_assessment, insert_assessment, list_assessments, NewAssessment};
use super::AssessmentType;
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;
use crate::users::store::require_user;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub user_id: Uuid,
    pub assessment_type: AssessmentType,
    #[serde(default)]
    pub questions: Value,
    #[serde(default)]
    pub answers: Value,
}

#[derive(Deserialize)]
pub struct QuestionRequest {
    pub assessment_type: AssessmentType,
}

#[derive(Serialize)]
pub struct QuestionSetResponse {
    pub assessment_type: AssessmentType,
    pub questions: Vec<GeneratedQuestion>,
}

/// Answers that are not a JSON object score as an empty submission.
fn answer_map(answers: &Value) -> Map<String, Value> {
    answers.as_object().cloned().unwrap_or_default()
}

/// POST /api/v1/assessments
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Result<(StatusCode, Json<AssessmentRow>), AppError> {
    require_user(&state.db, req.user_id).await?;

    let answers = answer_map(&req.answers);
    let scores = calculate_scores(
        state.aptitude_grader.as_ref(),
        req.assessment_type,
        &answers,
        &req.questions,
    )
    .await;

    let row = insert_assessment(
        &state.db,
        NewAssessment {
            user_id: req.user_id,
            assessment_type: req.assessment_type,
            questions: &req.questions,
            answers: &Value::Object(answers),
            scores: &scores,
            total_score: total_score(&scores),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    Ok(Json(list_assessments(&state.db, params.user_id).await?))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AssessmentRow>, AppError> {
    get_assessment(&state.db, id, params.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))
}

/// POST /api/v1/assessments/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<QuestionSetResponse>, AppError> {
    let questions = generate_questions(state.llm.as_ref(), req.assessment_type).await?;
    Ok(Json(QuestionSetResponse {
        assessment_type: req.assessment_type,
        questions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_defaults_missing_questions_and_answers() {
        let req: SubmitAssessmentRequest = serde_json::from_value(json!({
            "user_id": Uuid::nil(),
            "assessment_type": "interest"
        }))
        .unwrap();
        assert_eq!(req.assessment_type, AssessmentType::Interest);
        assert!(req.questions.is_null());
        assert!(answer_map(&req.answers).is_empty());
    }

    #[test]
    fn test_non_object_answers_become_empty() {
        assert!(answer_map(&json!([1, 2, 3])).is_empty());
        assert_eq!(answer_map(&json!({"q1": 0})).len(), 1);
    }

    #[test]
    fn test_unknown_assessment_type_fails_to_deserialize() {
        let result = serde_json::from_value::<SubmitAssessmentRequest>(json!({
            "user_id": Uuid::nil(),
            "assessment_type": "horoscope"
        }));
        assert!(result.is_err());
    }
}
