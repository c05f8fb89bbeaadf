//! AI question generation for the assessment front-end.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::prompts::{QUESTION_GENERATION_PROMPT_TEMPLATE, QUESTION_GENERATION_SYSTEM};
use super::AssessmentType;
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{generate_json, TextGenerator};

pub const QUESTION_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    /// `None` for subjective questions (interest / personality).
    #[serde(default)]
    pub correct: Option<usize>,
    pub category: String,
}

/// Asks the LLM for a fresh question set. Malformed elements are dropped; an empty
/// result is an error because the client has nothing to render.
pub async fn generate_questions(
    llm: &dyn TextGenerator,
    assessment_type: AssessmentType,
) -> Result<Vec<GeneratedQuestion>, AppError> {
    let prompt = fill_template(
        QUESTION_GENERATION_PROMPT_TEMPLATE,
        &[
            ("count", QUESTION_COUNT.to_string().as_str()),
            ("assessment_type", assessment_type.as_str()),
            ("categories", assessment_type.categories().join(", ").as_str()),
        ],
    );

    let raw: Value = generate_json(llm, &prompt, QUESTION_GENERATION_SYSTEM)
        .await
        .map_err(|e| {
            warn!("Question generation failed: {e}");
            AppError::Llm("Failed to load questions. Please try again.".to_string())
        })?;

    let questions = sanitize_questions(&raw);
    if questions.is_empty() {
        return Err(AppError::Llm(
            "Failed to load questions. Please try again.".to_string(),
        ));
    }

    info!(
        "Generated {} {} questions",
        questions.len(),
        assessment_type.as_str()
    );
    Ok(questions)
}

/// Accepts a bare array or `{"questions": [...]}` and keeps renderable questions only.
fn sanitize_questions(raw: &Value) -> Vec<GeneratedQuestion> {
    let items = raw
        .as_array()
        .or_else(|| raw.get("questions").and_then(Value::as_array));

    items
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<GeneratedQuestion>(item.clone()).ok())
                .filter(|q| !q.question.trim().is_empty() && q.options.len() >= 2)
                .filter(|q| q.correct.map_or(true, |c| c < q.options.len()))
                .take(QUESTION_COUNT)
                .collect()
        })
        .unwrap_or_default()
}
