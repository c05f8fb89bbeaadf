//! Aptitude grading: a pluggable grader turning answers into category scores.
//!
//! Default: `AnswerKeyGrader` (percentage correct per category, deterministic).
//! Optional: `LlmAptitudeGrader` (LLM reads a transcript and scores each category,
//! falling back to the answer key on any failure).
//!
//! `AppState` holds an `Arc<dyn AptitudeGrader>`, chosen at startup via
//! `ENABLE_LLM_APTITUDE_GRADING`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::prompts::{APTITUDE_GRADING_PROMPT_TEMPLATE, APTITUDE_GRADING_SYSTEM};
use super::{numeric_value, zeroed, ScoreSet, APTITUDE_CATEGORIES};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{generate_json, TextGenerator};

const NOT_ANSWERED: &str = "Not answered";

/// One entry of the question metadata list submitted with an aptitude assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionMeta {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub correct: Value,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<Value>,
}

impl QuestionMeta {
    fn key(&self) -> Option<String> {
        match &self.id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn correct_index(&self) -> Option<i64> {
        integral(&self.correct)
    }

    fn option_text(&self, index: i64) -> Option<String> {
        let idx = usize::try_from(index).ok()?;
        self.options.get(idx).map(|o| match o {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// The grader trait. Implement this to swap grading backends without touching the
/// assessment handler.
#[async_trait]
pub trait AptitudeGrader: Send + Sync {
    /// Always returns all five aptitude categories.
    async fn grade(&self, answers: &Map<String, Value>, questions: &Value) -> ScoreSet;
}

/// Deterministic grader: percentage of correct answers per category.
pub struct AnswerKeyGrader;

#[async_trait]
impl AptitudeGrader for AnswerKeyGrader {
    async fn grade(&self, answers: &Map<String, Value>, questions: &Value) -> ScoreSet {
        score_aptitude(answers, questions)
    }
}

/// LLM-assisted grader. Any provider or parse failure degrades to `score_aptitude`.
pub struct LlmAptitudeGrader(pub Arc<dyn TextGenerator>);

#[async_trait]
impl AptitudeGrader for LlmAptitudeGrader {
    async fn grade(&self, answers: &Map<String, Value>, questions: &Value) -> ScoreSet {
        let llm = self.0.as_ref();
        let Some(metadata) = parse_questions(questions) else {
            return score_aptitude(answers, questions);
        };
        if !llm.is_configured() {
            info!("LLM unconfigured; grading aptitude with the answer key");
            return score_aptitude(answers, questions);
        }

        let transcript = build_transcript(answers, &metadata);
        let prompt = fill_template(APTITUDE_GRADING_PROMPT_TEMPLATE, &[("transcript", transcript.as_str())]);

        match generate_json::<BTreeMap<String, Value>>(llm, &prompt, APTITUDE_GRADING_SYSTEM).await
        {
            Ok(raw) => match normalize_ai_scores(&raw) {
                Some(scores) => scores,
                None => {
                    warn!("AI aptitude grading returned no usable categories; using answer key");
                    score_aptitude(answers, questions)
                }
            },
            Err(e) => {
                warn!("AI aptitude grading failed, using answer key: {e}");
                score_aptitude(answers, questions)
            }
        }
    }
}

/// Percentage-correct aptitude scoring.
///
/// Without a question list nothing can be graded and every category is 0. Answers
/// addressing unknown questions or categories are ignored.
pub fn score_aptitude(answers: &Map<String, Value>, questions: &Value) -> ScoreSet {
    let Some(metadata) = parse_questions(questions) else {
        return zeroed(&APTITUDE_CATEGORIES);
    };

    let by_id: HashMap<String, &QuestionMeta> = metadata
        .iter()
        .filter_map(|q| q.key().map(|k| (k, q)))
        .collect();

    let mut answered: HashMap<&str, u32> = HashMap::new();
    let mut correct: HashMap<&str, u32> = HashMap::new();

    // One count per question even when both "1" and "q1" are submitted; the exact id wins.
    for question in by_id.values() {
        let Some(selected) = answer_for(answers, question) else {
            continue;
        };
        let Some(category) = question
            .category
            .as_deref()
            .and_then(|c| APTITUDE_CATEGORIES.iter().copied().find(|k| *k == c))
        else {
            continue;
        };

        *answered.entry(category).or_default() += 1;
        if let (Some(chosen), Some(expected)) = (selected_index(selected), question.correct_index()) {
            if chosen == expected {
                *correct.entry(category).or_default() += 1;
            }
        }
    }

    APTITUDE_CATEGORIES
        .iter()
        .map(|category| {
            let total = answered.get(category).copied().unwrap_or(0);
            let right = correct.get(category).copied().unwrap_or(0);
            let score = if total > 0 {
                round2(right as f64 / total as f64 * 100.0)
            } else {
                0.0
            };
            (category.to_string(), score)
        })
        .collect()
}

/// Parses the metadata list, skipping malformed entries. `None` when no list was given.
fn parse_questions(questions: &Value) -> Option<Vec<QuestionMeta>> {
    let list = questions.as_array()?;
    Some(
        list.iter()
            .filter_map(|q| serde_json::from_value::<QuestionMeta>(q.clone()).ok())
            .collect(),
    )
}

/// Answer keys address a question by its id, optionally prefixed with `q` ("q1" → 1).
/// The exact id takes precedence over a prefixed alias.
fn answer_for<'a>(answers: &'a Map<String, Value>, question: &QuestionMeta) -> Option<&'a Value> {
    let key = question.key()?;
    answers
        .get(&key)
        .or_else(|| answers.get(&format!("q{key}")))
        .or_else(|| answers.get(&format!("Q{key}")))
}

/// Integer reading of a submitted option: integers, integral floats truncated, and
/// integer strings. Anything else never matches a correct index.
fn selected_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn integral(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders every question with its correct answer and the candidate's answer.
pub fn build_transcript(answers: &Map<String, Value>, questions: &[QuestionMeta]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let correct_text = q
                .correct_index()
                .and_then(|idx| q.option_text(idx))
                .unwrap_or_else(|| "Unknown".to_string());
            let user_text = answer_for(answers, q)
                .and_then(selected_index)
                .and_then(|idx| q.option_text(idx))
                .unwrap_or_else(|| NOT_ANSWERED.to_string());

            format!(
                "{}. Category: {}\n   Question: {}\n   Correct answer: {}\n   User's answer: {}",
                i + 1,
                q.category.as_deref().unwrap_or("unknown"),
                q.question.as_deref().unwrap_or(""),
                correct_text,
                user_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keeps the five aptitude categories (clamped to 0–100) and zero-fills absent ones.
/// `None` when the response named none of them.
fn normalize_ai_scores(raw: &BTreeMap<String, Value>) -> Option<ScoreSet> {
    let mut scores = zeroed(&APTITUDE_CATEGORIES);
    let mut recognized = 0;

    for category in APTITUDE_CATEGORIES {
        if let Some(score) = raw.get(category).and_then(numeric_value) {
            scores.insert(category.to_string(), round2(score.clamp(0.0, 100.0)));
            recognized += 1;
        }
    }

    (recognized > 0).then_some(scores)
}
