use serde_json::{Map, Value};

use super::accumulate::{score_interest, score_personality};
use super::aptitude::AptitudeGrader;
use super::{AssessmentType, ScoreSet};

/// Scores a submission according to its assessment type.
pub async fn calculate_scores(
    grader: &dyn AptitudeGrader,
    assessment_type: AssessmentType,
    answers: &Map<String, Value>,
    questions: &Value,
) -> ScoreSet {
    match assessment_type {
        AssessmentType::Aptitude => grader.grade(answers, questions).await,
        AssessmentType::Interest => score_interest(answers),
        AssessmentType::Personality => score_personality(answers),
    }
}

/// Mean of all category scores; 0 for an empty set.
pub fn total_score(scores: &ScoreSet) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.values().sum::<f64>() / scores.len() as f64
}
