//! The fixed shape every recommendation is forced into, and its placeholder scores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::llm_client::schema::{FieldSpec, MergedRecord};

pub const RATIONALE_PLACEHOLDER: &str = "No rationale was provided for these recommendations.";

pub const RECOMMENDATION_SCHEMA: [FieldSpec; 5] = [
    FieldSpec::list("recommended_careers"),
    FieldSpec::object("career_progression_path"),
    FieldSpec::object("skill_development_plan"),
    FieldSpec::object("market_trend_analysis"),
    FieldSpec::text("rationale", RATIONALE_PLACEHOLDER),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPayload {
    pub recommended_careers: Vec<Value>,
    pub career_progression_path: Map<String, Value>,
    pub skill_development_plan: Map<String, Value>,
    pub market_trend_analysis: Map<String, Value>,
    pub rationale: String,
}

impl From<MergedRecord> for RecommendationPayload {
    fn from(merged: MergedRecord) -> Self {
        Self {
            recommended_careers: merged.list("recommended_careers"),
            career_progression_path: merged.object("career_progression_path"),
            skill_development_plan: merged.object("skill_development_plan"),
            market_trend_analysis: merged.object("market_trend_analysis"),
            rationale: merged.text("rationale"),
        }
    }
}

/// Which path produced a stored recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedBy {
    Llm,
    Fallback,
}

impl GeneratedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratedBy::Llm => "llm",
            GeneratedBy::Fallback => "fallback",
        }
    }
}

/// Record-level scores. These are fixed weights, not computed from the user's data.
/// TODO: derive skill_match from the latest skill evaluation and interest_alignment from
/// interest assessment scores once interest results reach the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendationScores {
    pub skill_match: f64,
    pub interest_alignment: f64,
    pub overall: f64,
}

const SKILL_MATCH_WEIGHT: f64 = 0.6;
const INTEREST_ALIGNMENT_WEIGHT: f64 = 0.4;

impl RecommendationScores {
    pub fn placeholder() -> Self {
        let skill_match = 0.6;
        let interest_alignment = 0.4;
        Self {
            skill_match,
            interest_alignment,
            overall: SKILL_MATCH_WEIGHT * skill_match + INTEREST_ALIGNMENT_WEIGHT * interest_alignment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::schema::merge_with_defaults;
    use serde_json::json;

    #[test]
    fn test_placeholder_scores() {
        let scores = RecommendationScores::placeholder();
        assert_eq!(scores.skill_match, 0.6);
        assert_eq!(scores.interest_alignment, 0.4);
        assert!((scores.overall - 0.52).abs() < 1e-9);
    }

    #[test]
    fn test_payload_from_partial_response() {
        let raw = json!({
            "recommended_careers": {"title": "Data Analyst"},
            "career_progression_path": {"short_term": ["SQL"], "long_term": ["Lead"]},
            "market_trend_analysis": "Growing demand",
            "extra": 1
        });
        let merged = merge_with_defaults(raw.as_object().unwrap(), &RECOMMENDATION_SCHEMA);
        let payload = RecommendationPayload::from(merged);

        assert_eq!(payload.recommended_careers.len(), 1);
        assert!(payload.recommended_careers[0]
            .as_str()
            .unwrap()
            .contains("Data Analyst"));
        assert_eq!(payload.career_progression_path["long_term"], json!(["Lead"]));
        assert!(payload.skill_development_plan.is_empty());
        assert_eq!(payload.market_trend_analysis["summary"], "Growing demand");
        assert_eq!(payload.rationale, RATIONALE_PLACEHOLDER);
    }

    #[test]
    fn test_generated_by_labels() {
        assert_eq!(GeneratedBy::Llm.as_str(), "llm");
        assert_eq!(GeneratedBy::Fallback.as_str(), "fallback");
    }
}
