// Assessment scoring: aptitude grading, interest/personality accumulation,
// AI question generation, and the persisted assessment records.

pub mod accumulate;
pub mod aptitude;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod scoring;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category name → score. Always holds every category of its assessment type.
pub type ScoreSet = BTreeMap<String, f64>;

pub const APTITUDE_CATEGORIES: [&str; 5] = [
    "logical_reasoning",
    "verbal_ability",
    "numerical_ability",
    "spatial_reasoning",
    "analytical_thinking",
];

pub const INTEREST_DOMAINS: [&str; 8] = [
    "technology",
    "business",
    "healthcare",
    "education",
    "arts",
    "science",
    "engineering",
    "social_work",
];

pub const BIG_FIVE_TRAITS: [&str; 5] = [
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    Aptitude,
    Interest,
    Personality,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::Aptitude => "aptitude",
            AssessmentType::Interest => "interest",
            AssessmentType::Personality => "personality",
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            AssessmentType::Aptitude => &APTITUDE_CATEGORIES,
            AssessmentType::Interest => &INTEREST_DOMAINS,
            AssessmentType::Personality => &BIG_FIVE_TRAITS,
        }
    }
}

/// A score set with every listed category at 0.
pub fn zeroed(categories: &[&str]) -> ScoreSet {
    categories.iter().map(|c| (c.to_string(), 0.0)).collect()
}

/// Reads a persisted score object back into a `ScoreSet`, skipping non-numeric entries.
pub fn score_set_from_value(value: &Value) -> ScoreSet {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                .collect()
        })
        .unwrap_or_default()
}

/// Numeric reading of a loosely-typed answer value: JSON numbers and numeric strings.
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assessment_type_serde_snake_case() {
        let t: AssessmentType = serde_json::from_str(r#""personality""#).unwrap();
        assert_eq!(t, AssessmentType::Personality);
        assert_eq!(serde_json::to_string(&AssessmentType::Aptitude).unwrap(), r#""aptitude""#);
    }

    #[test]
    fn test_unknown_assessment_type_is_rejected() {
        assert!(serde_json::from_str::<AssessmentType>(r#""astrology""#).is_err());
    }

    #[test]
    fn test_category_counts() {
        assert_eq!(AssessmentType::Aptitude.categories().len(), 5);
        assert_eq!(AssessmentType::Interest.categories().len(), 8);
        assert_eq!(AssessmentType::Personality.categories().len(), 5);
    }

    #[test]
    fn test_score_set_from_value_skips_non_numeric() {
        let scores = score_set_from_value(&json!({"verbal_ability": 50.0, "note": "x"}));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores["verbal_ability"], 50.0);
        assert!(score_set_from_value(&json!(null)).is_empty());
    }

    #[test]
    fn test_numeric_value_accepts_numeric_strings() {
        assert_eq!(numeric_value(&json!(3)), Some(3.0));
        assert_eq!(numeric_value(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(numeric_value(&json!("high")), None);
        assert_eq!(numeric_value(&json!(true)), None);
    }
}
