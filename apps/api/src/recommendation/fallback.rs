//! Static recommendation served when the provider is unavailable or unusable.

use serde_json::{json, Map, Value};

use super::payload::RecommendationPayload;
use crate::assessment::{ScoreSet, APTITUDE_CATEGORIES, INTEREST_DOMAINS};

const DEFAULT_APTITUDE: &str = "logical_reasoning";
const DEFAULT_INTEREST: &str = "technology";

pub fn fallback_recommendations(
    aptitude_scores: &ScoreSet,
    interest_scores: &ScoreSet,
) -> RecommendationPayload {
    let top_aptitude = top_category(aptitude_scores, &APTITUDE_CATEGORIES, DEFAULT_APTITUDE);
    let top_interest = top_category(interest_scores, &INTEREST_DOMAINS, DEFAULT_INTEREST);

    RecommendationPayload {
        recommended_careers: vec![json!({
            "title": "Software Developer",
            "industry": "Technology",
            "skill_match_score": 0.8,
            "interest_alignment_score": 0.75,
            "overall_score": 0.78,
            "description": "Develop and maintain software applications",
            "required_skills": ["Programming", "Problem Solving", "Communication"],
            "growth_potential": "High",
            "salary_range": "$60,000 - $120,000"
        })],
        career_progression_path: object(json!({
            "short_term": ["Complete relevant certifications", "Build portfolio projects"],
            "long_term": ["Senior Developer", "Tech Lead", "Engineering Manager"]
        })),
        skill_development_plan: object(json!({
            "priority_skills": ["Programming Languages", "System Design", "Leadership"],
            "learning_resources": ["Online courses", "Bootcamps", "Mentorship"],
            "timeline": "6-12 months"
        })),
        market_trend_analysis: object(json!({
            "industry_trends": ["AI/ML", "Cloud Computing", "Cybersecurity"],
            "demand_forecast": "High",
            "emerging_roles": ["AI Engineer", "DevOps Engineer", "Data Scientist"]
        })),
        rationale: format!(
            "Based on your strong {top_aptitude} abilities and interest in {top_interest}, \
             software development appears to be a suitable career path."
        ),
    }
}

/// Highest-scoring category. Ties go to the category listed first in `order`, then to
/// keys outside `order` alphabetically; an empty set yields `default`.
fn top_category<'a>(scores: &'a ScoreSet, order: &[&str], default: &'a str) -> &'a str {
    let rank = |name: &str| order.iter().position(|c| *c == name).unwrap_or(order.len());

    let mut best: Option<(&'a str, f64)> = None;
    for (name, &score) in scores {
        let better = match best {
            None => true,
            Some((best_name, best_score)) => {
                score > best_score || (score == best_score && rank(name) < rank(best_name))
            }
        };
        if better {
            best = Some((name.as_str(), score));
        }
    }
    best.map(|(name, _)| name).unwrap_or(default)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, f64)]) -> ScoreSet {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_scores_use_defaults() {
        let payload = fallback_recommendations(&ScoreSet::new(), &ScoreSet::new());
        assert!(payload.rationale.contains("logical_reasoning"));
        assert!(payload.rationale.contains("technology"));
        assert_eq!(payload.recommended_careers.len(), 1);
        assert_eq!(payload.recommended_careers[0]["title"], "Software Developer");
        assert_eq!(payload.skill_development_plan["timeline"], "6-12 months");
    }

    #[test]
    fn test_rationale_names_top_categories() {
        let aptitude = scores(&[("verbal_ability", 80.0), ("numerical_ability", 40.0)]);
        let interest = scores(&[("arts", 7.0), ("science", 3.0)]);
        let payload = fallback_recommendations(&aptitude, &interest);
        assert!(payload.rationale.contains("strong verbal_ability abilities"));
        assert!(payload.rationale.contains("interest in arts"));
    }

    #[test]
    fn test_ties_follow_canonical_order() {
        let zeros = crate::assessment::zeroed(&APTITUDE_CATEGORIES);
        assert_eq!(
            top_category(&zeros, &APTITUDE_CATEGORIES, DEFAULT_APTITUDE),
            "logical_reasoning"
        );
        let tied = scores(&[("spatial_reasoning", 50.0), ("verbal_ability", 50.0)]);
        assert_eq!(
            top_category(&tied, &APTITUDE_CATEGORIES, DEFAULT_APTITUDE),
            "verbal_ability"
        );
    }
}
