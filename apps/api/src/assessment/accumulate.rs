//! Interest and personality scoring: unbounded running sums per category.
//!
//! Each answer may be a mapping of category → contribution. Non-mapping answers,
//! unknown categories and non-numeric contributions are skipped.

use serde_json::{Map, Value};

use super::{numeric_value, zeroed, ScoreSet, BIG_FIVE_TRAITS, INTEREST_DOMAINS};

pub fn score_interest(answers: &Map<String, Value>) -> ScoreSet {
    accumulate(answers, &INTEREST_DOMAINS)
}

pub fn score_personality(answers: &Map<String, Value>) -> ScoreSet {
    accumulate(answers, &BIG_FIVE_TRAITS)
}

fn accumulate(answers: &Map<String, Value>, categories: &[&str]) -> ScoreSet {
    let mut scores = zeroed(categories);

    for contributions in answers.values().filter_map(Value::as_object) {
        for (category, contribution) in contributions {
            let Some(total) = scores.get_mut(category.as_str()) else {
                continue;
            };
            if let Some(n) = numeric_value(contribution) {
                *total += n;
            }
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answers(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_interest_sums_across_answers() {
        let scores = score_interest(&answers(json!({
            "1": {"technology": 3, "arts": 1},
            "2": {"technology": 2.5},
            "3": {"social_work": "4"}
        })));
        assert_eq!(scores["technology"], 5.5);
        assert_eq!(scores["arts"], 1.0);
        assert_eq!(scores["social_work"], 4.0);
        assert_eq!(scores["business"], 0.0);
        assert_eq!(scores.len(), 8);
    }

    #[test]
    fn test_non_mapping_answers_contribute_nothing() {
        let scores = score_personality(&answers(json!({"1": 5, "2": "openness", "3": [1, 2]})));
        assert!(scores.values().all(|v| *v == 0.0));
        assert_eq!(scores.len(), 5);
    }

    #[test]
    fn test_unknown_traits_and_bad_values_are_skipped() {
        let scores = score_personality(&answers(json!({
            "1": {"openness": 2, "charisma": 10, "neuroticism": "very"}
        })));
        assert_eq!(scores["openness"], 2.0);
        assert_eq!(scores["neuroticism"], 0.0);
        assert!(!scores.contains_key("charisma"));
    }

    #[test]
    fn test_sums_are_not_normalized() {
        let scores = score_interest(&answers(json!({
            "1": {"science": 60}, "2": {"science": 70}
        })));
        assert_eq!(scores["science"], 130.0);
    }

    #[test]
    fn test_negative_contributions_are_summed() {
        let scores = score_personality(&answers(json!({
            "1": {"extraversion": 3}, "2": {"extraversion": -1}
        })));
        assert_eq!(scores["extraversion"], 2.0);
    }
}
