//! Threshold-based skill gap detection over 1-5 self-ratings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Levels strictly below this are gaps.
pub const GAP_THRESHOLD: f64 = 3.0;
pub const TARGET_LEVEL: f64 = 4.0;
pub const PRIORITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapRecord {
    pub skill: String,
    pub current_level: f64,
    pub target_level: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGapAnalysis {
    pub technical_gaps: Vec<SkillGapRecord>,
    pub soft_skill_gaps: Vec<SkillGapRecord>,
    pub industry_gaps: Vec<SkillGapRecord>,
    /// Largest gaps first, at most `PRIORITY_LIMIT`.
    pub priority_skills: Vec<SkillGapRecord>,
}

/// Self-ratings grouped by category. Each field should be a skill → level object;
/// anything else is treated as empty.
#[derive(Debug, Clone, Copy)]
pub struct SkillLevels<'a> {
    pub technical: &'a Value,
    pub soft: &'a Value,
    pub industry: &'a Value,
}

impl<'a> SkillLevels<'a> {
    fn groups(&self) -> [&'a Value; 3] {
        [self.technical, self.soft, self.industry]
    }
}

pub fn analyze_skill_gaps(levels: SkillLevels<'_>) -> SkillGapAnalysis {
    let technical_gaps = gaps_in(levels.technical);
    let soft_skill_gaps = gaps_in(levels.soft);
    let industry_gaps = gaps_in(levels.industry);

    let mut priority_skills: Vec<SkillGapRecord> = technical_gaps
        .iter()
        .chain(&soft_skill_gaps)
        .chain(&industry_gaps)
        .cloned()
        .collect();
    // sort_by is stable: equal gaps keep technical, soft, industry order
    priority_skills.sort_by(|a, b| b.gap.total_cmp(&a.gap));
    priority_skills.truncate(PRIORITY_LIMIT);

    SkillGapAnalysis {
        technical_gaps,
        soft_skill_gaps,
        industry_gaps,
        priority_skills,
    }
}

/// Mean of every numeric level across the three groups; 0 when there are none.
pub fn overall_score(levels: SkillLevels<'_>) -> f64 {
    let numeric: Vec<f64> = levels
        .groups()
        .into_iter()
        .flat_map(entries)
        .map(|(_, level)| level)
        .collect();

    if numeric.is_empty() {
        return 0.0;
    }
    numeric.iter().sum::<f64>() / numeric.len() as f64
}

fn gaps_in(group: &Value) -> Vec<SkillGapRecord> {
    entries(group)
        .filter(|(_, level)| *level < GAP_THRESHOLD)
        .map(|(skill, level)| SkillGapRecord {
            skill: skill.to_string(),
            current_level: level,
            target_level: TARGET_LEVEL,
            gap: TARGET_LEVEL - level,
        })
        .collect()
}

/// Numeric entries of a skill group. Strings, booleans and nested values are skipped.
fn entries(group: &Value) -> impl Iterator<Item = (&str, f64)> {
    group
        .as_object()
        .into_iter()
        .flatten()
        .filter_map(|(skill, level)| level.as_f64().map(|l| (skill.as_str(), l)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn levels<'a>(technical: &'a Value, soft: &'a Value, industry: &'a Value) -> SkillLevels<'a> {
        SkillLevels { technical, soft, industry }
    }

    #[test]
    fn test_single_low_skill_yields_one_gap() {
        let (t, s, i) = (json!({"python": 2}), json!({"comm": 4}), json!({}));
        let analysis = analyze_skill_gaps(levels(&t, &s, &i));

        let expected = SkillGapRecord {
            skill: "python".to_string(),
            current_level: 2.0,
            target_level: 4.0,
            gap: 2.0,
        };
        assert_eq!(analysis.technical_gaps, vec![expected.clone()]);
        assert!(analysis.soft_skill_gaps.is_empty());
        assert_eq!(analysis.priority_skills, vec![expected]);
        assert_eq!(overall_score(levels(&t, &s, &i)), 3.0);
    }

    #[test]
    fn test_levels_at_threshold_are_not_gaps() {
        let (t, s, i) = (json!({"rust": 3, "go": 5}), json!({"comm": 3.0}), json!({"finance": 4}));
        let analysis = analyze_skill_gaps(levels(&t, &s, &i));
        assert!(analysis.priority_skills.is_empty());
    }

    #[test]
    fn test_fractional_level_gap_is_exact() {
        let (t, s, i) = (json!({"sql": 2.5}), json!({}), json!({}));
        let analysis = analyze_skill_gaps(levels(&t, &s, &i));
        assert_eq!(analysis.technical_gaps[0].gap, 1.5);
    }

    #[test]
    fn test_priority_is_top_five_sorted_stably() {
        let t = json!({"a": 2, "b": 1});
        let s = json!({"c": 2, "d": 0});
        let i = json!({"e": 1, "f": 2.5});
        let analysis = analyze_skill_gaps(levels(&t, &s, &i));

        let names: Vec<&str> = analysis.priority_skills.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(names, vec!["d", "b", "e", "a", "c"]);
        assert!(analysis
            .priority_skills
            .windows(2)
            .all(|w| w[0].gap >= w[1].gap));
    }

    #[test]
    fn test_non_numeric_and_non_object_inputs_are_skipped() {
        let t = json!({"python": "beginner", "flag": true, "nested": {"x": 1}});
        let s = json!(["comm", 1]);
        let i = Value::Null;
        let analysis = analyze_skill_gaps(levels(&t, &s, &i));
        assert_eq!(analysis, SkillGapAnalysis::default());
        assert_eq!(overall_score(levels(&t, &s, &i)), 0.0);
    }

    #[test]
    fn test_overall_score_spans_all_groups() {
        let (t, s, i) = (json!({"a": 1}), json!({"b": 2}), json!({"c": 5, "d": "n/a"}));
        assert!((overall_score(levels(&t, &s, &i)) - 8.0 / 3.0).abs() < 1e-9);
    }
}
