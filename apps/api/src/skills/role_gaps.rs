//! AI gap analysis against a named target role, with a static fallback report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::prompts::ROLE_GAP_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::schema::{merge_with_defaults, FieldSpec};
use crate::llm_client::{generate_json, TextGenerator};

const DEFAULT_TIMELINE: &str = "6-12 months";

const ROLE_GAP_SCHEMA: [FieldSpec; 5] = [
    FieldSpec::list("missing_skills"),
    FieldSpec::list("skills_to_improve"),
    FieldSpec::list("learning_recommendations"),
    FieldSpec::list("priority_order"),
    FieldSpec::text("estimated_timeline", DEFAULT_TIMELINE),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleGapReport {
    pub missing_skills: Vec<String>,
    pub skills_to_improve: Vec<String>,
    pub learning_recommendations: Vec<String>,
    pub priority_order: Vec<String>,
    pub estimated_timeline: String,
}

impl RoleGapReport {
    pub fn fallback() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            missing_skills: owned(&["Advanced Programming", "System Design"]),
            skills_to_improve: owned(&["Communication", "Leadership"]),
            learning_recommendations: owned(&["Take online courses", "Join professional groups"]),
            priority_order: owned(&["Advanced Programming", "System Design", "Communication"]),
            estimated_timeline: DEFAULT_TIMELINE.to_string(),
        }
    }

    fn from_raw(raw: &Map<String, Value>) -> Self {
        let merged = merge_with_defaults(raw, &ROLE_GAP_SCHEMA);
        if !merged.repaired.is_empty() {
            warn!("Role gap response repaired fields: {:?}", merged.repaired);
        }
        Self {
            missing_skills: merged.string_list("missing_skills"),
            skills_to_improve: merged.string_list("skills_to_improve"),
            learning_recommendations: merged.string_list("learning_recommendations"),
            priority_order: merged.string_list("priority_order"),
            estimated_timeline: merged.text("estimated_timeline"),
        }
    }
}

/// Never fails: an unconfigured provider, transport error or non-object reply
/// yields `RoleGapReport::fallback()`.
pub async fn analyze_role_gaps(
    llm: &dyn TextGenerator,
    current_skills: &Value,
    target_role: &str,
) -> RoleGapReport {
    if !llm.is_configured() {
        info!("LLM unconfigured; returning fallback role gap report");
        return RoleGapReport::fallback();
    }

    let skills = serde_json::to_string_pretty(current_skills).unwrap_or_else(|_| "{}".into());
    let prompt = fill_template(
        ROLE_GAP_PROMPT_TEMPLATE,
        &[("target_role", target_role), ("current_skills", skills.as_str())],
    );

    match generate_json::<Value>(llm, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(Value::Object(raw)) => RoleGapReport::from_raw(&raw),
        Ok(other) => {
            warn!("Role gap response was not an object ({}); using fallback", type_name(&other));
            RoleGapReport::fallback()
        }
        Err(e) => {
            warn!("Role gap analysis failed, using fallback: {e}");
            RoleGapReport::fallback()
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use serde_json::json;

    #[tokio::test]
    async fn test_model_reply_is_used_and_repaired() {
        let llm = ScriptedGenerator::replying(
            r#"{"missing_skills": ["Kubernetes"], "skills_to_improve": "Rust", "priority_order": ["Kubernetes", "Rust"]}"#,
        );
        let report = analyze_role_gaps(&llm, &json!({"rust": 2}), "Platform Engineer").await;

        assert_eq!(report.missing_skills, vec!["Kubernetes"]);
        assert_eq!(report.skills_to_improve, vec!["Rust"]);
        assert!(report.learning_recommendations.is_empty());
        assert_eq!(report.estimated_timeline, "6-12 months");

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("Platform Engineer"));
        assert!(prompt.contains("\"rust\": 2"));
    }

    #[tokio::test]
    async fn test_target_role_with_placeholder_text_is_sent_verbatim() {
        let llm = ScriptedGenerator::replying("{}");
        analyze_role_gaps(&llm, &json!({"sql": 1}), "{current_skills}").await;

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("targeting the role: {current_skills}"));
        assert!(prompt.contains("\"sql\": 1"));
    }

    #[tokio::test]
    async fn test_provider_failure_returns_fallback() {
        let report = analyze_role_gaps(&ScriptedGenerator::failing(), &json!({}), "Designer").await;
        assert_eq!(report, RoleGapReport::fallback());
    }

    #[tokio::test]
    async fn test_unconfigured_returns_fallback() {
        let llm = ScriptedGenerator::unconfigured();
        let report = analyze_role_gaps(&llm, &json!({}), "Designer").await;
        assert_eq!(report, RoleGapReport::fallback());
        assert!(llm.last_prompt().is_none());
    }

    #[tokio::test]
    async fn test_non_object_reply_returns_fallback() {
        let report =
            analyze_role_gaps(&ScriptedGenerator::replying(r#"["a", "b"]"#), &json!({}), "Chef").await;
        assert_eq!(report.priority_order.len(), 3);
    }
}
