// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona for free-form conversational answers.
pub const CAREER_COUNSELOR_SYSTEM: &str = "You are a supportive, practical career counselor. \
    Give concrete, honest guidance about careers, skills and learning paths. \
    Keep answers concise and avoid inventing statistics.";

/// Placeholder used when a prompt field has no value.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Fills `{name}` placeholders in one left-to-right pass. Substituted values are never
/// rescanned, so user text containing `{...}` reaches the model verbatim. Unknown
/// placeholders and other braces are kept as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values
            .iter()
            .find(|(name, _)| tail.starts_with(name) && tail[name.len()..].starts_with('}'));
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_placeholders() {
        let filled = fill_template("Role: {role}\nSkills: {skills}", &[("role", "Nurse"), ("skills", "{}")]);
        assert_eq!(filled, "Role: Nurse\nSkills: {}");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "{role} needs {skills}",
            &[("role", "{skills}"), ("skills", "SQL")],
        );
        assert_eq!(filled, "{skills} needs SQL");
    }

    #[test]
    fn test_fill_template_keeps_json_braces_and_unknown_names() {
        let filled = fill_template(r#"{"a": 1} {missing} {x"#, &[("x", "y")]);
        assert_eq!(filled, r#"{"a": 1} {missing} {x"#);
    }
}
