// All LLM prompt constants for the Skills module.

/// Role gap analysis prompt template.
/// Replace `{target_role}` and `{current_skills}` before sending.
pub const ROLE_GAP_PROMPT_TEMPLATE: &str = r#"Analyze skill gaps for someone targeting the role: {target_role}

CURRENT SKILLS (self-rated 1-5):
{current_skills}

Identify:
1. Missing critical skills for the role
2. Current skills that need improvement
3. Concrete learning recommendations
4. The priority order for skill development

Return a JSON object with exactly this shape:
{
  "missing_skills": ["skill1", "skill2"],
  "skills_to_improve": ["skill1", "skill2"],
  "learning_recommendations": ["recommendation1", "recommendation2"],
  "priority_order": ["skill1", "skill2"],
  "estimated_timeline": "6-12 months"
}"#;
