// All LLM prompt constants for the Recommendation module.

/// Career recommendation prompt template.
/// Replace `{profile}`, `{aptitude_scores}`, `{interest_scores}` and `{skill_evaluation}`
/// before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Generate comprehensive career recommendations based on the following user profile and assessments.

USER PROFILE:
{profile}

APTITUDE SCORES:
{aptitude_scores}

INTEREST SCORES:
{interest_scores}

SKILL EVALUATION:
{skill_evaluation}

Return a JSON object with exactly this structure:
{
  "recommended_careers": [
    {
      "title": "Career Title",
      "industry": "Industry",
      "skill_match_score": 0.85,
      "interest_alignment_score": 0.78,
      "overall_score": 0.82,
      "description": "Brief description",
      "required_skills": ["skill1", "skill2"],
      "growth_potential": "High/Medium/Low",
      "salary_range": "Range information"
    }
  ],
  "career_progression_path": {
    "short_term": ["step1", "step2"],
    "long_term": ["goal1", "goal2"]
  },
  "skill_development_plan": {
    "priority_skills": ["skill1", "skill2"],
    "learning_resources": ["resource1", "resource2"],
    "timeline": "6-12 months"
  },
  "market_trend_analysis": {
    "industry_trends": ["trend1", "trend2"],
    "demand_forecast": "High/Medium/Low",
    "emerging_roles": ["role1", "role2"]
  },
  "rationale": "Detailed explanation of recommendations"
}"#;
