// All LLM prompt constants for the Assessment module.

/// System prompt for AI-assisted aptitude grading.
pub const APTITUDE_GRADING_SYSTEM: &str =
    "You are an impartial psychometric grader for career aptitude tests. \
    Score each aptitude category from 0 to 100 based on the answers given. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Aptitude grading prompt template. Replace `{transcript}` before sending.
pub const APTITUDE_GRADING_PROMPT_TEMPLATE: &str = r#"Grade the following aptitude test.

For every question you are given its category, the question text, the correct answer,
and the candidate's answer ("Not answered" when skipped).

TRANSCRIPT:
{transcript}

Return a JSON object mapping each category to a score between 0 and 100, using exactly
these keys:
{
  "logical_reasoning": 0,
  "verbal_ability": 0,
  "numerical_ability": 0,
  "spatial_reasoning": 0,
  "analytical_thinking": 0
}

Categories with no questions score 0. Weigh partially reasoned answers fairly, but a wrong
answer never scores higher than a correct one."#;

/// System prompt for question generation.
pub const QUESTION_GENERATION_SYSTEM: &str =
    "You are a career assessment test generator. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Question generation prompt. Replace `{assessment_type}`, `{count}` and `{categories}`.
pub const QUESTION_GENERATION_PROMPT_TEMPLATE: &str = r#"Generate {count} multiple-choice {assessment_type} test questions.

Return a JSON array. Each element must have:
- "id": unique integer starting at 1
- "question": the question text
- "options": exactly 4 answer strings
- "correct": index (0-3) of the correct option, or null if the question is subjective
- "category": one of {categories}

Example element:
{"id": 1, "question": "Which number comes next: 2, 4, 8, ?", "options": ["10", "12", "16", "18"], "correct": 2, "category": "numerical_ability"}"#;
