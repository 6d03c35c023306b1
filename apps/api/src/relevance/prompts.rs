// All LLM prompt constants for the Relevance module.

/// System prompt for relevance ranking — enforces JSON-only output.
pub const RELEVANCE_SYSTEM: &str = "You are a job matching assistant that helps identify \
    relevant job listings based on specific criteria. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Relevance prompt template. Replace `{criteria_json}` and `{jobs_json}` before sending.
pub const RELEVANCE_PROMPT_TEMPLATE: &str = r#"Identify the most relevant jobs from the following list based on the user's criteria.

USER CRITERIA:
{criteria_json}

JOBS TO ANALYZE (each carries its "index"):
{jobs_json}

Evaluate how well each job matches the user's criteria, focusing on:
1. Position / job title match
2. Required experience
3. Salary expectations (if specified)
4. Job nature (remote, onsite, hybrid)
5. Location preference
6. Required skills

Return a JSON object with this EXACT schema (no extra fields):
{
  "relevant_indices": [0, 5, 2, 9]
}

HARD RULES:
1. `relevant_indices` contains only the "index" values of jobs that are a good match
2. Rank by relevance — most relevant first
3. Every value is an integer taken from the list above — never invent an index
4. If no job is a good match, return {"relevant_indices": []}"#;
