//! Semantic relevance scorer via Claude.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::llm_client::{CallOptions, LlmClient, LlmError};
use crate::relevance::payload::{CriteriaSummary, JobSummary};
use crate::relevance::prompts::{RELEVANCE_PROMPT_TEMPLATE, RELEVANCE_SYSTEM};
use crate::relevance::scorer::{parse_ranked_indices, RankedIndices, RelevanceScorer, ScoringError};

/// Bounded response envelope: an index list never needs more than this.
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.3;

/// A job summary as rendered into the prompt, tagged with its position.
#[derive(Serialize)]
struct IndexedJob<'a> {
    index: usize,
    #[serde(flatten)]
    job: &'a JobSummary,
}

pub struct LlmRelevanceScorer(pub LlmClient);

#[async_trait]
impl RelevanceScorer for LlmRelevanceScorer {
    async fn rank(
        &self,
        criteria: &CriteriaSummary,
        jobs: &[JobSummary],
    ) -> Result<RankedIndices, ScoringError> {
        let prompt = build_relevance_prompt(criteria, jobs)?;
        let options = CallOptions {
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self.0.call(&prompt, RELEVANCE_SYSTEM, options).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        debug!("Relevance scorer raw response: {text}");

        parse_ranked_indices(text)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Renders the criteria and indexed job list into the relevance prompt.
pub fn build_relevance_prompt(
    criteria: &CriteriaSummary,
    jobs: &[JobSummary],
) -> Result<String, ScoringError> {
    let indexed: Vec<IndexedJob> = jobs
        .iter()
        .enumerate()
        .map(|(index, job)| IndexedJob { index, job })
        .collect();

    let criteria_json = serde_json::to_string_pretty(criteria)
        .map_err(|e| ScoringError::Internal(format!("failed to serialize criteria: {e}")))?;
    let jobs_json = serde_json::to_string_pretty(&indexed)
        .map_err(|e| ScoringError::Internal(format!("failed to serialize jobs: {e}")))?;

    // Split once on each placeholder so inserted text is never re-expanded.
    let (head, rest) = RELEVANCE_PROMPT_TEMPLATE
        .split_once("{criteria_json}")
        .ok_or_else(|| ScoringError::Internal("template lacks {criteria_json}".to_string()))?;
    let (middle, tail) = rest
        .split_once("{jobs_json}")
        .ok_or_else(|| ScoringError::Internal("template lacks {jobs_json}".to_string()))?;

    Ok(format!("{head}{criteria_json}{middle}{jobs_json}{tail}"))
}
