//! Relevance Scorer — pluggable capability that ranks job summaries against criteria.
//!
//! Default: `LlmRelevanceScorer` (Claude via `llm_client`).
//! Any backend works as long as it returns positions into the job list,
//! most relevant first. `AppState` holds it as `Arc<dyn RelevanceScorer>`.

use std::fmt;

use async_trait::async_trait;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::{parse_json_text, LlmError};
use crate::relevance::payload::{CriteriaSummary, JobSummary};

/// Ordered positions into the job list as returned by a scorer.
///
/// Values are unchecked: negative or out-of-range entries are legal here and
/// are dropped by the filter.
pub type RankedIndices = Vec<i64>;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring service not configured: {0}")]
    Misconfigured(String),

    #[error("scoring service unavailable: {0}")]
    Unavailable(String),

    #[error("scoring service timed out")]
    Timeout,

    #[error("scoring response malformed: {0}")]
    Malformed(String),

    #[error("unexpected scoring fault: {0}")]
    Internal(String),
}

impl From<LlmError> for ScoringError {
    fn from(err: LlmError) -> Self {
        match err {
            e if e.is_timeout() => ScoringError::Timeout,
            LlmError::Http(e) => ScoringError::Unavailable(e.to_string()),
            e @ LlmError::Api { .. } => ScoringError::Unavailable(e.to_string()),
            LlmError::Parse(e) => ScoringError::Malformed(e.to_string()),
            LlmError::EmptyContent => ScoringError::Malformed("empty response".to_string()),
        }
    }
}

/// The scorer trait. Implement this to swap backends without touching the
/// filter's validation and fallback logic.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    async fn rank(
        &self,
        criteria: &CriteriaSummary,
        jobs: &[JobSummary],
    ) -> Result<RankedIndices, ScoringError>;

    /// Short label used in logs.
    fn backend(&self) -> &'static str;
}

/// The one accepted response shape: `{"relevant_indices": [int, ...]}`.
#[derive(Debug, Deserialize)]
struct ScoringResponse {
    relevant_indices: Vec<ScoredIndex>,
}

/// One `relevant_indices` entry. Integers outside `i64` saturate to
/// `i64::MAX`/`i64::MIN` so the filter drops them as out of range.
#[derive(Debug)]
struct ScoredIndex(i64);

/// serde_json reports integer literals beyond `i64`/`u64` as floats.
const I64_MAGNITUDE: f64 = 9_223_372_036_854_775_808.0;

impl<'de> Deserialize<'de> for ScoredIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScoredIndexVisitor)
    }
}

struct ScoredIndexVisitor;

impl<'de> Visitor<'de> for ScoredIndexVisitor {
    type Value = ScoredIndex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer index")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScoredIndex, E> {
        Ok(ScoredIndex(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScoredIndex, E> {
        Ok(ScoredIndex(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScoredIndex, E> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() >= I64_MAGNITUDE {
            Ok(ScoredIndex(if v > 0.0 { i64::MAX } else { i64::MIN }))
        } else {
            Err(E::invalid_type(Unexpected::Float(v), &self))
        }
    }
}

/// Parses raw scorer text into ranked indices.
///
/// Anything other than an object with an integer-array `relevant_indices`
/// (bare arrays included) is `Malformed`.
pub fn parse_ranked_indices(text: &str) -> Result<RankedIndices, ScoringError> {
    parse_json_text::<ScoringResponse>(text)
        .map(|r| r.relevant_indices.into_iter().map(|i| i.0).collect())
        .map_err(ScoringError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_object_schema() {
        let indices = parse_ranked_indices(r#"{"relevant_indices": [4, 0, 9]}"#).unwrap();
        assert_eq!(indices, vec![4, 0, 9]);
    }

    #[test]
    fn test_parses_fenced_response() {
        let text = "```json\n{\"relevant_indices\": [2]}\n```";
        assert_eq!(parse_ranked_indices(text).unwrap(), vec![2]);
    }

    #[test]
    fn test_negative_and_large_values_survive_parsing() {
        let indices = parse_ranked_indices(r#"{"relevant_indices": [-1, 3, 999]}"#).unwrap();
        assert_eq!(indices, vec![-1, 3, 999]);
    }

    #[test]
    fn test_integers_beyond_i64_saturate() {
        let text = r#"{"relevant_indices": [
            4, 18446744073709551615, 99999999999999999999, -99999999999999999999, 0
        ]}"#;
        assert_eq!(
            parse_ranked_indices(text).unwrap(),
            vec![4, i64::MAX, i64::MAX, i64::MIN, 0]
        );
    }

    #[test]
    fn test_bare_array_is_malformed() {
        let result = parse_ranked_indices("[0, 5, 2]");
        assert!(matches!(result, Err(ScoringError::Malformed(_))));
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let result = parse_ranked_indices(r#"{"indices": [0]}"#);
        assert!(matches!(result, Err(ScoringError::Malformed(_))));
    }

    #[test]
    fn test_non_integer_elements_are_malformed() {
        for text in [
            r#"{"relevant_indices": ["0", "1"]}"#,
            r#"{"relevant_indices": [1.5]}"#,
            r#"{"relevant_indices": [1.0]}"#,
            r#"{"relevant_indices": [null]}"#,
            r#"{"relevant_indices": "0,1"}"#,
        ] {
            assert!(
                matches!(parse_ranked_indices(text), Err(ScoringError::Malformed(_))),
                "expected malformed for {text}"
            );
        }
    }

    #[test]
    fn test_prose_is_malformed() {
        let result = parse_ranked_indices("The best jobs are 1 and 3.");
        assert!(matches!(result, Err(ScoringError::Malformed(_))));
    }

    #[test]
    fn test_api_error_maps_to_unavailable() {
        let err = ScoringError::from(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        });
        assert!(matches!(err, ScoringError::Unavailable(_)));
    }
}
