//! Relevance Filter — selects and orders candidates against the requester's criteria.
//!
//! Flow: candidates empty → return empty (no scorer call).
//!       otherwise → summarize → scorer.rank() → validate indices → ranked subset.
//! Every scorer failure, a malformed answer, an answer with no usable index,
//! or a panic inside the scorer lands on the fallback: the first
//! `fallback_cap` candidates in aggregation order. The filter never errors.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::models::job::{JobRecord, SearchCriteria};
use crate::relevance::payload::{summarize_criteria, summarize_jobs};
use crate::relevance::scorer::{RankedIndices, RelevanceScorer, ScoringError};

pub const DEFAULT_FALLBACK_CAP: usize = 10;

/// Why the filter served the fallback instead of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    Misconfigured,
    Unavailable,
    Timeout,
    Malformed,
    NoValidIndices,
    Internal,
}

impl From<&ScoringError> for FallbackReason {
    fn from(err: &ScoringError) -> Self {
        match err {
            ScoringError::Misconfigured(_) => FallbackReason::Misconfigured,
            ScoringError::Unavailable(_) => FallbackReason::Unavailable,
            ScoringError::Timeout => FallbackReason::Timeout,
            ScoringError::Malformed(_) => FallbackReason::Malformed,
            ScoringError::Internal(_) => FallbackReason::Internal,
        }
    }
}

/// Terminal state of one filter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    NoCandidates,
    Ranked,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone)]
pub struct FilterResult {
    pub jobs: Vec<JobRecord>,
    pub outcome: FilterOutcome,
}

/// Stateless across requests; the scorer is injected by the composition root.
#[derive(Clone)]
pub struct RelevanceFilter {
    /// `None` when no scoring credential is configured.
    scorer: Option<Arc<dyn RelevanceScorer>>,
    timeout: Duration,
    fallback_cap: usize,
}

impl RelevanceFilter {
    pub fn new(
        scorer: Option<Arc<dyn RelevanceScorer>>,
        timeout: Duration,
        fallback_cap: usize,
    ) -> Self {
        Self {
            scorer,
            timeout,
            fallback_cap: fallback_cap.max(1),
        }
    }

    /// Label of the configured scorer, `None` in fallback-only mode.
    pub fn scoring_backend(&self) -> Option<&'static str> {
        self.scorer.as_ref().map(|s| s.backend())
    }

    /// Returns the relevant candidates, most relevant first.
    pub async fn filter(
        &self,
        candidates: &[JobRecord],
        criteria: &SearchCriteria,
    ) -> Vec<JobRecord> {
        self.filter_with_outcome(candidates, criteria).await.jobs
    }

    /// Same as `filter`, also reporting which terminal state was reached.
    pub async fn filter_with_outcome(
        &self,
        candidates: &[JobRecord],
        criteria: &SearchCriteria,
    ) -> FilterResult {
        if candidates.is_empty() {
            info!("No candidates to rank; skipping relevance scoring");
            return FilterResult {
                jobs: Vec::new(),
                outcome: FilterOutcome::NoCandidates,
            };
        }

        let indices = match self.score(candidates, criteria).await {
            Ok(indices) => indices,
            Err(e) => {
                match &e {
                    ScoringError::Internal(_) => error!("Relevance scoring failed: {e}"),
                    _ => warn!("Relevance scoring failed: {e}"),
                }
                return self.fallback(candidates, FallbackReason::from(&e));
            }
        };

        let ranked = select_ranked(candidates, &indices);
        if ranked.is_empty() {
            warn!(
                "Scorer returned {} indices, none usable for {} candidates",
                indices.len(),
                candidates.len()
            );
            return self.fallback(candidates, FallbackReason::NoValidIndices);
        }

        info!(
            "Ranked {} of {} candidates as relevant",
            ranked.len(),
            candidates.len()
        );
        FilterResult {
            jobs: ranked,
            outcome: FilterOutcome::Ranked,
        }
    }

    /// One scorer call, bounded by `timeout` and isolated from panics.
    async fn score(
        &self,
        candidates: &[JobRecord],
        criteria: &SearchCriteria,
    ) -> Result<RankedIndices, ScoringError> {
        let scorer = self.scorer.clone().ok_or_else(|| {
            ScoringError::Misconfigured("no scoring credential configured".to_string())
        })?;

        let criteria = summarize_criteria(criteria);
        let jobs = summarize_jobs(candidates);
        let backend = scorer.backend();

        let mut handle = tokio::spawn(async move { scorer.rank(&criteria, &jobs).await });

        match tokio::time::timeout(self.timeout, &mut handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(ScoringError::Internal(format!(
                "{backend} scorer task failed: {join_err}"
            ))),
            Err(_) => {
                handle.abort();
                Err(ScoringError::Timeout)
            }
        }
    }

    fn fallback(&self, candidates: &[JobRecord], reason: FallbackReason) -> FilterResult {
        let jobs = fallback_top_n(candidates, self.fallback_cap);
        info!("Serving fallback of {} candidates ({reason:?})", jobs.len());
        FilterResult {
            jobs,
            outcome: FilterOutcome::Fallback(reason),
        }
    }
}

/// Maps scorer indices back to candidates in the scorer's order.
/// Out-of-range and repeated indices are dropped. Repeats keep their first
/// position rather than returning the same job twice.
pub fn select_ranked(candidates: &[JobRecord], indices: &[i64]) -> Vec<JobRecord> {
    let mut seen = HashSet::new();
    indices
        .iter()
        .filter_map(|&i| usize::try_from(i).ok())
        .filter(|&i| i < candidates.len() && seen.insert(i))
        .map(|i| candidates[i].clone())
        .collect()
}

/// The first `cap` candidates in aggregation order.
pub fn fallback_top_n(candidates: &[JobRecord], cap: usize) -> Vec<JobRecord> {
    candidates.iter().take(cap).cloned().collect()
}
