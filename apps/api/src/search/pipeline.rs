//! Search pipeline — aggregate → relevance filter.
//!
//! Neither stage can fail: an empty source set or an unusable scorer both
//! degrade to a (possibly empty) list. "No sources answered" and "nothing
//! relevant" are only distinguishable in the logs.

use tracing::info;

use crate::aggregation::Aggregator;
use crate::models::job::{JobRecord, SearchCriteria};
use crate::relevance::filter::RelevanceFilter;

pub async fn search_jobs(
    aggregator: &Aggregator,
    relevance: &RelevanceFilter,
    criteria: &SearchCriteria,
) -> Vec<JobRecord> {
    info!("Searching jobs for position '{}'", criteria.position);

    let candidates = aggregator.aggregate(criteria).await;
    info!(
        "Aggregated {} candidates from {} sources",
        candidates.len(),
        aggregator.source_names().len()
    );

    let relevant = relevance.filter(&candidates, criteria).await;
    info!("Returning {} relevant jobs", relevant.len());

    relevant
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::relevance::scorer::{RelevanceScorer, ScoringError};
    use crate::sources::SourceAdapter;
    use crate::test_support::{
        candidates, criteria, AdapterScript, ScorerScript, ScriptedAdapter, ScriptedScorer,
    };

    /// Three sources of five records each; concatenated they equal `candidates(15)`.
    fn three_sources() -> Aggregator {
        let all = candidates(15);
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            ScriptedAdapter::new("LinkedIn", AdapterScript::Jobs(all[0..5].to_vec())),
            ScriptedAdapter::new("Indeed", AdapterScript::Jobs(all[5..10].to_vec())),
            ScriptedAdapter::new("Glassdoor", AdapterScript::Jobs(all[10..15].to_vec())),
        ];
        Aggregator::new(adapters, Duration::from_secs(60))
    }

    fn relevance(scorer: Arc<ScriptedScorer>) -> RelevanceFilter {
        let scorer: Arc<dyn RelevanceScorer> = scorer;
        RelevanceFilter::new(Some(scorer), Duration::from_secs(30), 10)
    }

    #[tokio::test]
    async fn test_ranked_scenario_returns_scorer_order() {
        let all = candidates(15);
        let scorer = ScriptedScorer::new(ScorerScript::Indices(vec![4, 0, 9]));

        let result = search_jobs(&three_sources(), &relevance(scorer), &criteria()).await;

        assert_eq!(result, vec![all[4].clone(), all[0].clone(), all[9].clone()]);
    }

    #[tokio::test]
    async fn test_scorer_timeout_scenario_returns_first_ten() {
        let all = candidates(15);
        let scorer = ScriptedScorer::new(ScorerScript::Fail(|| ScoringError::Timeout));

        let result = search_jobs(&three_sources(), &relevance(scorer), &criteria()).await;

        assert_eq!(result, all[0..10].to_vec());
    }

    #[tokio::test]
    async fn test_no_sources_answering_skips_scoring() {
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            ScriptedAdapter::new("LinkedIn", AdapterScript::Fail),
            ScriptedAdapter::new("Indeed", AdapterScript::Fail),
            ScriptedAdapter::new("Glassdoor", AdapterScript::Fail),
        ];
        let aggregator = Aggregator::new(adapters, Duration::from_secs(60));
        let scorer = ScriptedScorer::new(ScorerScript::Indices(vec![0]));

        let result = search_jobs(&aggregator, &relevance(scorer.clone()), &criteria()).await;

        assert!(result.is_empty());
        assert_eq!(scorer.calls(), 0);
    }
}
