use std::sync::Arc;

use crate::aggregation::Aggregator;
use crate::config::Config;
use crate::relevance::filter::RelevanceFilter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Source adapters in registration order.
    pub aggregator: Arc<Aggregator>,
    /// Relevance filter with its scorer. Scorer is absent when no credential is configured.
    pub relevance: RelevanceFilter,
}
