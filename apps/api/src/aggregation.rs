//! Aggregator — runs every source adapter concurrently and concatenates results.
//!
//! Each adapter runs in its own task under a deadline. A failed, panicked or
//! timed-out adapter contributes zero records and is logged. Output order is
//! registration order, independent of completion order.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::models::job::{JobRecord, SearchCriteria};
use crate::sources::{SourceAdapter, SourceError};

type FetchHandle = JoinHandle<Result<Vec<JobRecord>, SourceError>>;

pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    deadline: Duration,
}

impl Aggregator {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, deadline: Duration) -> Self {
        Self { adapters, deadline }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Fetches from all adapters once. Never fails; all sources failing yields an empty list.
    pub async fn aggregate(&self, criteria: &SearchCriteria) -> Vec<JobRecord> {
        let handles: Vec<(&'static str, FetchHandle)> = self
            .adapters
            .iter()
            .map(|adapter| {
                let handle = self.spawn_fetch(adapter.clone(), criteria.clone());
                (adapter.name(), handle)
            })
            .collect();

        let mut candidates = Vec::new();
        let mut failures = 0;

        for (name, handle) in handles {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(join_err) => Err(SourceError::Panicked(join_err.to_string())),
            };

            match outcome {
                Ok(jobs) => {
                    let total = jobs.len();
                    let complete: Vec<JobRecord> =
                        jobs.into_iter().filter(JobRecord::is_complete).collect();
                    if complete.len() < total {
                        warn!(
                            "Source {name} emitted {} incomplete records; dropped",
                            total - complete.len()
                        );
                    }
                    info!("Source {name} contributed {} jobs", complete.len());
                    candidates.extend(complete);
                }
                Err(e) => {
                    failures += 1;
                    warn!("Source {name} unavailable: {e}");
                }
            }
        }

        if !self.adapters.is_empty() && failures == self.adapters.len() {
            warn!("All {failures} sources failed; no candidates this search");
        }

        candidates
    }

    fn spawn_fetch(
        &self,
        adapter: Arc<dyn SourceAdapter>,
        criteria: SearchCriteria,
    ) -> FetchHandle {
        let deadline = self.deadline;
        tokio::spawn(async move {
            match tokio::time::timeout(deadline, adapter.fetch(&criteria)).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::DeadlineExceeded(deadline)),
            }
        })
    }
}
