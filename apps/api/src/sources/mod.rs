//! Source adapters — one per job site, each producing best-effort `JobRecord`s.
//!
//! Adapters are independent and unreliable by nature. The aggregator calls
//! each exactly once per search and treats any `SourceError` as zero records.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::{JobRecord, SearchCriteria};

pub mod glassdoor;
pub mod indeed;
pub mod linkedin;
pub mod listing;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("site returned status {status}")]
    Status { status: u16 },

    #[error("invalid search URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("blocked by bot protection")]
    Blocked,

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("adapter task failed: {0}")]
    Panicked(String),
}

/// A job site integration. Implementations must only emit complete records
/// (see `JobRecord::is_complete`).
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Display name stamped into `JobRecord::source`.
    fn name(&self) -> &'static str;

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<JobRecord>, SourceError>;
}
