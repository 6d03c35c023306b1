//! Test doubles shared by the aggregation, relevance, search and route tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::models::job::{JobRecord, SearchCriteria};
use crate::relevance::payload::{CriteriaSummary, JobSummary};
use crate::relevance::scorer::{parse_ranked_indices, RankedIndices, RelevanceScorer, ScoringError};
use crate::sources::{SourceAdapter, SourceError};

pub fn criteria() -> SearchCriteria {
    SearchCriteria {
        position: "Backend Engineer".to_string(),
        experience: "3 years".to_string(),
        salary: None,
        job_nature: None,
        location: None,
        skills: "Go, SQL".to_string(),
    }
}

pub fn job(source: &str, n: usize) -> JobRecord {
    JobRecord {
        job_title: format!("{source} Job {n}"),
        company: format!("{source} Company {n}"),
        experience: None,
        job_nature: None,
        location: None,
        salary: None,
        apply_link: format!("https://jobs.example/{}/{n}", source.to_lowercase()),
        source: source.to_string(),
    }
}

/// `n` candidates spread evenly over LinkedIn, Indeed and Glassdoor, in that order.
pub fn candidates(n: usize) -> Vec<JobRecord> {
    let sources = ["LinkedIn", "Indeed", "Glassdoor"];
    (0..n)
        .map(|i| job(sources[i * sources.len() / n.max(1)], i))
        .collect()
}

pub enum ScorerScript {
    Indices(Vec<i64>),
    Text(&'static str),
    Fail(fn() -> ScoringError),
    Hang,
    Panic,
}

/// Scripted scorer with a call counter.
pub struct ScriptedScorer {
    script: ScorerScript,
    calls: AtomicUsize,
}

impl ScriptedScorer {
    pub fn new(script: ScorerScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelevanceScorer for ScriptedScorer {
    async fn rank(
        &self,
        _criteria: &CriteriaSummary,
        _jobs: &[JobSummary],
    ) -> Result<RankedIndices, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            ScorerScript::Indices(v) => Ok(v.clone()),
            ScorerScript::Text(t) => parse_ranked_indices(t),
            ScorerScript::Fail(make) => Err(make()),
            ScorerScript::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(vec![0])
            }
            ScorerScript::Panic => panic!("scorer blew up"),
        }
    }

    fn backend(&self) -> &'static str {
        "scripted"
    }
}

pub enum AdapterScript {
    Jobs(Vec<JobRecord>),
    Fail,
    Hang,
    Panic,
}

/// Scripted source adapter; `delay` is slept before answering.
pub struct ScriptedAdapter {
    name: &'static str,
    script: AdapterScript,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedAdapter {
    pub fn new(name: &'static str, script: AdapterScript) -> Arc<Self> {
        Self::delayed(name, script, Duration::ZERO)
    }

    pub fn delayed(name: &'static str, script: AdapterScript, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name,
            script,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for ScriptedAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, _criteria: &SearchCriteria) -> Result<Vec<JobRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.script {
            AdapterScript::Jobs(jobs) => Ok(jobs.clone()),
            AdapterScript::Fail => Err(SourceError::Status { status: 503 }),
            AdapterScript::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            AdapterScript::Panic => panic!("adapter blew up"),
        }
    }
}
