//! Scoring payloads — the criteria and job summaries handed to a `RelevanceScorer`.
//!
//! Job summaries are positional: `jobs[i]` describes `candidates[i]`, and the
//! scorer answers with those positions.

use serde::{Deserialize, Serialize};

use crate::models::job::{JobRecord, SearchCriteria};

pub const NOT_SPECIFIED: &str = "Not specified";

/// The six criteria fields, compared as one semantic unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSummary {
    pub position: String,
    pub experience: String,
    pub salary: Option<String>,
    #[serde(rename = "jobNature")]
    pub job_nature: Option<String>,
    pub location: Option<String>,
    pub skills: String,
}

/// What a scorer sees of one candidate. Missing optional fields read "Not specified".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_title: String,
    pub company: String,
    pub experience: String,
    #[serde(rename = "jobNature")]
    pub job_nature: String,
    pub location: String,
    pub salary: String,
    pub source: String,
}

pub fn summarize_criteria(criteria: &SearchCriteria) -> CriteriaSummary {
    CriteriaSummary {
        position: criteria.position.clone(),
        experience: criteria.experience.clone(),
        salary: criteria.salary.clone(),
        job_nature: criteria.job_nature.clone(),
        location: criteria.location.clone(),
        skills: criteria.skills.clone(),
    }
}

/// Summarizes candidates in order; the output index is the joining key.
pub fn summarize_jobs(candidates: &[JobRecord]) -> Vec<JobSummary> {
    candidates
        .iter()
        .map(|job| JobSummary {
            job_title: job.job_title.clone(),
            company: job.company.clone(),
            experience: or_not_specified(&job.experience),
            job_nature: or_not_specified(&job.job_nature),
            location: or_not_specified(&job.location),
            salary: or_not_specified(&job.salary),
            source: job.source.clone(),
        })
        .collect()
}

fn or_not_specified(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_SPECIFIED.to_string(),
    }
}
