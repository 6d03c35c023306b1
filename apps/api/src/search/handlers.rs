//! Axum route handlers for the Search API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::models::job::{JobSearchResponse, SearchCriteria};
use crate::search::pipeline::search_jobs;
use crate::state::AppState;

/// POST /api/jobs/search
///
/// Aggregates listings from every source and returns the ones relevant to
/// the criteria, most relevant first. Source and scoring failures degrade to
/// fewer (or fallback-ordered) jobs, never to an error status.
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let Json(criteria) = payload?;

    let relevant_jobs = search_jobs(&state.aggregator, &state.relevance, &criteria).await;

    Ok(Json(JobSearchResponse { relevant_jobs }))
}
