mod aggregation;
mod config;
mod errors;
mod llm_client;
mod models;
mod relevance;
mod routes;
mod search;
mod sources;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::aggregation::Aggregator;
use crate::config::Config;
use crate::errors::panic_response;
use crate::llm_client::LlmClient;
use crate::relevance::filter::RelevanceFilter;
use crate::relevance::llm_scorer::LlmRelevanceScorer;
use crate::relevance::scorer::RelevanceScorer;
use crate::routes::build_router;
use crate::sources::{glassdoor, indeed, linkedin, SourceAdapter};
use crate::state::AppState;

const SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize relevance scorer (absent credential → fallback-only filtering)
    let scorer = build_scorer(&config)?;
    let relevance = RelevanceFilter::new(scorer, config.scoring_timeout, config.fallback_cap);
    info!(
        "Relevance filter ready: fallback cap {}, scoring timeout {:?}",
        config.fallback_cap, config.scoring_timeout
    );

    // Initialize source adapters; registration order is result order
    let aggregator = build_aggregator(&config)?;
    info!("Sources registered: {:?}", aggregator.source_names());

    let state = AppState {
        config: config.clone(),
        aggregator: Arc::new(aggregator),
        relevance,
    };

    let app = build_router(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the LLM scorer when a credential is configured.
fn build_scorer(config: &Config) -> Result<Option<Arc<dyn RelevanceScorer>>> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        warn!("ANTHROPIC_API_KEY is not set; search results will use fallback ordering");
        return Ok(None);
    };

    let llm = LlmClient::new(api_key, config.scoring_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    Ok(Some(Arc::new(LlmRelevanceScorer(llm))))
}

/// Constructs the LinkedIn, Indeed and Glassdoor adapters over one HTTP client.
fn build_aggregator(config: &Config) -> Result<Aggregator> {
    let client = reqwest::Client::builder()
        .user_agent(SCRAPER_USER_AGENT)
        .timeout(config.scrape_timeout)
        .build()?;

    let max = config.scrape_max_results;
    let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
        Arc::new(linkedin::adapter(client.clone(), max)),
        Arc::new(indeed::adapter(client.clone(), max)),
        Arc::new(glassdoor::adapter(client, max)),
    ];

    Ok(Aggregator::new(adapters, config.scrape_timeout))
}
