//! Application initialization

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use datamint_analysis::{Analyzer, Enrichment, GeminiEnrichment};
use datamint_core::Config;
use datamint_db::{ListingRepository, PurchaseRepository, UserRepository};
use datamint_ledger::create_ledger;

use crate::state::AppState;

/// Build the application state and router from configuration
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let pool = database::setup_database(&config).await?;

    let enrichment: Option<Arc<dyn Enrichment>> = if config.enrichment_enabled() {
        match config.gemini_api_key() {
            Some(api_key) => {
                tracing::info!(model = %config.gemini_model(), "generative enrichment enabled");
                Some(Arc::new(GeminiEnrichment::new(
                    api_key.to_string(),
                    config.gemini_model().to_string(),
                    config.enrichment_timeout_secs(),
                )?))
            }
            None => None,
        }
    } else {
        tracing::info!("generative enrichment disabled, deterministic analysis only");
        None
    };

    let ledger = create_ledger(&config)?;
    tracing::info!(backend = %config.ledger_backend(), "ledger initialized");

    let state = Arc::new(AppState {
        users: UserRepository::new(pool.clone()),
        listings: ListingRepository::new(pool.clone()),
        purchases: PurchaseRepository::new(pool.clone()),
        analyzer: Analyzer::new(enrichment),
        ledger: ledger.clone(),
        content_store: ledger,
        pool,
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;
    Ok((state, router))
}
