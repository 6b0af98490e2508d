//! Shared application state

use std::sync::Arc;

use datamint_analysis::Analyzer;
use datamint_core::Config;
use datamint_db::{ListingRepository, PurchaseRepository, UserRepository};
use datamint_ledger::{ContentStore, Ledger};
use sqlx::PgPool;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub users: UserRepository,
    pub listings: ListingRepository,
    pub purchases: PurchaseRepository,
    pub analyzer: Analyzer,
    pub ledger: Arc<dyn Ledger>,
    pub content_store: Arc<dyn ContentStore>,
}
