//! Ledger and content-store abstraction traits

use async_trait::async_trait;
use datamint_core::LedgerBackend;
use thiserror::Error;

/// Ledger operation errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Mint failed: {0}")]
    MintFailed(String),

    #[error("Pin failed: {0}")]
    PinFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Outcome of minting one dataset token
#[derive(Debug, Clone)]
pub struct MintReceipt {
    /// Token identifier, unique per contract
    pub token_id: i64,
    /// Transaction hash, `0x` + 64 hex digits
    pub transaction_hash: String,
    pub block_number: i64,
    pub contract_address: String,
}

/// Token-minting ledger.
///
/// Implementations record a dataset as a token and return the receipt the
/// marketplace persists on the listing. The simulated adapter fabricates
/// plausible identifiers without touching any chain.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn mint(&self, metadata_uri: &str) -> LedgerResult<MintReceipt>;

    /// Purchases are recorded as transfers; only the transaction hash is kept.
    async fn record_transfer(&self, token_id: i64) -> LedgerResult<String>;

    fn backend_type(&self) -> LedgerBackend;
}

/// Content-addressed storage for dataset payloads and token metadata.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Pin content and return its content identifier
    async fn pin(&self, data: &[u8]) -> LedgerResult<String>;
}
