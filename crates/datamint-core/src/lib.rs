//! Datamint Core Library
//!
//! This crate provides core domain models, error types, configuration, and
//! constants that are shared across all Datamint components.

pub mod config;
pub mod constants;
pub mod error;
pub mod ledger_types;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, MarketplaceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use ledger_types::LedgerBackend;
