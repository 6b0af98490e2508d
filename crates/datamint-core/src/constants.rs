//! Shared constants used across the API and services.

/// Currency listings are denominated in. Purely a label: the ledger is simulated
/// and no real funds move.
pub const DEFAULT_CURRENCY: &str = "ETH";

/// Default access window granted to a buyer, in days.
pub const DEFAULT_ACCESS_DURATION_DAYS: i32 = 30;
