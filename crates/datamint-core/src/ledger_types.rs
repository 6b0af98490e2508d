//! Ledger backend selection types.
//!
//! Kept in core so configuration can name a backend without depending on the
//! ledger crate itself.

use serde::{Deserialize, Serialize};

/// Which ledger/content-store adapter to use.
///
/// Only the simulated adapter is implemented: transaction hashes, block numbers
/// and content identifiers are generated locally and no chain is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    Simulated,
}

impl std::fmt::Display for LedgerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerBackend::Simulated => write!(f, "simulated"),
        }
    }
}

impl std::str::FromStr for LedgerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simulated" | "sim" => Ok(LedgerBackend::Simulated),
            other => Err(format!("Unknown ledger backend: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!(
            "simulated".parse::<LedgerBackend>().unwrap(),
            LedgerBackend::Simulated
        );
        assert!("mainnet".parse::<LedgerBackend>().is_err());
    }
}
