//! Simulated ledger adapter.
//!
//! Generates identifiers shaped like real chain artifacts (transaction
//! hashes, block numbers, IPFS content identifiers) from a thread-local RNG.
//! No network calls, no persistence of its own.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use datamint_core::LedgerBackend;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::traits::{ContentStore, Ledger, LedgerError, LedgerResult, MintReceipt};

const TOKEN_ID_FLOOR: i64 = 1_000;
const TOKEN_ID_SPAN: i64 = 1_000_000;
const CID_BODY_LEN: usize = 44;

/// Ledger and content store backed by random generation only.
///
/// Token ids come from a monotonic counter seeded at a random point in the
/// id space, so a single process never hands out the same id twice.
pub struct SimulatedLedger {
    contract_address: String,
    next_token_id: AtomicI64,
}

impl SimulatedLedger {
    pub fn new(contract_address: String) -> Self {
        let seed = TOKEN_ID_FLOOR + rand::rng().random_range(0..TOKEN_ID_SPAN);
        Self {
            contract_address,
            next_token_id: AtomicI64::new(seed),
        }
    }

    fn random_tx_hash() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill(&mut bytes[..]);
        format!("0x{}", hex::encode(bytes))
    }
}

#[async_trait]
impl Ledger for SimulatedLedger {
    async fn mint(&self, metadata_uri: &str) -> LedgerResult<MintReceipt> {
        if metadata_uri.is_empty() {
            return Err(LedgerError::MintFailed(
                "metadata URI must not be empty".to_string(),
            ));
        }

        let receipt = MintReceipt {
            token_id: self.next_token_id.fetch_add(1, Ordering::Relaxed),
            transaction_hash: Self::random_tx_hash(),
            block_number: 18_000_000 + rand::rng().random_range(0..1_000_000),
            contract_address: self.contract_address.clone(),
        };

        tracing::debug!(
            token_id = receipt.token_id,
            tx = %receipt.transaction_hash,
            "simulated mint"
        );
        Ok(receipt)
    }

    async fn record_transfer(&self, token_id: i64) -> LedgerResult<String> {
        let hash = Self::random_tx_hash();
        tracing::debug!(token_id, tx = %hash, "simulated transfer");
        Ok(hash)
    }

    fn backend_type(&self) -> LedgerBackend {
        LedgerBackend::Simulated
    }
}

#[async_trait]
impl ContentStore for SimulatedLedger {
    async fn pin(&self, _data: &[u8]) -> LedgerResult<String> {
        let body: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(CID_BODY_LEN)
            .map(char::from)
            .collect();
        Ok(format!("Qm{}", body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> SimulatedLedger {
        SimulatedLedger::new("0x742d35Cc6634C0532925a3b8D4C9db96590c6C87".to_string())
    }

    #[tokio::test]
    async fn mint_produces_well_formed_receipt() {
        let receipt = ledger().mint("ipfs://QmTest").await.unwrap();
        assert!(receipt.token_id >= TOKEN_ID_FLOOR);
        assert!(receipt.token_id < TOKEN_ID_FLOOR + TOKEN_ID_SPAN);
        assert!(receipt.transaction_hash.starts_with("0x"));
        assert_eq!(receipt.transaction_hash.len(), 66);
        assert!(receipt
            .transaction_hash
            .chars()
            .skip(2)
            .all(|c| c.is_ascii_hexdigit()));
        assert!(receipt.block_number > 0);
    }

    #[tokio::test]
    async fn mint_token_ids_never_repeat() {
        let ledger = ledger();
        let first = ledger.mint("ipfs://QmOne").await.unwrap().token_id;
        let second = ledger.mint("ipfs://QmTwo").await.unwrap().token_id;
        let third = ledger.mint("ipfs://QmThree").await.unwrap().token_id;
        assert_eq!(second, first + 1);
        assert_eq!(third, second + 1);
    }

    #[tokio::test]
    async fn mint_requires_metadata_uri() {
        assert!(ledger().mint("").await.is_err());
    }

    #[tokio::test]
    async fn pin_yields_ipfs_style_cid() {
        let cid = ledger().pin(b"dataset bytes").await.unwrap();
        assert!(cid.starts_with("Qm"));
        assert_eq!(cid.len(), 2 + CID_BODY_LEN);
    }

    #[tokio::test]
    async fn transfer_hashes_are_unique() {
        let ledger = ledger();
        let a = ledger.record_transfer(1).await.unwrap();
        let b = ledger.record_transfer(1).await.unwrap();
        assert_ne!(a, b);
    }
}
