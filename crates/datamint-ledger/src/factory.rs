use std::sync::Arc;

use datamint_core::{Config, LedgerBackend};

use crate::simulated::SimulatedLedger;
use crate::traits::LedgerResult;

/// Create a ledger backend based on configuration.
///
/// Returns the concrete adapter so callers can coerce it to `dyn Ledger`
/// and `dyn ContentStore` as needed.
pub fn create_ledger(config: &Config) -> LedgerResult<Arc<SimulatedLedger>> {
    match config.ledger_backend() {
        LedgerBackend::Simulated => Ok(Arc::new(SimulatedLedger::new(
            config.contract_address().to_string(),
        ))),
    }
}
