//! Ledger abstraction for minting dataset tokens and pinning content.
//!
//! Blockchain and content-addressed storage are capability interfaces here.
//! The only adapter shipped today simulates both with random identifiers;
//! a real chain integration would implement the same traits.

pub mod factory;
pub mod simulated;
pub mod traits;

pub use factory::create_ledger;
pub use simulated::SimulatedLedger;
pub use traits::{ContentStore, Ledger, LedgerError, LedgerResult, MintReceipt};
