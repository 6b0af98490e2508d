//! Postgres repositories for marketplace entities.

pub mod listing;
pub mod purchase;
pub mod transaction;
pub mod user;

pub use listing::{ListingRepository, NewListing};
pub use purchase::{NewPurchase, PurchaseRepository};
pub use transaction::with_transaction;
pub use user::UserRepository;
