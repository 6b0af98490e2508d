pub mod listing;
pub mod purchase;
pub mod user;

pub use listing::{Listing, ListingStatus};
pub use purchase::{Purchase, PurchaseStatus};
pub use user::{PublicUser, User};
