pub mod analyze;
pub mod auth;
pub mod contract;
pub mod dashboard;
pub mod datasets;
pub mod health;
pub mod marketplace;
pub mod mint;
