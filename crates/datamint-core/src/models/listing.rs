use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a dataset listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Minted and available for purchase on the marketplace
    Active,
    /// Minted but not currently listed for sale
    Minted,
    /// Removed from the marketplace by its owner
    Delisted,
}

/// A dataset minted as a simulated token and tracked in the marketplace
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Listing {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Token identifier assigned at mint time, unique across the marketplace
    pub token_id: i64,
    pub title: String,
    pub description: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub categories: Vec<String>,
    pub price: Decimal,
    pub currency: String,
    pub access_duration_days: i32,
    pub allow_revocation: bool,
    /// Full analysis report captured when the dataset was analyzed
    pub analysis: serde_json::Value,
    pub status: ListingStatus,
    pub total_sales: i32,
    pub earnings: Decimal,
    pub views: i32,
    pub ipfs_hash: String,
    pub metadata_hash: String,
    pub contract_address: String,
    pub transaction_hash: String,
    pub block_number: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ListingStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&ListingStatus::Delisted).unwrap(),
            "\"delisted\""
        );
    }
}
