//! Mint endpoint: freezes a reviewed analysis into a listing backed by a
//! simulated token.

use axum::{extract::State, Json};
use datamint_core::{constants::DEFAULT_CURRENCY, AppError};
use datamint_db::NewListing;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MintRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Price in ETH, already reviewed by the uploader
    pub price: Decimal,
    #[serde(default)]
    pub access_duration_days: Option<i32>,
    #[serde(default)]
    pub allow_revocation: bool,
    /// Analysis report frozen into the listing verbatim
    pub analysis: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MintResponse {
    pub token_id: i64,
    pub transaction_hash: String,
    pub block_number: i64,
    pub contract_address: String,
    pub ipfs_hash: String,
    pub metadata_hash: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/mint",
    tag = "datasets",
    request_body = MintRequest,
    responses(
        (status = 200, description = "Dataset minted", body = MintResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn mint(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    ValidatedJson(request): ValidatedJson<MintRequest>,
) -> Result<Json<MintResponse>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    if request.price <= Decimal::ZERO {
        return Err(AppError::InvalidInput("Price must be positive".to_string()).into());
    }
    if request.file_size <= 0 {
        return Err(AppError::InvalidInput("File size must be positive".to_string()).into());
    }

    // Pin the dataset reference and its token metadata
    let ipfs_hash = state
        .content_store
        .pin(request.file_name.as_bytes())
        .await
        .map_err(HttpAppError::from)?;

    let metadata = json!({
        "name": request.title,
        "description": request.description,
        "file": {
            "name": request.file_name,
            "size": request.file_size,
            "type": request.file_type,
            "ipfs": ipfs_hash,
        },
        "categories": request.categories,
        "analysis": request.analysis,
    });
    let metadata_hash = state
        .content_store
        .pin(metadata.to_string().as_bytes())
        .await
        .map_err(HttpAppError::from)?;

    let metadata_uri = format!("ipfs://{}", metadata_hash);

    // A minted token id can still collide with a row from an earlier run,
    // in which case the UNIQUE column rejects it and we mint a fresh id.
    const MAX_MINT_ATTEMPTS: u32 = 3;
    let mut attempt = 0;
    let listing = loop {
        attempt += 1;

        let receipt = state
            .ledger
            .mint(&metadata_uri)
            .await
            .map_err(HttpAppError::from)?;

        let result = state
            .listings
            .create_listing(NewListing {
                owner_id: user.user_id,
                token_id: receipt.token_id,
                title: request.title.clone(),
                description: request.description.clone(),
                file_name: request.file_name.clone(),
                file_size: request.file_size,
                file_type: request.file_type.clone(),
                categories: request.categories.clone(),
                price: request.price,
                currency: DEFAULT_CURRENCY.to_string(),
                access_duration_days: request
                    .access_duration_days
                    .unwrap_or_else(|| state.config.default_access_duration_days()),
                allow_revocation: request.allow_revocation,
                analysis: request.analysis.clone(),
                ipfs_hash: ipfs_hash.clone(),
                metadata_hash: metadata_hash.clone(),
                contract_address: receipt.contract_address.clone(),
                transaction_hash: receipt.transaction_hash.clone(),
                block_number: receipt.block_number,
            })
            .await;

        match result {
            Ok(listing) => break listing,
            Err(err) if err.is_unique_violation() && attempt < MAX_MINT_ATTEMPTS => {
                tracing::warn!(
                    token_id = receipt.token_id,
                    attempt,
                    "token id already taken, minting again"
                );
            }
            Err(err) => return Err(err.into()),
        }
    };

    state.users.increment_datasets_minted(user.user_id).await?;

    tracing::info!(
        user_id = %user.user_id,
        token_id = listing.token_id,
        "dataset minted"
    );

    Ok(Json(MintResponse {
        token_id: listing.token_id,
        transaction_hash: listing.transaction_hash,
        block_number: listing.block_number,
        contract_address: listing.contract_address,
        ipfs_hash: listing.ipfs_hash,
        metadata_hash: listing.metadata_hash,
    }))
}
