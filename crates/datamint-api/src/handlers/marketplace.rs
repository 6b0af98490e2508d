//! Public marketplace: browse active listings and purchase access.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Duration, Utc};
use datamint_core::{models::Purchase, AppError};
use datamint_db::{with_transaction, NewPurchase};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MarketplaceListing {
    pub token_id: i64,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub price: rust_decimal::Decimal,
    pub currency: String,
    pub file_size: i64,
    pub file_type: String,
    pub seller_name: String,
    pub total_sales: i32,
    pub views: i32,
    pub analysis: serde_json::Value,
    pub created_at: chrono::DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/v0/marketplace",
    tag = "marketplace",
    responses(
        (status = 200, description = "Active listings with seller names", body = [MarketplaceListing])
    )
)]
pub async fn list_marketplace(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MarketplaceListing>>, HttpAppError> {
    let listings = state.listings.list_active().await?;

    let owner_ids: Vec<Uuid> = listings.iter().map(|l| l.owner_id).collect();
    let names: HashMap<Uuid, String> = state
        .users
        .get_names(&owner_ids)
        .await?
        .into_iter()
        .collect();

    let items = listings
        .into_iter()
        .map(|listing| MarketplaceListing {
            token_id: listing.token_id,
            title: listing.title,
            description: listing.description,
            categories: listing.categories,
            price: listing.price,
            currency: listing.currency,
            file_size: listing.file_size,
            file_type: listing.file_type,
            seller_name: names
                .get(&listing.owner_id)
                .cloned()
                .unwrap_or_else(|| "Unknown seller".to_string()),
            total_sales: listing.total_sales,
            views: listing.views,
            analysis: listing.analysis,
            created_at: listing.created_at,
        })
        .collect();

    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/v0/marketplace/{token_id}/purchase",
    tag = "marketplace",
    params(("token_id" = i64, Path, description = "Token identifier of the listing")),
    responses(
        (status = 200, description = "Purchase completed", body = Purchase),
        (status = 400, description = "Cannot purchase own listing or duplicate purchase", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn purchase(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(token_id): Path<i64>,
) -> Result<Json<Purchase>, HttpAppError> {
    let listing = state
        .listings
        .get_by_token_id(token_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    if listing.owner_id == user.user_id {
        return Err(
            AppError::BadRequest("You cannot purchase your own dataset".to_string()).into(),
        );
    }
    if state
        .purchases
        .has_purchased(user.user_id, listing.id)
        .await?
    {
        return Err(
            AppError::BadRequest("You already own access to this dataset".to_string()).into(),
        );
    }

    let transaction_hash = state
        .ledger
        .record_transfer(listing.token_id)
        .await
        .map_err(HttpAppError::from)?;

    let expires_at = Utc::now() + Duration::days(listing.access_duration_days as i64);
    let download_url = format!("/api/v0/datasets/{}/download", listing.token_id);

    let new_purchase = NewPurchase {
        buyer_id: user.user_id,
        seller_id: listing.owner_id,
        listing_id: listing.id,
        token_id: listing.token_id,
        title: listing.title.clone(),
        price: listing.price,
        currency: listing.currency.clone(),
        transaction_hash,
        download_url,
        expires_at,
    };

    // Purchase row and counters land together or not at all
    let purchases = state.purchases.clone();
    let listings = state.listings.clone();
    let users = state.users.clone();
    let purchase = with_transaction(&state.pool, move |tx| {
        Box::pin(async move {
            let purchase = purchases.create_purchase(tx, new_purchase).await?;
            listings
                .record_sale(tx, purchase.token_id, purchase.price)
                .await?;
            users
                .credit_earnings(tx, purchase.seller_id, purchase.price)
                .await?;
            Ok(purchase)
        })
    })
    .await
    .map_err(|err| {
        // Concurrent duplicate lands on UNIQUE (buyer_id, listing_id)
        if err.is_unique_violation() {
            AppError::BadRequest("You already own access to this dataset".to_string())
        } else {
            err
        }
    })?;

    tracing::info!(
        buyer_id = %user.user_id,
        seller_id = %listing.owner_id,
        token_id = listing.token_id,
        "purchase completed"
    );

    Ok(Json(purchase))
}
