//! Seller/buyer dashboard: own listings, own purchases, and account stats.

use axum::{extract::State, Json};
use datamint_core::{
    models::{Listing, Purchase},
    AppError,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::models::UserContext;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub listings: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub datasets_minted: i32,
    pub active_listings: usize,
    pub total_sales: i64,
    pub total_earnings: Decimal,
    pub total_views: i64,
    pub purchases_made: usize,
    pub category_breakdown: Vec<CategoryCount>,
}

#[utoipa::path(
    get,
    path = "/api/v0/dashboard/datasets",
    tag = "dashboard",
    responses((status = 200, description = "Caller's listings", body = [Listing])),
    security(("bearer_auth" = []))
)]
pub async fn my_datasets(
    State(state): State<Arc<AppState>>,
    user: UserContext,
) -> Result<Json<Vec<Listing>>, HttpAppError> {
    let listings = state.listings.list_by_owner(user.user_id).await?;
    Ok(Json(listings))
}

#[utoipa::path(
    get,
    path = "/api/v0/dashboard/purchases",
    tag = "dashboard",
    responses((status = 200, description = "Caller's purchases", body = [Purchase])),
    security(("bearer_auth" = []))
)]
pub async fn my_purchases(
    State(state): State<Arc<AppState>>,
    user: UserContext,
) -> Result<Json<Vec<Purchase>>, HttpAppError> {
    let purchases = state.purchases.list_by_buyer(user.user_id).await?;
    Ok(Json(purchases))
}

#[utoipa::path(
    get,
    path = "/api/v0/dashboard/stats",
    tag = "dashboard",
    responses((status = 200, description = "Caller's account stats", body = DashboardStats)),
    security(("bearer_auth" = []))
)]
pub async fn my_stats(
    State(state): State<Arc<AppState>>,
    user: UserContext,
) -> Result<Json<DashboardStats>, HttpAppError> {
    let account = state
        .users
        .get_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let listings = state.listings.list_by_owner(user.user_id).await?;
    let purchases = state.purchases.list_by_buyer(user.user_id).await?;
    let (total_sales, _) = state.purchases.seller_totals(user.user_id).await?;

    let mut by_category: std::collections::BTreeMap<String, usize> = Default::default();
    for listing in &listings {
        for category in &listing.categories {
            *by_category.entry(category.clone()).or_insert(0) += 1;
        }
    }
    let category_breakdown = by_category
        .into_iter()
        .map(|(category, listings)| CategoryCount { category, listings })
        .collect();

    let stats = DashboardStats {
        datasets_minted: account.datasets_minted,
        active_listings: listings
            .iter()
            .filter(|l| l.status == datamint_core::models::ListingStatus::Active)
            .count(),
        total_sales,
        total_earnings: account.total_earnings,
        total_views: listings.iter().map(|l| l.views as i64).sum(),
        purchases_made: purchases.len(),
        category_breakdown,
    };

    Ok(Json(stats))
}
