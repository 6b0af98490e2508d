//! Owner-scoped listing management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use datamint_core::{
    models::{Listing, ListingStatus},
    AppError,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDatasetRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub categories: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
}

#[utoipa::path(
    put,
    path = "/api/v0/datasets/{token_id}",
    tag = "datasets",
    params(("token_id" = i64, Path, description = "Token identifier of the listing")),
    request_body = UpdateDatasetRequest,
    responses(
        (status = 200, description = "Listing updated", body = Listing),
        (status = 404, description = "Listing not found or not owned by caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_dataset(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(token_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateDatasetRequest>,
) -> Result<Json<Listing>, HttpAppError> {
    if let Some(price) = request.price {
        if price <= Decimal::ZERO {
            return Err(AppError::InvalidInput("Price must be positive".to_string()).into());
        }
    }
    if let Some(ref title) = request.title {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput("Title must not be empty".to_string()).into());
        }
    }
    if let Some(ref categories) = request.categories {
        if categories.is_empty() {
            return Err(
                AppError::InvalidInput("At least one category is required".to_string()).into(),
            );
        }
    }

    let listing = state
        .listings
        .update_listing(
            token_id,
            user.user_id,
            request.title,
            request.description,
            request.price,
            request.categories,
            request.status,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    Ok(Json(listing))
}

#[utoipa::path(
    delete,
    path = "/api/v0/datasets/{token_id}",
    tag = "datasets",
    params(("token_id" = i64, Path, description = "Token identifier of the listing")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 404, description = "Listing not found or not owned by caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_dataset(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(token_id): Path<i64>,
) -> Result<StatusCode, HttpAppError> {
    let deleted = state.listings.delete_listing(token_id, user.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Listing not found".to_string()).into());
    }

    tracing::info!(user_id = %user.user_id, token_id, "listing deleted");
    Ok(StatusCode::NO_CONTENT)
}
