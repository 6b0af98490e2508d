//! Dataset analysis endpoint: accepts a multipart upload and returns the
//! analysis report for the uploader to review before minting.

use axum::{
    extract::{Multipart, State},
    Json,
};
use datamint_analysis::{AnalyzeInput, DatasetAnalysis};
use datamint_core::AppError;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub analysis: DatasetAnalysis,
}

#[utoipa::path(
    post,
    path = "/api/v0/analyze",
    tag = "analysis",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Dataset analyzed", body = AnalyzeResponse),
        (status = 400, description = "Missing or empty file", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, HttpAppError> {
    let mut input: Option<AnalyzeInput> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file: {}", e)))?;

        input = Some(AnalyzeInput {
            file_name,
            content_type,
            size_bytes: bytes.len() as u64,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        });
        break;
    }

    let input = input.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    if input.size_bytes == 0 {
        return Err(AppError::InvalidInput("File is empty".to_string()).into());
    }
    if input.size_bytes as usize > state.config.max_upload_size_bytes() {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            input.size_bytes,
            state.config.max_upload_size_bytes()
        ))
        .into());
    }

    tracing::info!(
        user_id = %user.user_id,
        file_name = %input.file_name,
        file_size = input.size_bytes,
        "analyzing dataset"
    );

    let analysis = state.analyzer.analyze_with_enrichment(&input).await;

    Ok(Json(AnalyzeResponse {
        file_name: input.file_name,
        file_size: input.size_bytes,
        file_type: input.content_type,
        analysis,
    }))
}
