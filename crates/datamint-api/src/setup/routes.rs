//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use datamint_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{auth_middleware, AuthFailureLimiter, AuthState};
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret().to_string(),
        auth_failure_limiter: Arc::new(AuthFailureLimiter::new(
            config.auth_max_failures(),
            config.auth_failure_window_secs(),
        )),
    });

    let public_routes = Router::new()
        .route("/health/live", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/api/v0/auth/signup", post(handlers::auth::signup))
        .route("/api/v0/auth/login", post(handlers::auth::login))
        .route("/api/v0/marketplace", get(handlers::marketplace::list_marketplace))
        .route("/api/v0/contract-info", get(handlers::contract::contract_info))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        );

    let protected_routes = Router::new()
        .route("/api/v0/analyze", post(handlers::analyze::analyze))
        .route("/api/v0/mint", post(handlers::mint::mint))
        .route(
            "/api/v0/datasets/{token_id}",
            put(handlers::datasets::update_dataset).delete(handlers::datasets::delete_dataset),
        )
        .route(
            "/api/v0/marketplace/{token_id}/purchase",
            post(handlers::marketplace::purchase),
        )
        .route("/api/v0/dashboard/datasets", get(handlers::dashboard::my_datasets))
        .route("/api/v0/dashboard/purchases", get(handlers::dashboard::my_purchases))
        .route("/api/v0/dashboard/stats", get(handlers::dashboard::my_stats))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let app = public_routes
        .merge(protected_routes)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins?)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::AUTHORIZATION,
                axum::http::header::CONTENT_TYPE,
            ])
    };

    Ok(cors)
}
