//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Datamint API",
        version = "0.1.0",
        description = "Data marketplace API (v0): upload and analyze datasets, mint them as simulated tokens, and trade access on the marketplace. All endpoints are versioned under /api/v0/."
    ),
    modifiers(&SecurityAddon),
    paths(
        // Auth
        handlers::auth::signup,
        handlers::auth::login,
        // Analysis & minting
        handlers::analyze::analyze,
        handlers::mint::mint,
        // Dataset management
        handlers::datasets::update_dataset,
        handlers::datasets::delete_dataset,
        // Marketplace
        handlers::marketplace::list_marketplace,
        handlers::marketplace::purchase,
        handlers::contract::contract_info,
        // Dashboard
        handlers::dashboard::my_datasets,
        handlers::dashboard::my_purchases,
        handlers::dashboard::my_stats,
    ),
    tags(
        (name = "auth", description = "Account signup and login"),
        (name = "analysis", description = "Dataset analysis"),
        (name = "datasets", description = "Minting and listing management"),
        (name = "marketplace", description = "Browsing and purchasing"),
        (name = "dashboard", description = "Per-account listings, purchases, and stats")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_includes_all_routes() {
        let spec = get_openapi_spec();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.ends_with("/auth/signup")));
        assert!(paths.iter().any(|p| p.ends_with("/analyze")));
        assert!(paths.iter().any(|p| p.ends_with("/mint")));
        assert!(paths.iter().any(|p| p.contains("/marketplace")));
        assert!(paths.iter().any(|p| p.ends_with("/contract-info")));
        assert!(paths.iter().any(|p| p.contains("/dashboard/stats")));
    }
}
