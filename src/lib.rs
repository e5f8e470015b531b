//! Top-up Gateway
//!
//! A read-only REST gateway in front of a mobile top-up provider. Every
//! `/api/*` endpoint decodes its query string, forwards it to one
//! [`services::TopupService`] method and returns the result unchanged.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Upstream**: Ding Connect HTTP API via reqwest
//! - **Authentication**: API key with SHA-256 hashing
//! - **Documentation**: OpenAPI document generated with utoipa
//! - **Format**: JSON responses

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header::AUTHORIZATION},
    middleware as axum_middleware,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::services::TopupService;

/// Shared state handed to every handler and to the auth middleware.
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn TopupService>,

    /// SHA-256 hex digests of the accepted bearer keys
    pub api_key_hashes: Arc<[String]>,
}

impl AppState {
    pub fn new(service: Arc<dyn TopupService>, api_key_hashes: Vec<String>) -> Self {
        Self {
            service,
            api_key_hashes: api_key_hashes.into(),
        }
    }
}

/// Build the HTTP router.
///
/// `/api/*` routes sit behind the API key middleware; `/health` and the
/// OpenAPI document are public.
pub fn build_router(state: AppState, allow_any_origin: bool) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/GetAccountLookup",
            get(handlers::catalog::get_account_lookup),
        )
        .route("/api/GetCountries", get(handlers::catalog::get_countries))
        .route("/api/GetCurrencies", get(handlers::catalog::get_currencies))
        .route(
            "/api/GetProductDescriptions",
            get(handlers::catalog::get_product_descriptions),
        )
        .route("/api/GetProducts", get(handlers::catalog::get_products))
        .route(
            "/api/GetPromotionDescriptions",
            get(handlers::catalog::get_promotion_descriptions),
        )
        .route("/api/GetPromotions", get(handlers::catalog::get_promotions))
        .route("/api/GetProviders", get(handlers::catalog::get_providers))
        .route(
            "/api/GetProviderStatus",
            get(handlers::catalog::get_provider_status),
        )
        .route("/api/GetRegions", get(handlers::catalog::get_regions))
        // Runs before the handlers' extractors, so bad credentials win over bad queries
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api-docs/openapi.json", get(handlers::docs::openapi_json))
        .merge(api_routes);

    if allow_any_origin {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([AUTHORIZATION]),
        );
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
