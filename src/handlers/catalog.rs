//! Catalog HTTP handlers.
//!
//! This module implements the read-only `/api` endpoints:
//! - GET /api/GetAccountLookup - Provider/region details for a phone number
//! - GET /api/GetCountries - Supported countries
//! - GET /api/GetCurrencies - Supported currencies
//! - GET /api/GetProductDescriptions - Localized product strings
//! - GET /api/GetProducts - Products matching the filters
//! - GET /api/GetPromotionDescriptions - Localized promotion strings
//! - GET /api/GetPromotions - Promotions matching the filters
//! - GET /api/GetProviders - Providers available to the agent
//! - GET /api/GetProviderStatus - Current provider status
//! - GET /api/GetRegions - Supported regions
//!
//! Each handler forwards its decoded query to exactly one `TopupService`
//! method and returns the result unchanged. Errors are left to
//! `AppError`'s `IntoResponse`.

use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    AppState,
    error::AppError,
    extract::ValidatedQuery,
    models::query::{
        GetAccountLookupQuery, GetProductDescriptionsQuery, GetProductsQuery,
        GetPromotionDescriptionsQuery, GetPromotionsQuery, GetProviderStatusQuery,
        GetProvidersQuery, GetRegionsQuery,
    },
};

/// Look up a phone number.
///
/// # Query
///
/// - `accountNumber` (required)
///
/// # Response
///
/// - **Success (200 OK)**: provider document, unchanged
/// - **Error (400)**: missing or malformed `accountNumber`, or provider failure
/// - **Error (401)**: invalid API key
pub async fn get_account_lookup(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetAccountLookupQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(
        state.service.get_account_lookup(query.account_number).await?,
    ))
}

/// List supported countries. Any query string is ignored.
pub async fn get_countries(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_countries().await?))
}

/// List supported currencies. Any query string is ignored.
pub async fn get_currencies(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_currencies().await?))
}

pub async fn get_product_descriptions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetProductDescriptionsQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_product_descriptions(query).await?))
}

/// List products usable in a transfer.
///
/// # Query
///
/// `countryIsos`, `providerCodes`, `skuCodes`, `benefits`, `regionCodes`
/// (comma-separated lists) and `accountNumber`, all optional.
pub async fn get_products(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetProductsQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_products(query).await?))
}

pub async fn get_promotion_descriptions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetPromotionDescriptionsQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_promotion_descriptions(query).await?))
}

pub async fn get_promotions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetPromotionsQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_promotions(query).await?))
}

pub async fn get_providers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetProvidersQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_providers(query).await?))
}

pub async fn get_provider_status(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetProviderStatusQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_provider_status(query).await?))
}

/// List regions.
///
/// # Example
///
/// `GET /api/GetRegions?countryIso=US` forwards `countryIsos: ["US"]`.
pub async fn get_regions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetRegionsQuery>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.service.get_regions(query).await?))
}
