//! Shared fixtures for router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use topup_gateway::{
    AppState, build_router,
    error::UpstreamError,
    middleware::auth::hash_api_key,
    models::query::{
        GetProductDescriptionsQuery, GetProductsQuery, GetPromotionDescriptionsQuery,
        GetPromotionsQuery, GetProviderStatusQuery, GetProvidersQuery, GetRegionsQuery,
    },
    services::TopupService,
};
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key-123";

/// A service call as the routing layer made it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AccountLookup(String),
    Countries,
    Currencies,
    ProductDescriptions(GetProductDescriptionsQuery),
    Products(GetProductsQuery),
    PromotionDescriptions(GetPromotionDescriptionsQuery),
    Promotions(GetPromotionsQuery),
    Providers(GetProvidersQuery),
    ProviderStatus(GetProviderStatusQuery),
    Regions(GetRegionsQuery),
}

impl Call {
    fn operation(&self) -> &'static str {
        match self {
            Call::AccountLookup(_) => "GetAccountLookup",
            Call::Countries => "GetCountries",
            Call::Currencies => "GetCurrencies",
            Call::ProductDescriptions(_) => "GetProductDescriptions",
            Call::Products(_) => "GetProducts",
            Call::PromotionDescriptions(_) => "GetPromotionDescriptions",
            Call::Promotions(_) => "GetPromotions",
            Call::Providers(_) => "GetProviders",
            Call::ProviderStatus(_) => "GetProviderStatus",
            Call::Regions(_) => "GetRegions",
        }
    }
}

/// In-memory `TopupService` that records every call.
///
/// Successful calls return `{"operation": <name>, "items": [...]}`. With
/// `failing`, every call returns a provider rejection instead.
#[derive(Default)]
pub struct RecordingService {
    calls: Mutex<Vec<Call>>,
    failure: Option<Value>,
}

impl RecordingService {
    pub fn failing(provider_body: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(provider_body),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, call: Call) -> Result<Value, UpstreamError> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);

        match &self.failure {
            Some(body) => Err(UpstreamError::Rejected {
                status: 400,
                body: body.clone(),
            }),
            None => Ok(json!({
                "operation": operation,
                "ResultCode": 1,
                "Items": [{ "Code": "X1" }]
            })),
        }
    }
}

#[async_trait]
impl TopupService for RecordingService {
    async fn get_account_lookup(&self, account_number: String) -> Result<Value, UpstreamError> {
        self.respond(Call::AccountLookup(account_number))
    }

    async fn get_countries(&self) -> Result<Value, UpstreamError> {
        self.respond(Call::Countries)
    }

    async fn get_currencies(&self) -> Result<Value, UpstreamError> {
        self.respond(Call::Currencies)
    }

    async fn get_product_descriptions(
        &self,
        query: GetProductDescriptionsQuery,
    ) -> Result<Value, UpstreamError> {
        self.respond(Call::ProductDescriptions(query))
    }

    async fn get_products(&self, query: GetProductsQuery) -> Result<Value, UpstreamError> {
        self.respond(Call::Products(query))
    }

    async fn get_promotion_descriptions(
        &self,
        query: GetPromotionDescriptionsQuery,
    ) -> Result<Value, UpstreamError> {
        self.respond(Call::PromotionDescriptions(query))
    }

    async fn get_promotions(&self, query: GetPromotionsQuery) -> Result<Value, UpstreamError> {
        self.respond(Call::Promotions(query))
    }

    async fn get_providers(&self, query: GetProvidersQuery) -> Result<Value, UpstreamError> {
        self.respond(Call::Providers(query))
    }

    async fn get_provider_status(
        &self,
        query: GetProviderStatusQuery,
    ) -> Result<Value, UpstreamError> {
        self.respond(Call::ProviderStatus(query))
    }

    async fn get_regions(&self, query: GetRegionsQuery) -> Result<Value, UpstreamError> {
        self.respond(Call::Regions(query))
    }
}

/// Router wired to `service`, accepting only [`TEST_API_KEY`].
pub fn build_test_app(service: Arc<RecordingService>) -> Router {
    build_test_app_with_cors(service, false)
}

pub fn build_test_app_with_cors(service: Arc<RecordingService>, allow_any_origin: bool) -> Router {
    let state = AppState::new(service, vec![hash_api_key(TEST_API_KEY)]);
    build_router(state, allow_any_origin)
}

/// Send a GET with the test bearer key and return status plus JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {TEST_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
