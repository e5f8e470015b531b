//! HTTP client for the Ding Connect top-up API.
//!
//! Every catalog operation maps to `GET {base_url}/{Operation}` with the
//! account's key in the `api_key` header. List filters go out as repeated
//! query keys. Responses are returned verbatim; there is no retry and no
//! caching.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::{
    error::UpstreamError,
    models::query::{
        GetAccountLookupQuery, GetProductDescriptionsQuery, GetProductsQuery,
        GetPromotionDescriptionsQuery, GetPromotionsQuery, GetProviderStatusQuery,
        GetProvidersQuery, GetRegionsQuery, QueryParams,
    },
    services::TopupService,
};

/// Provider client holding one pooled `reqwest::Client`.
#[derive(Clone)]
pub struct DingConnectClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl DingConnectClient {
    /// Build a client for `base_url`.
    ///
    /// A trailing slash is added to the base path so operation names join
    /// beneath it rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl`: base URL does not parse
    /// - `Transport`: the HTTP client could not be built
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get(
        &self,
        operation: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value, UpstreamError> {
        let url = self.base_url.join(operation)?;
        tracing::debug!(operation, params = query.len(), "Calling provider");

        let response = self
            .http
            .get(url)
            .header("api_key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Error documents are JSON when the provider produced one
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            tracing::warn!(operation, status = status.as_u16(), "Provider rejected request");
            return Err(UpstreamError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl TopupService for DingConnectClient {
    async fn get_account_lookup(&self, account_number: String) -> Result<Value, UpstreamError> {
        let query = GetAccountLookupQuery { account_number };
        self.get("GetAccountLookup", &query.query_pairs()).await
    }

    async fn get_countries(&self) -> Result<Value, UpstreamError> {
        self.get("GetCountries", &[]).await
    }

    async fn get_currencies(&self) -> Result<Value, UpstreamError> {
        self.get("GetCurrencies", &[]).await
    }

    async fn get_product_descriptions(
        &self,
        query: GetProductDescriptionsQuery,
    ) -> Result<Value, UpstreamError> {
        self.get("GetProductDescriptions", &query.query_pairs()).await
    }

    async fn get_products(&self, query: GetProductsQuery) -> Result<Value, UpstreamError> {
        self.get("GetProducts", &query.query_pairs()).await
    }

    async fn get_promotion_descriptions(
        &self,
        query: GetPromotionDescriptionsQuery,
    ) -> Result<Value, UpstreamError> {
        self.get("GetPromotionDescriptions", &query.query_pairs())
            .await
    }

    async fn get_promotions(&self, query: GetPromotionsQuery) -> Result<Value, UpstreamError> {
        self.get("GetPromotions", &query.query_pairs()).await
    }

    async fn get_providers(&self, query: GetProvidersQuery) -> Result<Value, UpstreamError> {
        self.get("GetProviders", &query.query_pairs()).await
    }

    async fn get_provider_status(
        &self,
        query: GetProviderStatusQuery,
    ) -> Result<Value, UpstreamError> {
        self.get("GetProviderStatus", &query.query_pairs()).await
    }

    async fn get_regions(&self, query: GetRegionsQuery) -> Result<Value, UpstreamError> {
        self.get("GetRegions", &query.query_pairs()).await
    }
}
