//! Service layer behind the catalog endpoints.
//!
//! Handlers only see the [`TopupService`] trait. The production implementation
//! is [`ding_connect::DingConnectClient`], which talks to the top-up provider
//! over HTTP; tests substitute their own.

pub mod ding_connect;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::UpstreamError,
    models::query::{
        GetProductDescriptionsQuery, GetProductsQuery, GetPromotionDescriptionsQuery,
        GetPromotionsQuery, GetProviderStatusQuery, GetProvidersQuery, GetRegionsQuery,
    },
};

/// One async method per catalog operation.
///
/// Every method returns the provider's JSON document as-is. Implementations
/// must be shareable across request tasks.
#[async_trait]
pub trait TopupService: Send + Sync {
    /// Country, provider and region details for a phone number.
    async fn get_account_lookup(&self, account_number: String) -> Result<Value, UpstreamError>;

    async fn get_countries(&self) -> Result<Value, UpstreamError>;

    async fn get_currencies(&self) -> Result<Value, UpstreamError>;

    async fn get_product_descriptions(
        &self,
        query: GetProductDescriptionsQuery,
    ) -> Result<Value, UpstreamError>;

    async fn get_products(&self, query: GetProductsQuery) -> Result<Value, UpstreamError>;

    async fn get_promotion_descriptions(
        &self,
        query: GetPromotionDescriptionsQuery,
    ) -> Result<Value, UpstreamError>;

    async fn get_promotions(&self, query: GetPromotionsQuery) -> Result<Value, UpstreamError>;

    async fn get_providers(&self, query: GetProvidersQuery) -> Result<Value, UpstreamError>;

    async fn get_provider_status(
        &self,
        query: GetProviderStatusQuery,
    ) -> Result<Value, UpstreamError>;

    async fn get_regions(&self, query: GetRegionsQuery) -> Result<Value, UpstreamError>;
}
