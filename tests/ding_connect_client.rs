//! Provider client tests against a local `httpmock` server.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use topup_gateway::{
    error::UpstreamError,
    models::query::{GetProductsQuery, GetRegionsQuery},
    services::{TopupService, ding_connect::DingConnectClient},
};

const PROVIDER_KEY: &str = "provider-key-xyz";

fn client_for(server: &MockServer) -> DingConnectClient {
    DingConnectClient::new(&server.base_url(), PROVIDER_KEY, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn account_lookup_sends_api_key_header_and_account_number() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/GetAccountLookup")
                .header("api_key", PROVIDER_KEY)
                .query_param("accountNumber", "15551234567");
            then.status(200).json_body(json!({
                "CountryIso": "US",
                "AccountNumberNormalized": "15551234567",
                "Items": [{ "ProviderCode": "ATUS", "RegionCode": "US" }],
                "ResultCode": 1,
                "ErrorCodes": []
            }));
        })
        .await;

    let body = client_for(&server)
        .get_account_lookup("15551234567".into())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body["CountryIso"], "US");
    assert_eq!(body["Items"][0]["ProviderCode"], "ATUS");
}

#[tokio::test]
async fn list_filters_are_sent_as_repeated_keys() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/GetProducts")
                .query_param("countryIsos", "GB")
                .query_param("countryIsos", "IE")
                .query_param("skuCodes", "GB_VF_10");
            then.status(200).json_body(json!({ "Items": [], "ResultCode": 1 }));
        })
        .await;

    let query = GetProductsQuery {
        country_isos: vec!["GB".into(), "IE".into()],
        sku_codes: vec!["GB_VF_10".into()],
        ..Default::default()
    };
    let body = client_for(&server).get_products(query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(body, json!({ "Items": [], "ResultCode": 1 }));
}

#[tokio::test]
async fn parameterless_operations_hit_their_paths() {
    let server = MockServer::start_async().await;
    let countries = server
        .mock_async(|when, then| {
            when.method(GET).path("/GetCountries");
            then.status(200)
                .json_body(json!({ "Items": [{ "CountryIso": "FR", "CountryName": "France" }] }));
        })
        .await;
    let currencies = server
        .mock_async(|when, then| {
            when.method(GET).path("/GetCurrencies");
            then.status(200)
                .json_body(json!({ "Items": [{ "CurrencyIso": "EUR", "CurrencyName": "Euro" }] }));
        })
        .await;

    let client = client_for(&server);
    let c = client.get_countries().await.unwrap();
    let cur = client.get_currencies().await.unwrap();

    countries.assert_async().await;
    currencies.assert_async().await;
    assert_eq!(c["Items"][0]["CountryIso"], "FR");
    assert_eq!(cur["Items"][0]["CurrencyIso"], "EUR");
}

#[tokio::test]
async fn non_success_status_becomes_rejected_with_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/GetRegions");
            then.status(401).json_body(json!({
                "ResultCode": 2,
                "ErrorCodes": [{ "Code": "AuthenticationFailed", "Context": null }]
            }));
        })
        .await;

    let err = client_for(&server)
        .get_regions(GetRegionsQuery::default())
        .await
        .unwrap_err();

    match err {
        UpstreamError::Rejected { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body["ErrorCodes"][0]["Code"], "AuthenticationFailed");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_becomes_null() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/GetCountries");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let err = client_for(&server).get_countries().await.unwrap_err();

    assert!(matches!(
        err,
        UpstreamError::Rejected { status: 503, ref body } if body.is_null()
    ));
}

#[tokio::test]
async fn malformed_success_body_is_a_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/GetCurrencies");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let err = client_for(&server).get_currencies().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport(_)));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP
    let client =
        DingConnectClient::new("http://127.0.0.1:9/api/V1", PROVIDER_KEY, Duration::from_secs(2))
            .unwrap();

    let err = client.get_countries().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport(_)));
}
