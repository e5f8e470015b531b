//! Query extractor that decodes and validates in one step.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    error::AppError,
    models::query::{QueryParams, decode_query},
};

/// Decoded and validated query-parameter bag.
///
/// Works like `axum::extract::Query`, but list keys may repeat and a decode
/// failure or a failed [`QueryParams::validate`] becomes
/// `AppError::InvalidRequest`, so the handler body (and the service behind
/// it) never runs on bad input.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: QueryParams,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default();
        let value: T = decode_query(raw).map_err(AppError::InvalidRequest)?;

        value.validate().map_err(AppError::InvalidRequest)?;

        Ok(Self(value))
    }
}
