//! HTTP request handlers (route handlers).
//!
//! Handlers stay thin: they receive decoded request data, delegate to the
//! service layer and return its result as JSON.

/// Catalog endpoints under `/api`
pub mod catalog;
/// OpenAPI document endpoint
pub mod docs;
/// Liveness endpoint
pub mod health;
