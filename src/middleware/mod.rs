//! HTTP middleware components.
//!
//! Middleware run before route handlers and can short-circuit a request
//! (reject unauthorized callers) before any extractor sees it.

/// API key authentication middleware
pub mod auth;
