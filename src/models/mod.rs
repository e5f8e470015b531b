//! Request and response types owned by the gateway.
//!
//! Response bodies of the catalog endpoints are not modelled here: they belong
//! to the provider and are passed through as raw JSON.

/// Query-parameter bags, one per parameterised operation
pub mod query;
/// JSON error envelope
pub mod error_response;
