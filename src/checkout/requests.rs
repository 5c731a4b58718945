//! Request DTOs for checkout API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One cart item as reported by the storefront.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemRequest {
    pub name: String,
    #[serde(default)]
    pub category: String,
}

/// Cart snapshot sent with every selection update and quote request.
#[derive(Debug, Deserialize)]
pub struct CartRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_subtotal: Decimal,
    pub items: Vec<CartItemRequest>,
}

/// Request to apply one selection update and recalculate.
///
/// `update` is raw JSON on purpose: malformed or unknown updates must no-op
/// rather than fail the request, so deserialization into `SelectionUpdate`
/// happens (and is allowed to fail) inside the handler.
#[derive(Debug, Deserialize)]
pub struct UpdateSelectionsRequest {
    pub cart: CartRequest,
    pub update: serde_json::Value,
}

/// Request to recalculate the quote without changing selections.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub cart: CartRequest,
}
