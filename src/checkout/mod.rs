//! Checkout pricing engine.
//!
//! Composes a camp cart's charge breakdown from discount rules, add-on
//! rules, and the card processing surcharge, with step-wise rounding. The
//! storefront calls this module over HTTP/JSON on every selection toggle.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{compose_breakdown, round_money};
pub use models::{CartState, ChargeBreakdown, CustomerSelections, FeeLineItem, UpgradePack};
pub use routes::router;
