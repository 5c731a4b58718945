//! Courtside checkout pricing and booking engine.
//!
//! A Rust/Axum sidecar service for the Courtside Youth Sports storefront.
//! The storefront owns presentation and payment capture; this service owns
//! the money math: camp checkout fee composition (discounts, add-ons,
//! processing surcharge) and trainer commission splits on paid bookings.

pub mod booking;
pub mod cache;
pub mod checkout;
pub mod error;
pub mod session;

use sqlx::PgPool;

pub use cache::AppCache;
pub use checkout::round_money;
pub use error::{AppError, Result};
pub use session::SessionStore;

/// Shared application state for route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            cache: AppCache::new(),
            sessions: SessionStore::new(),
        }
    }
}
