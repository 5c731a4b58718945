//! In-memory caching using moka
//!
//! Provides application-level caching for trainer rate rows. Rates change
//! rarely (an admin edit), so modest TTLs keep booking recording off the
//! database for the common case.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::booking::models::TrainerRate;
use crate::booking::queries;

/// Application cache holding trainer rates
#[derive(Clone)]
pub struct AppCache {
    /// Trainer rates (trainer_id -> TrainerRate)
    pub trainer_rates: Cache<Uuid, Arc<TrainerRate>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Trainer rates: 1000 entries, 15 min TTL, 5 min idle
            trainer_rates: Cache::builder()
                .max_capacity(1_000)
                .time_to_live(Duration::from_secs(15 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            trainer_rates_size: self.trainer_rates.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.trainer_rates.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate one trainer's rate, e.g. after an admin rate edit
    pub async fn invalidate_trainer(&self, trainer_id: Uuid) {
        self.trainer_rates.invalidate(&trainer_id).await;
        info!("Cache invalidated for trainer: {}", trainer_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub trainer_rates_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    // Initial warm-up
    warm_cache(&cache, &db).await;

    // Periodic refresh every 10 minutes
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with all active trainer rates
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::get_active_trainer_rates(db).await {
        Ok(rates) => {
            for rate in rates {
                cache
                    .trainer_rates
                    .insert(rate.trainer_id, Arc::new(rate))
                    .await;
            }
        }
        Err(e) => warn!("Failed to warm trainer rate cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
