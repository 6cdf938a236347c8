//! Caching layer for computed profiles.
//!
//! A profile depends only on the timetable, the date and the target, so it
//! can be shared by every query towards that target. Misses are computed on
//! the blocking thread pool; concurrent requests for the same key wait on a
//! single computation.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::join_all;
use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::{Journey, StationId};
use crate::router::{Profile, Router, RouterError};
use crate::timetable::Timetable;

/// Cache key: (date, target station).
type ProfileKey = (NaiveDate, StationId);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached profiles.
    pub ttl: Duration,

    /// Maximum number of cached profiles.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 64,
        }
    }
}

/// Router with a profile cache in front of it.
pub struct ProfileCache<T> {
    router: Arc<Router<T>>,
    profiles: MokaCache<ProfileKey, Arc<Profile<T>>>,
}

impl<T: Timetable + Send + Sync + 'static> ProfileCache<T> {
    /// Create a new cache around `router`.
    pub fn new(router: Router<T>, config: &CacheConfig) -> Self {
        let profiles = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            router: Arc::new(router),
            profiles,
        }
    }

    pub fn router(&self) -> &Router<T> {
        &self.router
    }

    /// Get the profile towards `target` on `date`, computing it if needed.
    ///
    /// Errors are shared between all callers waiting on the same computation
    /// and are not cached.
    pub async fn profile(
        &self,
        date: NaiveDate,
        target: StationId,
    ) -> Result<Arc<Profile<T>>, Arc<RouterError>> {
        let key = (date, target);
        if let Some(cached) = self.profiles.get(&key).await {
            debug!(%date, target = %target, "Profile cache hit");
            return Ok(cached);
        }

        debug!(%date, target = %target, "Profile cache miss");
        let router = Arc::clone(&self.router);
        let result = self
            .profiles
            .try_get_with(key, async move {
                tokio::task::spawn_blocking(move || router.compute_profile(date, target))
                    .await
                    .map_err(|e| RouterError::Worker(e.to_string()))?
                    .map(Arc::new)
            })
            .await;

        if let Err(e) = &result {
            warn!(%date, target = %target, error = %e, "Profile computation failed");
        }
        result
    }

    /// Get the profiles towards several targets, computing misses
    /// concurrently.
    ///
    /// Results are in the order of `targets`.
    pub async fn profiles_for(
        &self,
        date: NaiveDate,
        targets: &[StationId],
    ) -> Vec<Result<Arc<Profile<T>>, Arc<RouterError>>> {
        join_all(targets.iter().map(|&target| self.profile(date, target))).await
    }

    /// Journeys from `origin` to `target` on `date`.
    pub async fn journeys(
        &self,
        date: NaiveDate,
        origin: StationId,
        target: StationId,
    ) -> Result<Vec<Journey>, Arc<RouterError>> {
        let profile = self.profile(date, target).await?;
        profile.journeys(origin).map_err(Arc::new)
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.profiles.entry_count()
    }

    /// Invalidate all cached profiles.
    pub fn invalidate_all(&self) {
        self.profiles.invalidate_all();
    }
}
