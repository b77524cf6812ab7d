//! Cached current-location lookup
//!
//! [`LocationProvider::get_current_location`] answers from the storage slot
//! while the last reading is younger than the cache duration, and otherwise
//! asks the device for a fresh high-accuracy fix and stores it.

use crate::cache::{CachedLocation, LocationCache, DEFAULT_CACHE_DURATION};
use crate::clock::{Clock, SystemClock};
use crate::device::{DeviceLocator, PositionError, PositionOptions};
use crate::error::{LocationError, LocationResult};
use mazeed_core::store::KeyValueStore;
use mazeed_telemetry::{metrics, names};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Provider behaviour knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderOptions {
    /// How long a stored reading is served without asking the device
    pub cache_duration: Duration,
    /// Options passed to the device for each fresh fix
    pub position: PositionOptions,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            cache_duration: DEFAULT_CACHE_DURATION,
            position: PositionOptions::default(),
        }
    }
}

/// Current-location lookup with a single-slot cache
#[derive(Clone)]
pub struct LocationProvider {
    cache: LocationCache,
    locator: Option<Arc<dyn DeviceLocator>>,
    clock: Arc<dyn Clock>,
    options: ProviderOptions,
}

impl LocationProvider {
    /// Provider backed by `store` with no device capability
    ///
    /// Install a device with [`LocationProvider::with_locator`]; until then
    /// every cache miss fails with [`LocationError::CapabilityUnavailable`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cache: LocationCache::new(store),
            locator: None,
            clock: Arc::new(SystemClock),
            options: ProviderOptions::default(),
        }
    }

    /// Install the device location capability
    #[must_use]
    pub fn with_locator(mut self, locator: Arc<dyn DeviceLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Replace the wall clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the provider options
    #[must_use]
    pub fn with_options(mut self, options: ProviderOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options
    #[must_use]
    pub fn options(&self) -> &ProviderOptions {
        &self.options
    }

    /// Whether a device capability is installed
    #[must_use]
    pub fn has_locator(&self) -> bool {
        self.locator.is_some()
    }

    /// The stored reading, if it is still fresh
    ///
    /// Never touches the device.
    #[must_use]
    pub fn cached_location(&self) -> Option<CachedLocation> {
        let now = self.clock.now_millis();
        self.cache
            .load()
            .filter(|record| record.is_fresh(now, self.options.cache_duration))
    }

    /// Current location, from the cache when fresh, otherwise from the device
    ///
    /// A successful device fix overwrites the cached record. Failing to store
    /// it is logged; the fix is still returned.
    ///
    /// # Errors
    ///
    /// - [`LocationError::CapabilityUnavailable`] when the cache is stale or
    ///   empty and no device capability is installed
    /// - [`LocationError::LocationUnavailable`] when the device fails, is
    ///   denied permission, or does not answer within the timeout
    #[instrument(skip(self), fields(key = %self.cache.key()))]
    pub async fn get_current_location(&self) -> LocationResult<CachedLocation> {
        if let Some(record) = self.cached_location() {
            debug!(timestamp = record.timestamp, "Serving cached location");
            metrics().increment(names::LOCATION_CACHE_HIT);
            return Ok(record);
        }
        metrics().increment(names::LOCATION_CACHE_MISS);

        let Some(locator) = &self.locator else {
            metrics().increment(names::LOCATION_DEVICE_ERROR);
            warn!("No device location capability installed");
            return Err(LocationError::CapabilityUnavailable);
        };

        let position = self.options.position;
        let fix = tokio::time::timeout(position.timeout, locator.current_position(&position))
            .await
            .unwrap_or(Err(PositionError::Timeout(position.timeout)));

        let coordinate = fix.map_err(|source| {
            metrics().increment(names::LOCATION_DEVICE_ERROR);
            warn!(error = %source, "Device location request failed");
            LocationError::LocationUnavailable { source }
        })?;

        let record = CachedLocation::new(coordinate, self.clock.now_millis());
        if let Err(err) = self.cache.save(&record) {
            warn!(error = %err, "Could not persist fresh location");
        }

        debug!(
            latitude = record.coordinate.latitude,
            longitude = record.coordinate.longitude,
            "Stored fresh device location"
        );
        Ok(record)
    }

    /// Drop the cached reading so the next lookup queries the device
    ///
    /// # Errors
    /// Returns an error if the storage backend fails.
    pub fn clear_cache(&self) -> mazeed_core::Result<bool> {
        self.cache.clear()
    }
}

impl std::fmt::Debug for LocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationProvider")
            .field("cache", &self.cache)
            .field("has_locator", &self.locator.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
