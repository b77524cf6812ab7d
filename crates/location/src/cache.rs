//! The cached location record and its storage slot

use mazeed_core::store::KeyValueStore;
use mazeed_core::ResultExt;
use mazeed_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Storage key of the single cached location slot
pub const LOCATION_STORAGE_KEY: &str = "mazeed_user_location";

/// Default time a cached reading stays fresh
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_millis(300_000);

/// A coordinate stamped with the time it was read from the device
///
/// Serialized as `{"latitude": .., "longitude": .., "timestamp": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedLocation {
    /// Position reported by the device
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Read time in epoch milliseconds
    pub timestamp: i64,
}

impl CachedLocation {
    /// Stamp `coordinate` with `timestamp`
    #[must_use]
    pub fn new(coordinate: Coordinate, timestamp: i64) -> Self {
        Self {
            coordinate,
            timestamp,
        }
    }

    /// Milliseconds elapsed between the reading and `now`
    ///
    /// Negative when `now` is earlier than the reading (clock moved back).
    #[must_use]
    pub fn age_millis(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// Whether the reading is still usable at `now`
    ///
    /// Fresh means `now - timestamp < max_age`; the boundary itself is stale.
    #[must_use]
    pub fn is_fresh(&self, now: i64, max_age: Duration) -> bool {
        let max_age_ms = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
        self.age_millis(now) < max_age_ms
    }
}

/// Typed access to the location slot of a [`KeyValueStore`]
#[derive(Clone)]
pub struct LocationCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl LocationCache {
    /// Use the default slot key in `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, LOCATION_STORAGE_KEY)
    }

    /// Use a custom slot key in `store`
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Slot key this cache reads and writes
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored record
    ///
    /// Unreadable storage and records that fail to parse are logged and
    /// reported as absent.
    #[must_use]
    pub fn load(&self) -> Option<CachedLocation> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key = %self.key, error = %err, "Could not read cached location");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key = %self.key, error = %err, "Ignoring corrupt cached location");
                None
            }
        }
    }

    /// Overwrite the stored record
    ///
    /// # Errors
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&self, record: &CachedLocation) -> mazeed_core::Result<()> {
        let json = serde_json::to_string(record)?;
        self.store
            .set(&self.key, &json)
            .context(format!("Saving cached location under {}", self.key))
    }

    /// Remove the stored record, returning whether one existed
    ///
    /// # Errors
    /// Returns an error if the storage backend fails.
    pub fn clear(&self) -> mazeed_core::Result<bool> {
        self.store.remove(&self.key)
    }
}

impl std::fmt::Debug for LocationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationCache")
            .field("key", &self.key)
            .field("store", &"<dyn KeyValueStore>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazeed_core::store::MemoryStore;

    const NOW: i64 = 1_760_000_000_000;

    fn record(timestamp: i64) -> CachedLocation {
        CachedLocation::new(Coordinate::new(24.7136, 46.6753), timestamp)
    }

    #[test]
    fn test_freshness_window() {
        assert!(record(NOW).is_fresh(NOW, DEFAULT_CACHE_DURATION));
        assert!(record(NOW - 299_999).is_fresh(NOW, DEFAULT_CACHE_DURATION));
        assert!(!record(NOW - 300_000).is_fresh(NOW, DEFAULT_CACHE_DURATION));
        assert!(!record(NOW - 301_000).is_fresh(NOW, DEFAULT_CACHE_DURATION));
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        // Wall-clock rollback is not guarded against.
        assert!(record(NOW + 60_000).is_fresh(NOW, DEFAULT_CACHE_DURATION));
    }

    #[test]
    fn test_zero_duration_is_never_fresh() {
        assert!(!record(NOW).is_fresh(NOW, Duration::ZERO));
    }

    #[test]
    fn test_json_layout() {
        let json = serde_json::to_value(record(NOW)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"latitude": 24.7136, "longitude": 46.6753, "timestamp": NOW})
        );
    }

    #[test]
    fn test_save_then_load() {
        let cache = LocationCache::new(Arc::new(MemoryStore::new()));
        assert!(cache.load().is_none());

        cache.save(&record(NOW)).unwrap();
        assert_eq!(cache.load(), Some(record(NOW)));
    }

    #[test]
    fn test_corrupt_record_is_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(LOCATION_STORAGE_KEY, "{not json").unwrap();

        let cache = LocationCache::new(store);
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_clear() {
        let cache = LocationCache::new(Arc::new(MemoryStore::new()));
        cache.save(&record(NOW)).unwrap();

        assert!(cache.clear().unwrap());
        assert!(cache.load().is_none());
        assert!(!cache.clear().unwrap());
    }
}
