//! Cached device geolocation for Mazeed
//!
//! Looking up the user's position is slow and drains the battery, so the
//! [`LocationProvider`] keeps the last fix in a single storage slot
//! (`mazeed_user_location`) and serves it for five minutes before asking
//! the device again.
//!
//! The device itself sits behind the [`DeviceLocator`] port; storage sits
//! behind [`mazeed_core::store::KeyValueStore`].
//!
//! # Example
//!
//! ```rust,no_run
//! use mazeed_core::store::MemoryStore;
//! use mazeed_geo::Coordinate;
//! use mazeed_location::{FixedLocator, LocationProvider};
//! use std::sync::Arc;
//!
//! # async fn demo() -> mazeed_location::LocationResult<()> {
//! let provider = LocationProvider::new(Arc::new(MemoryStore::new()))
//!     .with_locator(Arc::new(FixedLocator::new(Coordinate::new(24.7136, 46.6753))));
//!
//! let here = provider.get_current_location().await?;
//! println!("{} (read at {})", here.coordinate, here.timestamp);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod clock;
pub mod device;
pub mod error;
pub mod provider;

#[doc(hidden)]
pub mod test_support;

pub use cache::{CachedLocation, LocationCache, DEFAULT_CACHE_DURATION, LOCATION_STORAGE_KEY};
pub use clock::{Clock, SystemClock};
pub use device::{DeviceLocator, FixedLocator, PositionError, PositionOptions};
pub use error::{LocationError, LocationResult};
pub use provider::{LocationProvider, ProviderOptions};

use mazeed_core::config::LocationSection;
use std::time::Duration;

impl From<&LocationSection> for ProviderOptions {
    fn from(section: &LocationSection) -> Self {
        Self {
            cache_duration: Duration::from_millis(section.cache_duration_ms),
            position: PositionOptions::default()
                .with_timeout(Duration::from_millis(section.timeout_ms))
                .with_high_accuracy(section.high_accuracy),
        }
    }
}
