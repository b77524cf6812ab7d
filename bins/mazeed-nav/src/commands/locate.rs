//! Current location command

use anyhow::Result;
use chrono::{DateTime, Utc};
use mazeed_cli::output::{format_coordinate, Status};
use mazeed_cli::progress;
use mazeed_core::config::Config;
use mazeed_core::store::FileStore;
use mazeed_geo::Coordinate;
use mazeed_location::{FixedLocator, LocationProvider, ProviderOptions};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Print the current location, from the cache or the device
///
/// `at` stands in for the device. Without it this host has no location
/// capability and only a fresh cached reading can be reported.
pub async fn run(config: &Config, at: Option<Coordinate>, json: bool) -> Result<()> {
    let section = &config.schema.location;
    let store = FileStore::new(section.storage_dir())?;
    debug!(dir = %store.dir().display(), "Using location store");

    let mut provider =
        LocationProvider::new(Arc::new(store)).with_options(ProviderOptions::from(section));
    if let Some(coord) = at {
        provider = provider.with_locator(Arc::new(FixedLocator::new(coord)));
    }

    let from_cache = provider.cached_location().is_some();
    let pb = if json || from_cache {
        progress::hidden()
    } else {
        progress::spinner("Waiting for a position fix...")
    };

    let result = provider.get_current_location().await;
    pb.finish_and_clear();
    let location = result.map_err(mazeed_core::Error::from)?;

    let source = if from_cache { "cache" } else { "device" };
    let read_at = DateTime::<Utc>::from_timestamp_millis(location.timestamp)
        .map_or_else(|| location.timestamp.to_string(), |t| t.to_rfc3339());

    if json {
        let output = json!({
            "latitude": location.coordinate.latitude,
            "longitude": location.coordinate.longitude,
            "timestamp": location.timestamp,
            "source": source,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header("Current location");
    Status::field("position", &format_coordinate(&location.coordinate));
    Status::field("read at", &read_at);
    Status::field("source", source);
    Ok(())
}
