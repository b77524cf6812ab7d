//! Cached location maintenance

use anyhow::Result;
use mazeed_cli::output::Status;
use mazeed_core::config::Config;
use mazeed_core::store::FileStore;
use mazeed_location::LocationCache;
use std::sync::Arc;

/// Remove the cached location record
pub fn clear(config: &Config) -> Result<()> {
    let store = FileStore::new(config.schema.location.storage_dir())?;
    let cache = LocationCache::new(Arc::new(store));

    if cache.clear()? {
        Status::success("Cleared cached location");
    } else {
        Status::info("No cached location to clear");
    }
    Ok(())
}
