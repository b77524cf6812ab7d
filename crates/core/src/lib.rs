//! Core utilities for Mazeed location tools
//!
//! This crate provides shared functionality used by the location, routing
//! and command-line crates:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults for every field
//! - **Storage**: A small key-value port with in-memory and file-backed slots
//!
//! # Example
//!
//! ```rust,no_run
//! use mazeed_core::config::Config;
//! use mazeed_core::store::{FileStore, KeyValueStore};
//!
//! let config = Config::load(None).expect("config should load");
//! let store = FileStore::new(config.schema.location.storage_dir()).expect("store");
//! store.set("greeting", "marhaba").expect("write");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod store;

pub use error::{exit_codes, Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
}
