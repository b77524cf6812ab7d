//! Configuration loading and schema definitions
//!
//! Shared configuration types for the location, routing and telemetry layers.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
