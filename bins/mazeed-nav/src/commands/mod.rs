//! CLI command implementations

pub mod cache;
pub mod distance;
pub mod format;
pub mod locate;
pub mod route;
