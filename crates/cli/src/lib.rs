//! Terminal output helpers for Mazeed command-line tools
//!
//! Provides shared CLI functionality:
//! - Status messages and aligned fields
//! - Coordinate and latency formatting
//! - Spinners for network waits

#![warn(missing_docs)]

pub mod output;
pub mod progress;
