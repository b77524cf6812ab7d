//! Walking route resolution for Mazeed
//!
//! This crate asks an OSRM-compatible routing service for a walking route
//! between two points and normalises the answer into a [`Route`].
//!
//! # Features
//!
//! - **Graceful degradation**: failures become `None` so callers can show a
//!   straight-line estimate instead
//! - **Diagnostics**: [`RouteResolver::try_walking_route`] keeps the typed error
//! - **Cancellation**: abandon an in-flight request with a `CancellationToken`
//! - **Request correlation**: every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use mazeed_geo::{straight_line, Coordinate};
//! use mazeed_routing::RouteResolver;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = RouteResolver::new()?;
//!     let from = Coordinate::new(24.7136, 46.6753);
//!     let to = Coordinate::new(24.7743, 46.7386);
//!
//!     match resolver.get_walking_route(from, to).await {
//!         Some(route) => println!("{} m, {} steps", route.distance, route.steps.len()),
//!         None => println!("about {}", straight_line(&from, &to).formatted),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod osrm;
pub mod route;

pub use client::RouteResolver;
pub use config::RoutingConfig;
pub use error::{RoutingError, RoutingResult};
pub use route::{Route, RouteStep};
pub use tokio_util::sync::CancellationToken;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::RouteResolver;
    pub use crate::config::RoutingConfig;
    pub use crate::error::{RoutingError, RoutingResult};
    pub use crate::route::{Route, RouteStep};
    pub use tokio_util::sync::CancellationToken;
}
