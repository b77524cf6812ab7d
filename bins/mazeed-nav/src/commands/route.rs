//! Walking route command

use anyhow::Result;
use mazeed_cli::output::{format_count, format_coordinate, format_elapsed, Status};
use mazeed_cli::progress;
use mazeed_core::config::Config;
use mazeed_geo::{format_distance, format_duration, straight_line, Coordinate};
use mazeed_routing::{CancellationToken, Route, RouteResolver, RoutingConfig};
use serde_json::json;
use std::time::{Duration, Instant};

/// Resolve and print a walking route, or the straight-line estimate when
/// the routing service cannot provide one
pub async fn run(
    config: &Config,
    from: Coordinate,
    to: Coordinate,
    timeout: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut routing = RoutingConfig::from(&config.schema.routing)
        .with_env_overrides()
        .map_err(mazeed_core::Error::from)?;
    if let Some(secs) = timeout {
        routing = routing.with_timeout(Duration::from_secs(secs));
    }
    let resolver = RouteResolver::with_config(routing).map_err(mazeed_core::Error::from)?;

    let cancel = CancellationToken::new();
    let on_interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let pb = if json {
        progress::hidden()
    } else {
        progress::spinner("Resolving walking route...")
    };
    let started = Instant::now();
    let route = resolver
        .get_walking_route_with_cancel(from, to, &cancel)
        .await;
    let elapsed = started.elapsed();
    on_interrupt.abort();

    match route {
        Some(route) => {
            progress::finish_success(&pb, &format!("Route found in {}", format_elapsed(elapsed)));
            if json {
                print_route_json(&route)
            } else {
                print_route(from, to, &route);
                Ok(())
            }
        }
        None => {
            progress::finish_warning(&pb, "Walking route unavailable");
            print_fallback(from, to, json)
        }
    }
}

fn print_route(from: Coordinate, to: Coordinate, route: &Route) {
    Status::header("Walking route");
    Status::field("from", &format_coordinate(&from));
    Status::field("to", &format_coordinate(&to));
    Status::field("distance", &format_distance(route.distance));
    Status::field("duration", &format_duration(route.duration));
    Status::field("steps", &format_count(route.step_count(), "step", "steps"));

    for (index, step) in route.steps.iter().enumerate() {
        let instruction = step.instruction();
        match step.distance().filter(|d| *d > 0.0) {
            Some(meters) => Status::item(
                index + 1,
                &format!("{instruction} ({})", format_distance(meters)),
            ),
            None => Status::item(index + 1, &instruction),
        }
    }
}

fn print_route_json(route: &Route) -> Result<()> {
    let output = json!({
        "source": "route",
        "distance_meters": route.distance,
        "duration_seconds": route.duration,
        "distance": format_distance(route.distance),
        "duration": format_duration(route.duration),
        "geometry": route.geometry,
        "steps": route.steps,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_fallback(from: Coordinate, to: Coordinate, json: bool) -> Result<()> {
    let line = straight_line(&from, &to);

    if json {
        let output = json!({
            "source": "straight_line",
            "distance_meters": line.distance_meters,
            "distance": line.formatted,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::warning("Routing service unavailable, showing straight-line distance");
    Status::header("Straight-line distance");
    Status::field("from", &format_coordinate(&from));
    Status::field("to", &format_coordinate(&to));
    Status::field("distance", &line.formatted);
    Ok(())
}
