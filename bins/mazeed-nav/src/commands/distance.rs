//! Straight-line distance command

use anyhow::Result;
use mazeed_cli::output::{format_coordinate, Status};
use mazeed_geo::{straight_line, Coordinate};
use serde_json::json;

/// Print the great-circle distance between two points
pub fn run(from: Coordinate, to: Coordinate, json: bool) -> Result<()> {
    let line = straight_line(&from, &to);

    if json {
        let output = json!({
            "from": from,
            "to": to,
            "distance_meters": line.distance_meters,
            "distance": line.formatted,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header("Straight-line distance");
    Status::field("from", &format_coordinate(&from));
    Status::field("to", &format_coordinate(&to));
    Status::field("distance", &line.formatted);
    Ok(())
}
