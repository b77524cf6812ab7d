//! Measurement formatting commands

use anyhow::Result;
use mazeed_core::{Error, ErrorCode};
use mazeed_geo::{format_distance, format_duration};

/// Print `meters` as a display distance
pub fn distance(meters: f64) -> Result<()> {
    println!("{}", format_distance(check("meters", meters)?));
    Ok(())
}

/// Print `seconds` as a display duration
pub fn duration(seconds: f64) -> Result<()> {
    println!("{}", format_duration(check("seconds", seconds)?));
    Ok(())
}

fn check(name: &str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::new(
            ErrorCode::InvalidInput,
            format!("{name} must be a finite, non-negative number, got {value}"),
        ))
    }
}
