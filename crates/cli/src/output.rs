//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use mazeed_geo::Coordinate;
use owo_colors::OwoColorize;

/// Width of the label column used by [`Status::field`]
const LABEL_WIDTH: usize = 10;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print an aligned `label  value` line
    pub fn field(label: &str, value: &str) {
        println!("  {}  {}", pad_label(label).dimmed(), value);
    }

    /// Print a numbered list item
    pub fn item(index: usize, message: &str) {
        println!("  {} {}", format!("{index:>2}.").dimmed(), message);
    }
}

fn pad_label(label: &str) -> String {
    format!("{label:<LABEL_WIDTH$}")
}

/// Format a coordinate with hemisphere letters, e.g. `24.71360°N, 46.67530°E`
#[must_use]
pub fn format_coordinate(coord: &Coordinate) -> String {
    let ns = if coord.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if coord.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.5}°{ns}, {:.5}°{ew}",
        coord.latitude.abs(),
        coord.longitude.abs()
    )
}

/// Format an elapsed wall time for display
#[must_use]
pub fn format_elapsed(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{secs:.1}s")
    }
}

/// Format a count with singular/plural
#[must_use]
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
