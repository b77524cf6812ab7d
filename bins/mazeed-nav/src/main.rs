//! Mazeed navigation CLI
//!
//! Distance, walking routes and cached location from the command line.

use clap::{Parser, Subcommand};
use mazeed_cli::output::Status;
use mazeed_core::config::Config;
use mazeed_core::exit_codes;
use mazeed_geo::Coordinate;
use std::process::ExitCode;

mod commands;

use commands::{cache, distance, format, locate, route};

/// Walking distance, routes and location for Mazeed
#[derive(Parser)]
#[command(name = "mazeed-nav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to .mazeed.toml in the working directory)
    #[arg(short, long, global = true, env = "MAZEED_CONFIG")]
    config: Option<String>,

    /// Print collected metrics as JSON to stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Straight-line distance between two points
    Distance {
        /// Start as LAT,LNG
        #[arg(allow_hyphen_values = true)]
        from: Coordinate,

        /// End as LAT,LNG
        #[arg(allow_hyphen_values = true)]
        to: Coordinate,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Walking route between two points, with straight-line fallback
    Route {
        /// Start as LAT,LNG
        #[arg(allow_hyphen_values = true)]
        from: Coordinate,

        /// End as LAT,LNG
        #[arg(allow_hyphen_values = true)]
        to: Coordinate,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Request timeout in seconds (overrides configuration)
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Current location, served from the cache when fresh
    Locate {
        /// Report this position as the device fix
        #[arg(long, allow_hyphen_values = true, value_name = "LAT,LNG")]
        at: Option<Coordinate>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Format a raw measurement
    Format {
        #[command(subcommand)]
        target: FormatTarget,
    },

    /// Manage the cached location
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

impl Commands {
    /// Whether the command was asked for machine-readable output
    fn json(&self) -> bool {
        match self {
            Self::Distance { json, .. } | Self::Route { json, .. } | Self::Locate { json, .. } => {
                *json
            }
            Self::Format { .. } | Self::Cache { .. } => false,
        }
    }
}

#[derive(Subcommand)]
enum FormatTarget {
    /// Format meters, e.g. 1523 -> 1.5km
    Distance {
        /// Distance in meters
        meters: f64,
    },

    /// Format seconds, e.g. 4500 -> 1h 15m
    Duration {
        /// Duration in seconds
        seconds: f64,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove the cached location
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.command.json();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e, json),
    }
}

/// Print a failed command's error and map it to an exit status
///
/// With `--json` the error is written to stderr as a single-line
/// [`mazeed_core::error::ErrorReport`].
fn report_error(err: &anyhow::Error, json: bool) -> ExitCode {
    let core = err.downcast_ref::<mazeed_core::Error>();
    let code = core.map_or(exit_codes::FAILURE, |e| e.code.exit_code());

    match core.filter(|_| json) {
        Some(e) => match serde_json::to_string(&e.to_report()) {
            Ok(report) => eprintln!("{report}"),
            Err(_) => Status::error(&e.to_string()),
        },
        None => Status::error(&format!("{err:#}")),
    }

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let _guard = init_telemetry(&config, cli.verbose)?;

    let result = match cli.command {
        Commands::Distance { from, to, json } => distance::run(from, to, json),
        Commands::Route {
            from,
            to,
            json,
            timeout,
        } => route::run(&config, from, to, timeout, json).await,
        Commands::Locate { at, json } => locate::run(&config, at, json).await,
        Commands::Format { target } => match target {
            FormatTarget::Distance { meters } => format::distance(meters),
            FormatTarget::Duration { seconds } => format::duration(seconds),
        },
        Commands::Cache { action } => match action {
            CacheAction::Clear => cache::clear(&config),
        },
    };

    if cli.metrics {
        let export = mazeed_telemetry::metrics().export_json();
        eprintln!("{}", serde_json::to_string_pretty(&export)?);
    }

    result
}

fn init_telemetry(
    config: &Config,
    verbose: bool,
) -> anyhow::Result<Option<mazeed_telemetry::WorkerGuard>> {
    let section = &config.schema.telemetry;
    let log_level = if verbose {
        "mazeed_nav=debug,mazeed_core=debug,mazeed_location=debug,mazeed_routing=debug".to_string()
    } else {
        section.log_level.clone()
    };

    mazeed_telemetry::init_with_config(mazeed_telemetry::TelemetryConfig {
        log_level,
        json: section.json,
        log_file: section.log_file(),
        show_target: verbose,
        ..Default::default()
    })
}
