//! campus-nav - find your way around campus
//!
//! Search the bundled campus locations, inspect walkway data and run a
//! navigation session against a simulated location provider.

use campus_nav_cli::output::{self, Status};
use campus_nav_core::config::Config;
use campus_nav_core::error::exit_codes;
use campus_nav_geo::{GeoDataStore, GeoError};
use campus_nav_telemetry::{metrics, TelemetryConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

/// Campus navigation map from the command line
#[derive(Parser)]
#[command(name = "campus-nav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (otherwise discovered, or defaults)
    #[arg(short, long, global = true, env = "CAMPUS_NAV_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print collected metrics as JSON on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every campus location
    Locations {
        #[arg(long)]
        json: bool,
    },

    /// Find locations by name or category
    Search {
        /// Case-insensitive text; empty matches everything
        #[arg(default_value = "")]
        text: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the walkway paths drawn on the map
    Paths {
        #[arg(long)]
        json: bool,
    },

    /// Route from your position to a destination
    Navigate {
        /// Destination id or name (defaults to the last destination)
        #[arg(short, long)]
        to: Option<String>,

        /// Your position as "lat,lng" (defaults to the map center)
        #[arg(short, long, allow_hyphen_values = true)]
        from: Option<String>,

        /// Make the location provider fail with this status code
        #[arg(long, value_name = "CODE", conflicts_with = "from")]
        simulate_error: Option<u16>,

        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn wants_json(&self) -> bool {
        match self {
            Commands::Locations { json }
            | Commands::Search { json, .. }
            | Commands::Paths { json }
            | Commands::Navigate { json, .. }
            | Commands::Config { json } => *json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            if cli.command.wants_json() {
                println!("{}", output::error_json(&e));
            } else {
                Status::report(&e);
            }
            return exit(exit_codes::CONFIG_ERROR);
        }
    };

    let telemetry = &config.schema.telemetry;
    let _guard = match campus_nav_telemetry::init_with_config(TelemetryConfig {
        log_level: if cli.verbose {
            "debug".to_string()
        } else {
            telemetry.log_level.clone()
        },
        show_target: telemetry.show_target,
        json: telemetry.json,
        log_file: telemetry.log_file.as_ref().map(PathBuf::from),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            Status::warning(&format!("Logging disabled: {e}"));
            None
        }
    };

    let result = match cli.command {
        Commands::Locations { json } => load_data().and_then(|data| commands::locations::run(&data, json)),
        Commands::Search { text, json } => {
            load_data().and_then(|data| commands::search::run(&data, &text, json))
        }
        Commands::Paths { json } => {
            load_data().and_then(|data| commands::paths::run(&data, &config.schema, json))
        }
        Commands::Navigate {
            to,
            from,
            simulate_error,
            json,
        } => match load_data() {
            Ok(data) => {
                let args = commands::navigate::Args {
                    to,
                    from,
                    simulate_error,
                    json,
                };
                commands::navigate::run(data, &config.schema, args).await
            }
            Err(e) => Err(e),
        },
        Commands::Config { json } => commands::config::run(&config, json),
    };

    let code = result.unwrap_or_else(|e| {
        if let Some(geo) = e.downcast_ref::<GeoError>() {
            tracing::error!(code = geo.code() as u32, "{geo}");
            Status::error(&format!("Campus data failed to load: {geo}"));
            exit_codes::DATA_ERROR
        } else {
            Status::error(&format!("{e:#}"));
            exit_codes::FAILURE
        }
    });

    if cli.metrics {
        match serde_json::to_string_pretty(&metrics().export_json()) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => Status::warning(&format!("Could not export metrics: {e}")),
        }
    }

    exit(code)
}

/// The bundled data is compiled in; failing here means a broken build.
fn load_data() -> anyhow::Result<GeoDataStore> {
    Ok(GeoDataStore::bundled()?)
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
