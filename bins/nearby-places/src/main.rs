//! nearby-places: rank places by distance from a location.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nearby_cli::output::{format_count, format_distance, Status};
use nearby_cli::table::{render_catalog, render_ranked};
use nearby_geo::{haversine_distance_meters, Coordinate, GeoError};
use nearby_places::catalog;
use nearby_places::config::{Config, PlacesConfig};
use nearby_places::{
    DeviceLocationProvider, FallbackReason, FixedSource, LocationOrigin, NearbyPlacesService,
    PlacesError, StaticPermission,
};
use nearby_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes for CLI commands
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
}

#[derive(Parser)]
#[command(name = "nearby-places")]
#[command(about = "Rank places by great-circle distance from a location")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress headers and summaries
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the catalog around a location (or the fallback)
    #[command(allow_negative_numbers = true)]
    Nearby(NearbyArgs),

    /// Great-circle distance between two coordinates
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
        /// Print kilometers instead of meters
        #[arg(long)]
        km: bool,
    },

    /// List the configured catalog
    Catalog,

    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct NearbyArgs {
    /// Device latitude; omit to use the fallback location
    #[arg(long, requires = "lon")]
    lat: Option<f64>,

    /// Device longitude
    #[arg(long, requires = "lat")]
    lon: Option<f64>,

    /// Behave as if location permission was refused
    #[arg(long)]
    deny_permission: bool,

    /// Maximum places to return (0 for all)
    #[arg(long)]
    max: Option<usize>,

    /// Only places within this many kilometers (0 for unbounded)
    #[arg(long)]
    radius_km: Option<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            return ExitCode::from(exit_codes::CONFIG_ERROR);
        }
    };

    let telemetry = TelemetryConfig {
        log_level: if cli.quiet {
            "error".to_string()
        } else {
            config.schema.logging.level.clone()
        },
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    }
    .with_verbosity(cli.verbose);
    if let Err(e) = nearby_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    tracing::debug!(config = ?config.path, "Configuration resolved");

    let result = match &cli.command {
        Commands::Nearby(args) => run_nearby(&config.schema, args, &cli),
        Commands::Distance { lat1, lon1, lat2, lon2, km } => {
            run_distance(Coordinate::new(*lat1, *lon1), Coordinate::new(*lat2, *lon2), *km, &cli)
        }
        Commands::Catalog => run_catalog(&config.schema, &cli),
        Commands::Config => run_config(&config, &cli),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            Status::error(&format!("{:#}", e));
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<PlacesError>() {
        if e.is_invalid_input() {
            return exit_codes::INVALID_INPUT;
        }
        if matches!(e, PlacesError::Config(_)) {
            return exit_codes::CONFIG_ERROR;
        }
    }
    if err.downcast_ref::<GeoError>().is_some() {
        return exit_codes::INVALID_INPUT;
    }
    exit_codes::FAILURE
}

fn run_nearby(config: &PlacesConfig, args: &NearbyArgs, cli: &Cli) -> Result<()> {
    let permission = StaticPermission(!args.deny_permission);
    let mut location = DeviceLocationProvider::new(permission, &config.location);
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let fix = Coordinate::new(lat, lon);
        fix.ensure_valid("query")?;
        location = location.with_source(FixedSource::new("cli", Some(fix)));
    }

    let mut options = config.ranking.to_options();
    if let Some(max) = args.max {
        options.max_results = (max > 0).then_some(max);
    }
    if let Some(radius_km) = args.radius_km {
        if !(radius_km.is_finite() && radius_km >= 0.0) {
            anyhow::bail!(PlacesError::config(format!(
                "--radius-km must be zero or positive, got {radius_km}"
            )));
        }
        options.radius_m = (radius_km > 0.0).then(|| radius_km * 1000.0);
    }

    let service = NearbyPlacesService::from_config(config, location)?.with_options(options);
    let result = service.get_nearby_places()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !cli.quiet {
        Status::header(&format!("Nearby places around {}", result.query));
        if let LocationOrigin::Fallback { reason } = &result.origin {
            let why = match reason {
                FallbackReason::PermissionDenied => "location permission denied",
                FallbackReason::NoFix => "no device location",
            };
            Status::warning(&format!("Using fallback location ({why})"));
        }
    }

    if result.places.is_empty() {
        Status::info("No places found");
    } else {
        println!("{}", render_ranked(&result.places));
    }

    if !cli.quiet {
        println!();
        Status::success(&format_count(result.places.len(), "place", "places"));
    }
    Ok(())
}

fn run_distance(from: Coordinate, to: Coordinate, km: bool, cli: &Cli) -> Result<()> {
    from.ensure_valid("first coordinate")?;
    to.ensure_valid("second coordinate")?;

    let meters = haversine_distance_meters(&from, &to);

    if cli.json {
        let value = serde_json::json!({ "from": from, "to": to, "meters": meters });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if km {
        println!("{:.3} km", meters / 1000.0);
    } else if cli.quiet {
        println!("{:.1}", meters);
    } else {
        println!("{} → {}: {} ({:.1} m)", from, to, format_distance(meters), meters);
    }
    Ok(())
}

fn run_catalog(config: &PlacesConfig, cli: &Cli) -> Result<()> {
    let provider = catalog::from_config(&config.catalog)?;
    let places = provider.list_candidates()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }

    if !cli.quiet {
        Status::header(&provider.describe());
    }
    if !places.is_empty() {
        println!("{}", render_catalog(&places));
    }
    if !cli.quiet {
        println!();
        Status::success(&format_count(places.len(), "place", "places"));
    }
    Ok(())
}

fn run_config(config: &Config, cli: &Cli) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&config.schema)?);
        return Ok(());
    }

    if !cli.quiet {
        match &config.path {
            Some(path) => Status::info(&format!("Loaded from {}", path.display())),
            None => Status::info("No config file found, using defaults"),
        }
    }
    print!("{}", toml::to_string_pretty(&config.schema)?);
    Ok(())
}
