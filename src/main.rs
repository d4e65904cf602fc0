// Standard library
use std::error::Error;

// 3rd party crates
use clap::{Parser, Subcommand};
use tokio::signal::ctrl_c;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project imports
use geo_consensus::settings::ConfigManager;
use geo_consensus::{format_address, LocationEngine, LocationEstimate};

/// HTTP and Redis client internals only log errors.
const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "redis"];

/// Resolve a location from an IP address, coordinates or a place name.
#[derive(Debug, Parser)]
#[command(name = "geo-consensus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Locate an IP address by provider consensus.
    Ip {
        /// Address to locate; the public address of this host when omitted.
        #[arg(long)]
        ip: Option<String>,
        /// Session identifier used for caching.
        #[arg(long)]
        session: Option<String>,
    },
    /// Reverse geocode a coordinate.
    Coords {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Search places by name.
    Search { query: String },
    /// Resolve a place identifier through the geocoder that issued it.
    Place {
        place_id: String,
        /// Geocoder that issued the identifier (nominatim or google).
        #[arg(long, default_value = "nominatim")]
        source: String,
    },
}

#[tokio::main]
async fn main() {
    // loads the .env file from the current directory or parents.
    dotenvy::dotenv_override().ok();

    let cli = Cli::parse();

    let config = match ConfigManager::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to initialize configuration: {}", e);
            std::process::exit(2);
        }
    };

    let mut filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(config.get_log_level());
    for noisy in QUIET_TARGETS {
        if let Ok(directive) = format!("{}=error", noisy).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();

    info!("Settings loaded from {:?}", config.config_path);

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received shutdown signal, cancelling resolution...");
        signal_token.cancel();
    });

    if let Err(e) = run(cli.command, &config, &cancel).await {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(
    command: Command,
    config: &ConfigManager,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn Error>> {
    let engine = LocationEngine::from_settings(config.get_settings()).await?;

    match command {
        Command::Ip { ip, session } => {
            let estimate = engine
                .resolve_from_ip_with_cancel(ip.as_deref(), session.as_deref(), cancel)
                .await?;
            print_estimate(&estimate)?;
        }
        Command::Coords { lat, lon } => {
            let estimate = engine.resolve_from_coordinates(lat, lon).await?;
            print_estimate(&estimate)?;
        }
        Command::Search { query } => {
            let places = engine.search_location(&query).await?;
            println!("{}", serde_json::to_string_pretty(&places)?);
        }
        Command::Place { place_id, source } => {
            let estimate = engine.resolve_place(&place_id, &source).await?;
            print_estimate(&estimate)?;
        }
    }

    for (provider, stats) in engine.provider_metrics().await {
        info!(
            provider = %provider,
            attempts = stats.attempts,
            successes = stats.successes,
            failures = stats.failures,
            timeouts = stats.timeouts,
            "Provider metrics"
        );
    }
    Ok(())
}

fn print_estimate(estimate: &LocationEstimate) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(estimate)?);
    println!("{}", format_address(estimate));
    Ok(())
}
