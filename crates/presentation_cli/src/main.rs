//! geolocate CLI
//!
//! Forward and reverse geocoding from the command line.

#![allow(clippy::print_stdout)]

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use domain::{Coordinate, PlaceQuery, ZoomLevel};
use infrastructure::{AppConfig, init_logging};
use integration_geocoding::NominatimGeocodingClient;

use crate::commands::{EXIT_NOT_FOUND, Request};

/// geolocate CLI
#[derive(Parser)]
#[command(name = "geolocate")]
#[command(author, version, about = "Forward and reverse geocoding via Nominatim", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./geolocate.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Retry timeouts, unreachable providers and 429/5xx answers with backoff
    #[arg(long, global = true)]
    retry: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the coordinates of a place
    ///
    /// Example: geolocate forward --city Scottsbluff --state NE --country US
    Forward {
        /// City, town or village
        #[arg(long)]
        city: String,

        /// State, province or region
        #[arg(long, default_value = "")]
        state: String,

        /// Country name or code
        #[arg(long)]
        country: String,
    },

    /// Look up the address of a coordinate
    ///
    /// Example: geolocate reverse --lat 41.8666 --lon=-103.6672
    Reverse {
        /// Latitude in degrees (-90 to 90)
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees (-180 to 180)
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Precision from 0 (country) to 18 (building); defaults to the configured zoom
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(ZoomLevel::MAX)))]
        zoom: Option<u8>,
    },

    /// Check whether the geocoding provider is reachable
    Health,
}

impl Commands {
    fn into_request(self, default_zoom: ZoomLevel) -> anyhow::Result<Request> {
        Ok(match self {
            Self::Forward {
                city,
                state,
                country,
            } => Request::Forward(PlaceQuery::new(city, state, country)),
            Self::Reverse { lat, lon, zoom } => Request::Reverse {
                coordinate: Coordinate::new(lat, lon),
                zoom: zoom.map_or(Ok(default_zoom), ZoomLevel::new)?,
            },
            Self::Health => Request::Health,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    init_logging(&config.logging.clone().with_verbosity(cli.verbose))?;

    let client = NominatimGeocodingClient::new(&config.geocoding)?;
    let request = cli.command.into_request(config.geocoding.default_zoom)?;
    let retry = cli.retry.then_some(&config.retry);

    match commands::execute(&client, &request, retry).await {
        Ok(outcome) => {
            println!("{}", commands::render(&outcome, cli.json));
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
        Err(err) if err.is_not_found() => {
            println!("{}", commands::render_not_found(&err, cli.json));
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        },
        Err(err) => Err(err.into()),
    }
}
