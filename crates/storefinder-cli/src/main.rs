mod locate;
mod render;
mod session;

use clap::{Parser, Subcommand};
use storefinder_client::{SearchController, StoreClient};
use storefinder_core::{AppConfig, City, Position, SearchParameters};
use tracing_subscriber::EnvFilter;

use crate::locate::Locator;

#[derive(Debug, Parser)]
#[command(name = "storefinder")]
#[command(about = "Find nearby stores from the command line")]
struct Cli {
    /// Store service root; replaces STOREFINDER_API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search around explicit coordinates
    Search {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Maximum search radius in kilometres
        #[arg(long)]
        radius: Option<f64>,
        /// Maximum number of stores to return
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<i32>,
        /// Only show stores that are open now
        #[arg(long)]
        only_open: bool,
    },
    /// Search around a city from the city picker
    City {
        /// City name (case-insensitive)
        name: String,
    },
    /// List the cities the picker offers
    Cities,
    /// Search around your current location
    Locate {
        /// Use this position instead of asking a geolocation service ("LAT,LNG")
        #[arg(long, value_parser = parse_position, allow_hyphen_values = true)]
        gps: Option<Position>,
    },
    /// Interactive session replaying form, map and location events
    Session,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = storefinder_core::load_app_config(cli.base_url.as_deref())?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let cities = load_city_catalogue(&config)?;
    let client = StoreClient::from_config(&config)?;

    match cli.command {
        Some(Commands::Search {
            lat,
            lng,
            radius,
            limit,
            only_open,
        }) => {
            let defaults = SearchParameters::default();
            let params = SearchParameters {
                latitude: lat.unwrap_or(defaults.latitude),
                longitude: lng.unwrap_or(defaults.longitude),
                max_radius_km: radius.unwrap_or(defaults.max_radius_km),
                limit: limit.unwrap_or(defaults.limit),
                only_open,
            };
            let mut controller = SearchController::with_parameters(client, params);
            controller.submit().await;
            finish_one_shot(&controller)
        }
        Some(Commands::City { name }) => {
            let city = storefinder_core::find_city(&cities, &name).ok_or_else(|| {
                anyhow::anyhow!("unknown city '{name}'; run `storefinder cities` for the list")
            })?;
            let mut controller = SearchController::new(client);
            controller.set_from_city_selection(city).await;
            finish_one_shot(&controller)
        }
        Some(Commands::Cities) => {
            print!("{}", render::render_cities(&cities));
            Ok(())
        }
        Some(Commands::Locate { gps }) => {
            let locator = Locator::select(gps, &config)?;
            let mut controller = SearchController::new(client);
            controller
                .locate_and_search(&locator, &config.geolocation)
                .await;
            finish_one_shot(&controller)
        }
        Some(Commands::Session) | None => {
            session::run_session(SearchController::new(client), &config, &cities).await
        }
    }
}

fn load_city_catalogue(config: &AppConfig) -> anyhow::Result<Vec<City>> {
    match config.cities_path.as_deref() {
        Some(path) => {
            let cities = storefinder_core::load_cities(path)?;
            tracing::debug!(count = cities.len(), path = %path.display(), "loaded city catalogue");
            Ok(cities)
        }
        None => Ok(storefinder_core::builtin_cities()),
    }
}

/// Print the controller's view; a failed search exits non-zero.
fn finish_one_shot(controller: &SearchController) -> anyhow::Result<()> {
    print!("{}", render::render_view(controller, chrono::Local::now().time()));
    if controller.failure().is_some() {
        anyhow::bail!("search did not complete");
    }
    Ok(())
}

/// Parse `"LAT,LNG"` into a position with unknown accuracy.
fn parse_position(raw: &str) -> Result<Position, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{raw}'"))?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let longitude: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{lng}': {e}"))?;
    Ok(Position {
        latitude,
        longitude,
        accuracy: None,
    })
}

#[cfg(test)]
mod tests;
