pub mod app_config;
pub mod cities;
pub mod config;
pub mod field_errors;
pub mod geolocation;
pub mod params;
pub mod query_error;
pub mod store;
pub mod zoom;

pub use app_config::{AppConfig, GeolocationSettings};
pub use cities::{builtin_cities, find_city, load_cities, City, CitiesFile};
pub use config::{load_app_config, load_app_config_from_env, resolve_base_url, FALLBACK_BASE_URL};
pub use field_errors::{match_field_error, ErrorDisplay};
pub use geolocation::{GeolocationErrorCode, Position, PositionOptions};
pub use params::{ParamField, SearchParameters, LIMIT_RANGE, RADIUS_RANGE_KM};
pub use query_error::{ApiErrorBody, QueryError};
pub use store::StoreResult;
pub use zoom::{limit_delta, radius_for, ZoomTracker, DEFAULT_RADIUS_KM};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read cities file {path}: {source}")]
    CitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cities file: {0}")]
    CitiesFileParse(#[source] serde_yaml::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
