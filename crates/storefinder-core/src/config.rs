use std::path::PathBuf;

use crate::app_config::{AppConfig, GeolocationSettings};
use crate::ConfigError;

/// Base URL used when neither a runtime nor a build-time value is present.
pub const FALLBACK_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Base URL baked in at compile time, if the build environment provided one.
const BUILD_TIME_BASE_URL: Option<&str> = option_env!("STOREFINDER_BUILD_API_BASE_URL");

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
/// A non-blank `base_url_override` takes the place of
/// `STOREFINDER_API_BASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config(base_url_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env(base_url_override)
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env(base_url_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), base_url_override)
}

/// Pick the store service base URL.
///
/// Precedence: runtime value, then build-time default, then
/// [`FALLBACK_BASE_URL`]. Blank values count as absent.
#[must_use]
pub fn resolve_base_url(runtime: Option<&str>, build_time: Option<&str>) -> String {
    [runtime, build_time]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(FALLBACK_BASE_URL)
        .to_string()
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F, base_url_override: Option<&str>) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let override_url = base_url_override.filter(|v| !v.trim().is_empty());
    let runtime_base_url = override_url
        .map(str::to_string)
        .or_else(|| optional("STOREFINDER_API_BASE_URL"));
    let base_url = resolve_base_url(runtime_base_url.as_deref(), BUILD_TIME_BASE_URL);
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        let var = if override_url.is_some() {
            "base URL override"
        } else {
            "STOREFINDER_API_BASE_URL"
        };
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{base_url}' is not an http(s) URL"),
        });
    }

    let log_level = or_default("STOREFINDER_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("STOREFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STOREFINDER_USER_AGENT", "storefinder/0.1 (store-locator)");
    let geolocation_url = optional("STOREFINDER_GEOLOCATION_URL");
    let cities_path = optional("STOREFINDER_CITIES_PATH").map(PathBuf::from);

    let geolocation = GeolocationSettings {
        high_accuracy_timeout_secs: parse_u64("STOREFINDER_GEO_HIGH_ACCURACY_TIMEOUT_SECS", "10")?,
        low_accuracy_timeout_secs: parse_u64("STOREFINDER_GEO_LOW_ACCURACY_TIMEOUT_SECS", "15")?,
        max_age_secs: parse_u64("STOREFINDER_GEO_MAX_AGE_SECS", "60")?,
    };

    Ok(AppConfig {
        base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        geolocation_url,
        geolocation,
        cities_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
