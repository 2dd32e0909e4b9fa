use std::path::PathBuf;
use std::time::Duration;

/// Timeouts handed to geolocation providers for each accuracy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationSettings {
    pub high_accuracy_timeout_secs: u64,
    pub low_accuracy_timeout_secs: u64,
    pub max_age_secs: u64,
}

impl GeolocationSettings {
    #[must_use]
    pub fn high_accuracy_timeout(&self) -> Duration {
        Duration::from_secs(self.high_accuracy_timeout_secs)
    }

    #[must_use]
    pub fn low_accuracy_timeout(&self) -> Duration {
        Duration::from_secs(self.low_accuracy_timeout_secs)
    }

    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            high_accuracy_timeout_secs: 10,
            low_accuracy_timeout_secs: 15,
            max_age_secs: 60,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Store service root, e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Position endpoint for the HTTP geolocation provider. `None` disables it.
    pub geolocation_url: Option<String>,
    pub geolocation: GeolocationSettings,
    /// Optional YAML city catalogue replacing the built-in list.
    pub cities_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "geolocation_url",
                &self.geolocation_url.as_ref().map(|_| "[configured]"),
            )
            .field("geolocation", &self.geolocation)
            .field("cities_path", &self.cities_path)
            .finish()
    }
}
