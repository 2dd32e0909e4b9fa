//! Choosing where `locate` gets its position from.

use storefinder_client::{FixedPosition, GeolocationProvider, HttpGeolocator};
use storefinder_core::{AppConfig, GeolocationErrorCode, Position, PositionOptions};

/// Geolocation source picked from flags and configuration.
pub(crate) enum Locator {
    Fixed(FixedPosition),
    Http(HttpGeolocator),
}

impl Locator {
    /// An explicit `--gps` position wins over the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when neither source is available or the configured
    /// endpoint URL is invalid.
    pub(crate) fn select(gps: Option<Position>, config: &AppConfig) -> anyhow::Result<Self> {
        if let Some(position) = gps {
            return Ok(Self::Fixed(FixedPosition(position)));
        }
        let url = config.geolocation_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "no geolocation source: pass --gps LAT,LNG or set STOREFINDER_GEOLOCATION_URL"
            )
        })?;
        Ok(Self::Http(HttpGeolocator::new(url, &config.user_agent)?))
    }
}

impl GeolocationProvider for Locator {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Position, GeolocationErrorCode> {
        match self {
            Self::Fixed(fixed) => fixed.current_position(options).await,
            Self::Http(http) => http.current_position(options).await,
        }
    }
}
