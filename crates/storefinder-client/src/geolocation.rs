//! Position acquisition.
//!
//! [`acquire_position`] asks a [`GeolocationProvider`] for a high-accuracy
//! fix and, when that fails as unavailable or timed out, retries exactly
//! once in low-accuracy mode. Nothing else in the crate retries.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use storefinder_core::{GeolocationErrorCode, GeolocationSettings, Position, PositionOptions};

use crate::error::ClientError;

/// Source of device position fixes.
pub trait GeolocationProvider {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<Position, GeolocationErrorCode>> + Send;
}

/// Acquire a position, with one low-accuracy retry on transient failure.
///
/// # Errors
///
/// Returns the provider's error code when the first attempt fails with a
/// non-retriable code, or when the low-accuracy retry also fails.
pub async fn acquire_position<P: GeolocationProvider>(
    provider: &P,
    settings: &GeolocationSettings,
) -> Result<Position, GeolocationErrorCode> {
    let high = PositionOptions {
        high_accuracy: true,
        timeout: settings.high_accuracy_timeout(),
        maximum_age: settings.max_age(),
    };

    match provider.current_position(high).await {
        Ok(position) => Ok(position),
        Err(code) if code.is_retriable() => {
            tracing::warn!(%code, "high-accuracy position failed, retrying with low accuracy");
            let low = PositionOptions {
                high_accuracy: false,
                timeout: settings.low_accuracy_timeout(),
                maximum_age: settings.max_age(),
            };
            provider.current_position(low).await.inspect_err(|code| {
                tracing::warn!(%code, "low-accuracy position failed");
            })
        }
        Err(code) => {
            tracing::warn!(%code, "position request failed");
            Err(code)
        }
    }
}

/// A provider that always reports the same fix, for coordinates the user
/// typed in as their own location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub Position);

impl GeolocationProvider for FixedPosition {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<Position, GeolocationErrorCode> {
        Ok(self.0)
    }
}

/// Provider backed by an HTTP position endpoint.
///
/// Sends `GET {url}?highAccuracy=..&maximumAge=..` with the attempt's
/// timeout and expects `{ "latitude", "longitude", "accuracy" }`.
#[derive(Debug, Clone)]
pub struct HttpGeolocator {
    client: Client,
    url: Url,
}

impl HttpGeolocator {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `url` does not parse, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: parsed,
        })
    }
}

impl GeolocationProvider for HttpGeolocator {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Position, GeolocationErrorCode> {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("highAccuracy", &options.high_accuracy.to_string())
            .append_pair("maximumAge", &options.maximum_age.as_secs().to_string());

        tracing::debug!(%url, high_accuracy = options.high_accuracy, "requesting position");
        let response = self
            .client
            .get(url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| transport_code(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_code(status));
        }

        response
            .json::<Position>()
            .await
            .map_err(|e| transport_code(&e))
    }
}

fn transport_code(err: &reqwest::Error) -> GeolocationErrorCode {
    if err.is_timeout() {
        GeolocationErrorCode::Timeout
    } else if err.is_decode() {
        GeolocationErrorCode::Unknown
    } else {
        GeolocationErrorCode::PositionUnavailable
    }
}

fn status_code(status: StatusCode) -> GeolocationErrorCode {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GeolocationErrorCode::PermissionDenied,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GeolocationErrorCode::Timeout,
        s if s == StatusCode::NOT_FOUND || s.is_server_error() => {
            GeolocationErrorCode::PositionUnavailable
        }
        _ => GeolocationErrorCode::Unknown,
    }
}
