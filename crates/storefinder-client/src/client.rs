//! HTTP client for the store service's nearby-stores endpoint.
//!
//! Wraps `reqwest` with query-string construction and translation of the
//! service's error bodies into [`QueryError`](storefinder_core::QueryError).

use std::time::Duration;

use reqwest::{Client, Url};
use storefinder_core::{ApiErrorBody, AppConfig, QueryError, SearchParameters, StoreResult};

use crate::error::ClientError;

const NEARBY_PATH: &str = "stores/nearby";

/// Radius sent when the query leaves it unset.
pub const DEFAULT_MAX_RADIUS_KM: f64 = 5.0;

/// Limit sent when the query leaves it unset.
pub const DEFAULT_LIMIT: i32 = 5;

/// Query for one nearby-stores request. Unset fields fall back to the
/// service defaults above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub max_radius_km: Option<f64>,
    pub limit: Option<i32>,
    pub only_open: Option<bool>,
}

impl From<&SearchParameters> for NearbyQuery {
    /// Zero or NaN radius and zero limit count as unset.
    fn from(params: &SearchParameters) -> Self {
        Self {
            latitude: params.latitude,
            longitude: params.longitude,
            max_radius_km: Some(params.max_radius_km).filter(|r| *r != 0.0 && !r.is_nan()),
            limit: Some(params.limit).filter(|l| *l != 0),
            only_open: Some(params.only_open),
        }
    }
}

/// Client for the store service.
///
/// Use [`StoreClient::from_config`] in the application or
/// [`StoreClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    base_url: Url,
}

impl StoreClient {
    /// Builds a client from the resolved application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ClientError::InvalidBaseUrl`] if the configured base
    /// URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8080/api/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ClientError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends below the API root
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches stores near the given parameters.
    ///
    /// The returned list is exactly what the service sent, in its order.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] when no response was received.
    /// - [`ClientError::Api`] on a non-2xx status, carrying the translated
    ///   [`QueryError`].
    /// - [`ClientError::Deserialize`] if a 2xx body is not a store array.
    pub async fn nearby_stores(
        &self,
        params: &SearchParameters,
    ) -> Result<Vec<StoreResult>, ClientError> {
        self.nearby(&NearbyQuery::from(params)).await
    }

    /// Like [`StoreClient::nearby_stores`] but with explicit unset fields.
    ///
    /// # Errors
    ///
    /// See [`StoreClient::nearby_stores`].
    pub async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<StoreResult>, ClientError> {
        let url = self.nearby_url(query)?;
        tracing::debug!(%url, "querying nearby stores");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = translate_error_body(status.as_u16(), &body);
            tracing::warn!(
                status = status.as_u16(),
                message = %error.message,
                field_errors = error.field_errors.len(),
                "store search failed"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                error,
            });
        }

        let stores: Vec<StoreResult> =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        tracing::debug!(count = stores.len(), "nearby stores received");
        Ok(stores)
    }

    /// Builds the endpoint URL with percent-encoded query parameters.
    fn nearby_url(&self, query: &NearbyQuery) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(NEARBY_PATH)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("latitude", &query.latitude.to_string());
            pairs.append_pair("longitude", &query.longitude.to_string());
            pairs.append_pair(
                "maxRadius",
                &query
                    .max_radius_km
                    .unwrap_or(DEFAULT_MAX_RADIUS_KM)
                    .to_string(),
            );
            pairs.append_pair("limit", &query.limit.unwrap_or(DEFAULT_LIMIT).to_string());
            pairs.append_pair("onlyOpen", &query.only_open.unwrap_or(false).to_string());
        }
        Ok(url)
    }
}

/// Turns a non-2xx body into a [`QueryError`]; bodies that are not the
/// service's error shape get a generic status message.
fn translate_error_body(status: u16, body: &str) -> QueryError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => QueryError::from_api_body(status, parsed),
        Err(_) => QueryError::from_status(status),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
