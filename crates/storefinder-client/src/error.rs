use storefinder_core::QueryError;
use thiserror::Error;

/// Errors returned by the store search client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure; the service never answered.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("store service returned {status}: {error}")]
    Api { status: u16, error: QueryError },

    /// A 2xx body that is not a store list.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// Message and field errors to show the user for this failure.
    #[must_use]
    pub fn into_query_error(self) -> QueryError {
        match self {
            Self::Http(_) => QueryError::transport(),
            Self::Api { error, .. } => error,
            Self::Deserialize { .. } => {
                QueryError::new("The store service returned an unexpected response.")
            }
            Self::InvalidBaseUrl { base_url, .. } => {
                QueryError::new(format!("The store service address '{base_url}' is invalid."))
            }
        }
    }
}
