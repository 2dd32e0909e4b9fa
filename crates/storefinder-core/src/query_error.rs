use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the store service on 4xx/5xx.
///
/// Every field is optional so that partial or proxy-generated bodies still
/// parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub timestamp: Option<String>,
    pub status: Option<u16>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub path: Option<String>,
    pub validation_errors: Option<BTreeMap<String, String>>,
}

/// A failed query, as shown to the user.
///
/// Lives for one query cycle: the controller clears it when the next
/// request is dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
    /// Server validation messages keyed by the service's field path
    /// (e.g. `getClosestStores.latitude`).
    pub field_errors: BTreeMap<String, String>,
}

impl QueryError {
    pub const TRANSPORT_MESSAGE: &'static str =
        "Unable to reach the store service. Check your connection and try again.";

    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    /// The request never produced a response.
    #[must_use]
    pub fn transport() -> Self {
        Self::new(Self::TRANSPORT_MESSAGE)
    }

    /// A response with `status` whose body was missing or not the
    /// service's error shape.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        Self::new(format!("Request failed with status {status}"))
    }

    /// Translate a parsed error body.
    ///
    /// The message prefers `message`, then `error`, then a generic status
    /// line.
    #[must_use]
    pub fn from_api_body(status: u16, body: ApiErrorBody) -> Self {
        let message = body
            .message
            .filter(|m| !m.trim().is_empty())
            .or(body.error.filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Self {
            message,
            field_errors: body.validation_errors.unwrap_or_default(),
        }
    }
}
