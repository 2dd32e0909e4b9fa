//! Device position types shared by geolocation providers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A position fix. `accuracy` is the radius of uncertainty in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Request options for one acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the provider may return.
    pub maximum_age: Duration,
}

/// Why a position could not be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GeolocationErrorCode {
    #[error("PERMISSION_DENIED")]
    PermissionDenied,
    #[error("POSITION_UNAVAILABLE")]
    PositionUnavailable,
    #[error("TIMEOUT")]
    Timeout,
    #[error("UNKNOWN")]
    Unknown,
}

impl GeolocationErrorCode {
    /// Message shown to the user for this failure.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access was denied. Allow location access or enter coordinates manually."
            }
            Self::PositionUnavailable => {
                "Your location could not be determined. Try again or pick a city instead."
            }
            Self::Timeout => "Finding your location took too long. Please try again.",
            Self::Unknown => "An unknown error occurred while getting your location.",
        }
    }

    /// Whether a single low-accuracy retry is worth attempting.
    #[must_use]
    pub fn is_retriable(self) -> bool {
        matches!(self, Self::PositionUnavailable | Self::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALL: [GeolocationErrorCode; 4] = [
        GeolocationErrorCode::PermissionDenied,
        GeolocationErrorCode::PositionUnavailable,
        GeolocationErrorCode::Timeout,
        GeolocationErrorCode::Unknown,
    ];

    #[test]
    fn every_code_has_a_distinct_message() {
        let messages: HashSet<&str> = ALL.iter().map(|c| c.message()).collect();
        assert_eq!(messages.len(), ALL.len());
    }

    #[test]
    fn only_unavailable_and_timeout_retry() {
        let retriable: Vec<_> = ALL.into_iter().filter(|c| c.is_retriable()).collect();
        assert_eq!(
            retriable,
            vec![
                GeolocationErrorCode::PositionUnavailable,
                GeolocationErrorCode::Timeout
            ]
        );
    }

    #[test]
    fn codes_display_as_constant_names() {
        let names: Vec<String> = ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec!["PERMISSION_DENIED", "POSITION_UNAVAILABLE", "TIMEOUT", "UNKNOWN"]
        );
        let boxed: Box<dyn std::error::Error> = Box::new(GeolocationErrorCode::Timeout);
        assert_eq!(boxed.to_string(), "TIMEOUT");
    }
}
