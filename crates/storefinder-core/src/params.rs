//! Query parameters for the nearby-stores search.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Radius range the form accepts, in kilometres.
pub const RADIUS_RANGE_KM: RangeInclusive<f64> = 1.0..=100.0;

/// Result-limit range the form accepts.
pub const LIMIT_RANGE: RangeInclusive<i32> = 1..=50;

/// Parameters of one nearby-stores query.
///
/// The ranges above are advisory: manual input outside them is still sent
/// and the store service decides validity. Only map-driven limit changes
/// are clamped, via [`SearchParameters::apply_limit_delta`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "maxRadius")]
    pub max_radius_km: f64,
    pub limit: i32,
    pub only_open: bool,
}

impl Default for SearchParameters {
    /// Amsterdam city centre, 5 km, ten results.
    fn default() -> Self {
        Self {
            latitude: 52.3702,
            longitude: 4.8952,
            max_radius_km: 5.0,
            limit: 10,
            only_open: false,
        }
    }
}

impl SearchParameters {
    /// Copy of `self` with the coordinates replaced.
    #[must_use]
    pub fn with_coordinates(self, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..self
        }
    }

    /// Adjust the limit by `delta`, clamped to [`LIMIT_RANGE`].
    pub fn apply_limit_delta(&mut self, delta: i32) {
        self.limit = self
            .limit
            .saturating_add(delta)
            .clamp(*LIMIT_RANGE.start(), *LIMIT_RANGE.end());
    }
}

/// One editable field of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Latitude,
    Longitude,
    MaxRadius,
    Limit,
    OnlyOpen,
}

impl ParamField {
    pub const ALL: [Self; 5] = [
        Self::Latitude,
        Self::Longitude,
        Self::MaxRadius,
        Self::Limit,
        Self::OnlyOpen,
    ];

    /// Query-string name of the field, as the store service knows it.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::MaxRadius => "maxRadius",
            Self::Limit => "limit",
            Self::OnlyOpen => "onlyOpen",
        }
    }

    /// Write a raw form value into `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when `raw` does not parse as the
    /// field's type. Range checks are left to the store service.
    pub fn apply(self, params: &mut SearchParameters, raw: &str) -> Result<(), ConfigError> {
        let raw = raw.trim();
        let invalid = |expected: &str| {
            ConfigError::Validation(format!(
                "'{raw}' is not a valid {expected} for {}",
                self.wire_name()
            ))
        };
        match self {
            Self::Latitude => params.latitude = raw.parse().map_err(|_| invalid("number"))?,
            Self::Longitude => params.longitude = raw.parse().map_err(|_| invalid("number"))?,
            Self::MaxRadius => params.max_radius_km = raw.parse().map_err(|_| invalid("number"))?,
            Self::Limit => params.limit = raw.parse().map_err(|_| invalid("whole number"))?,
            Self::OnlyOpen => {
                params.only_open = match raw.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" | "on" => true,
                    "false" | "no" | "0" | "off" => false,
                    _ => return Err(invalid("boolean")),
                };
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for ParamField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl std::str::FromStr for ParamField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latitude" | "lat" => Ok(Self::Latitude),
            "longitude" | "lng" | "lon" => Ok(Self::Longitude),
            "maxradius" | "radius" => Ok(Self::MaxRadius),
            "limit" => Ok(Self::Limit),
            "onlyopen" | "open" => Ok(Self::OnlyOpen),
            other => Err(ConfigError::Validation(format!("unknown field '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_amsterdam() {
        let params = SearchParameters::default();
        assert!((params.latitude - 52.3702).abs() < f64::EPSILON);
        assert!((params.longitude - 4.8952).abs() < f64::EPSILON);
        assert_eq!(params.limit, 10);
        assert!(!params.only_open);
    }

    #[test]
    fn limit_delta_clamps_to_upper_bound() {
        let mut params = SearchParameters {
            limit: 45,
            ..SearchParameters::default()
        };
        params.apply_limit_delta(10);
        assert_eq!(params.limit, 50);
    }

    #[test]
    fn limit_delta_clamps_to_lower_bound() {
        let mut params = SearchParameters {
            limit: 3,
            ..SearchParameters::default()
        };
        params.apply_limit_delta(-10);
        assert_eq!(params.limit, 1);
    }

    #[test]
    fn limit_delta_zero_keeps_out_of_range_limit_clamped() {
        let mut params = SearchParameters {
            limit: 80,
            ..SearchParameters::default()
        };
        params.apply_limit_delta(0);
        assert_eq!(params.limit, 50);
    }

    #[test]
    fn apply_parses_each_field() {
        let mut params = SearchParameters::default();
        ParamField::Latitude.apply(&mut params, "51.9244").unwrap();
        ParamField::Longitude.apply(&mut params, " 4.4777 ").unwrap();
        ParamField::MaxRadius.apply(&mut params, "12.5").unwrap();
        ParamField::Limit.apply(&mut params, "20").unwrap();
        ParamField::OnlyOpen.apply(&mut params, "yes").unwrap();
        assert!((params.latitude - 51.9244).abs() < f64::EPSILON);
        assert!((params.longitude - 4.4777).abs() < f64::EPSILON);
        assert!((params.max_radius_km - 12.5).abs() < f64::EPSILON);
        assert_eq!(params.limit, 20);
        assert!(params.only_open);
    }

    #[test]
    fn apply_keeps_out_of_range_values() {
        let mut params = SearchParameters::default();
        ParamField::Latitude.apply(&mut params, "123").unwrap();
        assert!((params.latitude - 123.0).abs() < f64::EPSILON);
        ParamField::Limit.apply(&mut params, "75").unwrap();
        assert_eq!(params.limit, 75);
        ParamField::Limit.apply(&mut params, "-5").unwrap();
        assert_eq!(params.limit, -5);
        ParamField::MaxRadius.apply(&mut params, "0.2").unwrap();
        assert!(!RADIUS_RANGE_KM.contains(&params.max_radius_km));
    }

    #[test]
    fn apply_rejects_garbage() {
        let mut params = SearchParameters::default();
        let err = ParamField::Limit.apply(&mut params, "many").unwrap_err();
        assert!(err.to_string().contains("limit"), "got: {err}");
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("maxRadius".parse::<ParamField>().unwrap(), ParamField::MaxRadius);
        assert_eq!("LAT".parse::<ParamField>().unwrap(), ParamField::Latitude);
        assert!("zoom".parse::<ParamField>().is_err());
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(SearchParameters::default()).unwrap();
        assert!(json.get("maxRadius").is_some());
        assert!(json.get("onlyOpen").is_some());
    }
}
