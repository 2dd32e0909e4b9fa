//! Routing server validation messages to form inputs.
//!
//! The store service keys validation errors by property path, which may be
//! the bare parameter (`latitude`) or qualified by the handler method
//! (`getClosestStores.latitude`). Ambiguous keys resolve to whichever
//! matches first.

use std::collections::BTreeMap;

use crate::params::ParamField;
use crate::query_error::QueryError;

/// Find the message for form field `name` among `errors`.
///
/// Tries, in order: an exact key, a key ending in `.name`, a key
/// containing `name`. Within each tier keys are scanned in sorted order.
#[must_use]
pub fn match_field_error<'a>(errors: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    let suffix = format!(".{name}");
    errors
        .get(name)
        .or_else(|| {
            errors
                .iter()
                .find(|(key, _)| key.ends_with(&suffix))
                .map(|(_, msg)| msg)
        })
        .or_else(|| {
            errors
                .iter()
                .find(|(key, _)| key.contains(name))
                .map(|(_, msg)| msg)
        })
        .map(String::as_str)
}

/// How a [`QueryError`] is presented: per-input markers plus, when no
/// input claimed a message, a banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDisplay {
    pub banner: Option<String>,
    pub fields: Vec<(ParamField, String)>,
}

impl ErrorDisplay {
    #[must_use]
    pub fn for_error(error: &QueryError) -> Self {
        let fields: Vec<(ParamField, String)> = ParamField::ALL
            .into_iter()
            .filter_map(|field| {
                match_field_error(&error.field_errors, field.wire_name())
                    .map(|msg| (field, msg.to_string()))
            })
            .collect();

        let banner = if fields.is_empty() {
            Some(error.message.clone())
        } else {
            None
        };

        Self { banner, fields }
    }

    /// A plain banner with no field markers (geolocation failures).
    #[must_use]
    pub fn banner(message: impl Into<String>) -> Self {
        Self {
            banner: Some(message.into()),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn message_for(&self, field: ParamField) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn exact_key_wins_over_suffix() {
        let map = errors(&[
            ("latitude", "exact"),
            ("getClosestStores.latitude", "qualified"),
        ]);
        assert_eq!(match_field_error(&map, "latitude"), Some("exact"));
    }

    #[test]
    fn suffix_key_matches() {
        let map = errors(&[("getClosestStores.limit", "Limit cannot exceed 50")]);
        assert_eq!(
            match_field_error(&map, "limit"),
            Some("Limit cannot exceed 50")
        );
    }

    #[test]
    fn substring_key_matches() {
        let map = errors(&[("maxRadiusKm", "must be at least 1")]);
        assert_eq!(
            match_field_error(&map, "maxRadius"),
            Some("must be at least 1")
        );
    }

    #[test]
    fn unrelated_key_does_not_match() {
        let map = errors(&[("radius", "bad")]);
        assert_eq!(match_field_error(&map, "latitude"), None);
    }

    #[test]
    fn validation_error_marks_field_without_banner() {
        let mut err = QueryError::new("invalid request parameters");
        err.field_errors = errors(&[("latitude", "must be >= -90")]);
        let display = ErrorDisplay::for_error(&err);
        assert_eq!(display.banner, None);
        assert_eq!(
            display.message_for(ParamField::Latitude),
            Some("must be >= -90")
        );
        assert_eq!(display.message_for(ParamField::Longitude), None);
    }

    #[test]
    fn unmatched_validation_keys_fall_back_to_banner() {
        let mut err = QueryError::new("invalid request parameters");
        err.field_errors = errors(&[("zoom", "not supported")]);
        let display = ErrorDisplay::for_error(&err);
        assert_eq!(display.banner.as_deref(), Some("invalid request parameters"));
        assert!(display.fields.is_empty());
    }

    #[test]
    fn generic_error_is_a_banner() {
        let display = ErrorDisplay::for_error(&QueryError::transport());
        assert_eq!(display.banner.as_deref(), Some(QueryError::TRANSPORT_MESSAGE));
    }
}
