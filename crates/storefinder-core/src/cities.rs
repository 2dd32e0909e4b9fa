use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A city the picker can jump to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CitiesFile {
    pub cities: Vec<City>,
}

/// Cities offered when no catalogue file is configured.
#[must_use]
pub fn builtin_cities() -> Vec<City> {
    vec![
        City::new("Amsterdam", 52.370_2, 4.895_2),
        City::new("Rotterdam", 51.924_4, 4.477_7),
        City::new("Den Haag", 52.070_5, 4.300_7),
        City::new("Utrecht", 52.090_7, 5.121_4),
        City::new("Eindhoven", 51.441_6, 5.469_7),
        City::new("Groningen", 53.219_4, 6.566_5),
        City::new("Tilburg", 51.555_1, 5.091_3),
        City::new("Almere", 52.350_8, 5.264_7),
        City::new("Breda", 51.571_9, 4.768_3),
        City::new("Nijmegen", 51.812_6, 5.837_2),
        City::new("Maastricht", 50.851_4, 5.691_0),
        City::new("Zwolle", 52.516_8, 6.083_0),
    ]
}

/// Case-insensitive lookup by city name.
#[must_use]
pub fn find_city<'a>(cities: &'a [City], name: &str) -> Option<&'a City> {
    let wanted = name.trim();
    cities.iter().find(|c| c.name.eq_ignore_ascii_case(wanted))
}

/// Load and validate a city catalogue from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_cities(path: &Path) -> Result<Vec<City>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CitiesFile = serde_yaml::from_str(&content).map_err(ConfigError::CitiesFileParse)?;

    validate_cities(&file.cities)?;

    Ok(file.cities)
}

fn validate_cities(cities: &[City]) -> Result<(), ConfigError> {
    if cities.is_empty() {
        return Err(ConfigError::Validation(
            "cities file must list at least one city".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for city in cities {
        if city.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "city name must be non-empty".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&city.latitude) || !(-180.0..=180.0).contains(&city.longitude)
        {
            return Err(ConfigError::Validation(format!(
                "city '{}' has out-of-range coordinates ({}, {})",
                city.name, city.latitude, city.longitude
            )));
        }

        if !seen.insert(city.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate city name: '{}'",
                city.name
            )));
        }
    }

    Ok(())
}
