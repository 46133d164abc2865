//! Configuration file loading

use super::schema::{CatalogSource, PlacesConfig};
use crate::error::{PlacesError, PlacesResult};
use nearby_geo::Coordinate;
use std::path::{Path, PathBuf};

/// File names searched in the working directory, in order.
const CANDIDATES: [&str; 3] = [
    ".nearby-places.toml",
    "nearby-places.toml",
    ".config/nearby-places.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub schema: PlacesConfig,
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: PlacesConfig::default(),
            path: None,
        }
    }
}

impl Config {
    /// Load configuration from a file path or the standard locations, then
    /// apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> PlacesResult<Self> {
        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => PlacesConfig::default(),
        };

        let mut config = Self {
            schema,
            path: config_path,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        tracing::debug!(path = ?config.path, "Configuration loaded");
        Ok(config)
    }

    /// Apply `NEARBY_*` overrides read through `lookup`.
    ///
    /// - `NEARBY_FALLBACK_LAT` / `NEARBY_FALLBACK_LON`: fallback coordinate
    /// - `NEARBY_CATALOG_PATH`: switch to a file catalog at this path
    /// - `NEARBY_LOG`: default log level
    pub fn apply_overrides<F>(&mut self, lookup: F) -> PlacesResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let location = &mut self.schema.location;
        if let Some(lat) = lookup("NEARBY_FALLBACK_LAT") {
            location.fallback.latitude = parse_f64("NEARBY_FALLBACK_LAT", &lat)?;
        }
        if let Some(lon) = lookup("NEARBY_FALLBACK_LON") {
            location.fallback.longitude = parse_f64("NEARBY_FALLBACK_LON", &lon)?;
        }

        if let Some(path) = lookup("NEARBY_CATALOG_PATH") {
            self.schema.catalog.source = CatalogSource::File;
            self.schema.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(level) = lookup("NEARBY_LOG") {
            self.schema.logging.level = level;
        }

        Ok(())
    }

    /// Reject settings that would make every query fail.
    pub fn validate(&self) -> PlacesResult<()> {
        let schema = &self.schema;

        validate_fallback(&schema.location.fallback)?;

        if !(schema.location.initial_delta.is_finite() && schema.location.initial_delta > 0.0) {
            return Err(PlacesError::config(format!(
                "location.initial_delta must be positive, got {}",
                schema.location.initial_delta
            )));
        }

        if !(schema.ranking.radius_km.is_finite() && schema.ranking.radius_km >= 0.0) {
            return Err(PlacesError::config(format!(
                "ranking.radius_km must be zero or positive, got {}",
                schema.ranking.radius_km
            )));
        }

        if schema.catalog.source == CatalogSource::File && schema.catalog.path.is_none() {
            return Err(PlacesError::config(
                "catalog.source = \"file\" requires catalog.path",
            ));
        }

        Ok(())
    }
}

fn validate_fallback(fallback: &Coordinate) -> PlacesResult<()> {
    fallback
        .ensure_valid("location.fallback")
        .map_err(|e| PlacesError::config(e.to_string()))
}

fn parse_f64(key: &str, value: &str) -> PlacesResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| PlacesError::config(format!("{key} is not a number: {value}")))
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .chain(dirs::config_dir().map(|dir| dir.join("nearby-places").join("config.toml")))
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> PlacesResult<PlacesConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| PlacesError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| {
        PlacesError::config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}
