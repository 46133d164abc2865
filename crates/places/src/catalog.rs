//! Catalog providers.
//!
//! A catalog is the ordered list of candidate places, independent of any
//! query. Ranking never depends on where the list came from.

use crate::config::{CatalogConfig, CatalogSource};
use crate::error::{PlacesError, PlacesResult};
use nearby_geo::Place;
use std::path::{Path, PathBuf};

/// Supplies the candidate places to rank.
pub trait CatalogProvider: Send + Sync {
    /// Returns the candidates in catalog order.
    fn list_candidates(&self) -> PlacesResult<Vec<Place>>;

    /// Short human-readable description of the source.
    fn describe(&self) -> String;
}

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    places: Vec<Place>,
}

impl StaticCatalog {
    /// Wraps an existing list of places.
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// The built-in demo places around New Delhi, plus one far-away entry.
    pub fn demo() -> Self {
        Self::new(vec![
            Place::new("Coffee Shop", 28.6145, 77.2095),
            Place::new("Restaurant", 28.6135, 77.2085),
            Place::new("Gas Station", 28.6150, 77.2100),
            Place::new("Pharmacy", 28.6130, 77.2080),
            Place::new("Bank", 25.2155, 55.2105),
        ])
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_candidates(&self) -> PlacesResult<Vec<Place>> {
        Ok(self.places.clone())
    }

    fn describe(&self) -> String {
        format!("built-in catalog ({} places)", self.places.len())
    }
}

/// A catalog read from a JSON array of `{name, latitude, longitude}` objects.
///
/// The file is re-read on every call so edits are picked up without a restart.
/// Unknown fields (for example a stale `distance`) are ignored.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for FileCatalog {
    fn list_candidates(&self) -> PlacesResult<Vec<Place>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| PlacesError::Io {
            path: self.path.clone(),
            source,
        })?;

        let places = parse_catalog(&content).map_err(|e| match e {
            PlacesError::Catalog(msg) => {
                PlacesError::catalog(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;

        tracing::debug!(path = %self.path.display(), count = places.len(), "Catalog file loaded");
        Ok(places)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

/// Parse and validate a JSON catalog.
pub fn parse_catalog(json: &str) -> PlacesResult<Vec<Place>> {
    let places: Vec<Place> =
        serde_json::from_str(json).map_err(|e| PlacesError::catalog(e.to_string()))?;

    for (index, place) in places.iter().enumerate() {
        place.validate().map_err(|source| {
            tracing::warn!(index, name = %place.name, error = %source, "Rejected catalog entry");
            PlacesError::InvalidEntry { index, source }
        })?;
    }

    Ok(places)
}

/// Build the provider selected by configuration.
pub fn from_config(config: &CatalogConfig) -> PlacesResult<Box<dyn CatalogProvider>> {
    match config.source {
        CatalogSource::Builtin => Ok(Box::new(StaticCatalog::demo())),
        CatalogSource::File => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| PlacesError::config("catalog.source = \"file\" requires catalog.path"))?;
            Ok(Box::new(FileCatalog::new(path)))
        }
    }
}
