//! Nearest-first ranking of places around a query coordinate.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Ranking of a catalog of places by distance from a query, stable on ties
//! - Optional result limits (top N, radius)
//! - Parallel distance annotation behind the `parallel` feature
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use nearby_geo::{rank_by_distance, Coordinate, Place};
//!
//! let query = Coordinate::new(28.6139, 77.2090);
//! let catalog = vec![
//!     Place::new("Bank", 25.2155, 55.2105),
//!     Place::new("Coffee Shop", 28.6145, 77.2095),
//! ];
//!
//! let ranking = rank_by_distance(query, &catalog).unwrap();
//! assert_eq!(ranking.places[0].name(), "Coffee Shop");
//! ```

mod error;
mod haversine;
pub mod rank;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use rank::{rank_by_distance, rank_nearest, rank_with_options, rank_within_radius, RankOptions, RankedPlace, Ranking};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if neither component is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Returns true if the coordinate is finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Rejects NaN and infinite components. `what` names the input in the error.
    pub fn ensure_finite(&self, what: &str) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                what: what.to_string(),
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Rejects non-finite and out-of-range components.
    pub fn ensure_valid(&self, what: &str) -> Result<()> {
        self.ensure_finite(what)?;
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::OutOfRange {
                what: what.to_string(),
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// A candidate place in a catalog.
///
/// Serializes flat as `{"name", "latitude", "longitude"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Identifier shown to the user
    pub name: String,
    /// Where the place is
    #[serde(flatten)]
    pub location: Coordinate,
}

impl Place {
    /// Creates a place without validating it.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            location: Coordinate::new(latitude, longitude),
        }
    }

    /// Creates a place, rejecting an empty name or an invalid coordinate.
    pub fn try_new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let place = Self::new(name, latitude, longitude);
        place.validate()?;
        Ok(place)
    }

    /// Checks the name is non-empty and the coordinate is in range.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GeoError::EmptyName);
        }
        self.location.ensure_valid(&self.name)
    }
}
