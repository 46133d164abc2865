//! Error types for the places crate.

use nearby_geo::GeoError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for places operations.
pub type PlacesResult<T> = std::result::Result<T, PlacesError>;

/// Errors raised by catalog providers, location providers, and configuration.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Ranking rejected its input
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Reading a file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A catalog could not be loaded or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A catalog entry failed validation
    #[error("Invalid catalog entry #{index}: {source}")]
    InvalidEntry {
        /// Zero-based position in the catalog
        index: usize,
        /// Why the entry was rejected
        #[source]
        source: GeoError,
    },

    /// Configuration is invalid or unreadable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Location access was refused and the policy forbids falling back
    #[error("Location permission denied")]
    PermissionDenied,

    /// A platform location source failed
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),
}

/// Error code for programmatic handling.
/// Range: 11xxx for places errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesErrorCode {
    /// Wrapped geo error
    Geo = 11000,
    /// I/O failure
    Io = 11001,
    /// Catalog load or parse failure
    Catalog = 11002,
    /// Catalog entry rejected
    InvalidEntry = 11003,
    /// Configuration problem
    Config = 11004,
    /// Permission refused
    PermissionDenied = 11005,
    /// Location source failure
    LocationUnavailable = 11006,
}

impl PlacesError {
    /// Returns the error code for this error.
    pub fn code(&self) -> PlacesErrorCode {
        match self {
            PlacesError::Geo(_) => PlacesErrorCode::Geo,
            PlacesError::Io { .. } => PlacesErrorCode::Io,
            PlacesError::Catalog(_) => PlacesErrorCode::Catalog,
            PlacesError::InvalidEntry { .. } => PlacesErrorCode::InvalidEntry,
            PlacesError::Config(_) => PlacesErrorCode::Config,
            PlacesError::PermissionDenied => PlacesErrorCode::PermissionDenied,
            PlacesError::LocationUnavailable(_) => PlacesErrorCode::LocationUnavailable,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Message suitable for an alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            PlacesError::PermissionDenied => "Location permission required".to_string(),
            other => format!("Failed to load places: {other}"),
        }
    }

    /// True if the query or a candidate had a bad coordinate.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            PlacesError::Geo(e) => e.is_invalid_coordinate(),
            PlacesError::InvalidEntry { .. } => true,
            _ => false,
        }
    }
}
