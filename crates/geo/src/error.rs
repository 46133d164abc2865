//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    /// A latitude or longitude is NaN or infinite.
    #[error("Invalid coordinate: {what} ({latitude}, {longitude}) is not finite")]
    InvalidCoordinate {
        /// Which input was rejected ("query", or the candidate's name)
        what: String,
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// A coordinate is finite but outside [-90, 90] x [-180, 180].
    #[error("Coordinate out of range: {what} ({latitude}, {longitude})")]
    OutOfRange {
        /// Which input was rejected
        what: String,
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// A place was given an empty name.
    #[error("Place name must not be empty")]
    EmptyName,
}

/// Error code for programmatic handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Non-finite coordinate
    InvalidCoordinate = 10001,
    /// Coordinate outside the valid range
    OutOfRange = 10002,
    /// Empty place name
    EmptyName = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate { .. } => GeoErrorCode::InvalidCoordinate,
            GeoError::OutOfRange { .. } => GeoErrorCode::OutOfRange,
            GeoError::EmptyName => GeoErrorCode::EmptyName,
        }
    }

    /// True for both the non-finite and the out-of-range variants.
    pub fn is_invalid_coordinate(&self) -> bool {
        matches!(
            self,
            GeoError::InvalidCoordinate { .. } | GeoError::OutOfRange { .. }
        )
    }
}
