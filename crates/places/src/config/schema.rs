//! Configuration schema definitions

use nearby_geo::{Coordinate, RankOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location used when the device cannot provide one (New Delhi).
pub const DEFAULT_FALLBACK: Coordinate = Coordinate::new(28.6139, 77.2090);

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlacesConfig {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location resolution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude/longitude span of the initial map region
    #[serde(default = "default_initial_delta")]
    pub initial_delta: f64,

    /// What to do when location permission is refused
    #[serde(default)]
    pub on_permission_denied: PermissionPolicy,

    /// Coordinate substituted when no device fix is available
    #[serde(default = "default_fallback")]
    pub fallback: Coordinate,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            initial_delta: default_initial_delta(),
            on_permission_denied: PermissionPolicy::default(),
        }
    }
}

fn default_fallback() -> Coordinate {
    DEFAULT_FALLBACK
}

fn default_initial_delta() -> f64 {
    0.01
}

/// Behaviour when the permission gate refuses location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    /// Rank around the fallback coordinate
    #[default]
    Fallback,
    /// Fail the request with `PermissionDenied`
    Fail,
}

/// Where candidate places come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,

    /// JSON file used when `source = "file"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Catalog provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// The built-in demo places
    #[default]
    Builtin,
    /// A JSON file of places
    File,
}

/// Result limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RankingConfig {
    /// Maximum places returned (0 = all)
    #[serde(default)]
    pub max_results: usize,

    /// Search radius in kilometers (0 = unbounded)
    #[serde(default)]
    pub radius_km: f64,
}

impl RankingConfig {
    /// Converts the zero-means-unbounded fields into ranking options.
    pub fn to_options(&self) -> RankOptions {
        RankOptions {
            max_results: (self.max_results > 0).then_some(self.max_results),
            radius_m: (self.radius_km > 0.0).then(|| self.radius_km * 1000.0),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
