//! Location providers.
//!
//! The ranking core only ever receives a coordinate. Deciding whether that
//! coordinate is a real device fix or the configured fallback happens here,
//! behind [`LocationProvider`].

use crate::config::{LocationConfig, PermissionPolicy};
use crate::error::{PlacesError, PlacesResult};
use nearby_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Platform check for "is location access granted?".
pub trait PermissionGate: Send + Sync {
    /// Current grant state.
    fn is_location_granted(&self) -> bool;

    /// Ask for access. Platforms without a prompt just report the current state.
    fn request(&self) -> bool {
        self.is_location_granted()
    }
}

/// A gate with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPermission(pub bool);

impl StaticPermission {
    pub const GRANTED: Self = Self(true);
    pub const DENIED: Self = Self(false);
}

impl PermissionGate for StaticPermission {
    fn is_location_granted(&self) -> bool {
        self.0
    }
}

/// One platform source of device fixes (GPS, network, ...).
pub trait LocationSource: Send + Sync {
    /// Name used in logs and in [`LocationOrigin::Device`].
    fn name(&self) -> &str;

    /// The most recent fix, or `None` if the source has never had one.
    fn last_known(&self) -> PlacesResult<Option<Coordinate>>;
}

/// A source that always reports the same fix (or none).
#[derive(Debug, Clone)]
pub struct FixedSource {
    name: String,
    fix: Option<Coordinate>,
}

impl FixedSource {
    pub fn new(name: impl Into<String>, fix: Option<Coordinate>) -> Self {
        Self {
            name: name.into(),
            fix,
        }
    }
}

impl LocationSource for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_known(&self) -> PlacesResult<Option<Coordinate>> {
        Ok(self.fix)
    }
}

/// Why the fallback coordinate was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The permission gate refused access
    PermissionDenied,
    /// No source had a usable fix
    NoFix,
}

/// Where the query coordinate came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationOrigin {
    /// A real fix from the named source
    Device { source: String },
    /// The configured fallback coordinate
    Fallback { reason: FallbackReason },
}

impl LocationOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LocationOrigin::Fallback { .. })
    }
}

/// A query coordinate together with its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub origin: LocationOrigin,
}

/// Produces the coordinate to rank around.
pub trait LocationProvider: Send + Sync {
    fn current_coordinate(&self) -> PlacesResult<ResolvedLocation>;
}

/// Resolves a location from a permission gate and an ordered list of sources,
/// substituting the fallback coordinate when no fix is available.
///
/// Without a grant the gate is asked once via [`PermissionGate::request`].
/// Sources are consulted in order (typically GPS, then network). A source that
/// errors or returns a non-finite fix is skipped.
pub struct DeviceLocationProvider {
    gate: Box<dyn PermissionGate>,
    sources: Vec<Box<dyn LocationSource>>,
    fallback: Coordinate,
    on_denied: PermissionPolicy,
}

impl DeviceLocationProvider {
    /// A provider with no sources that always resolves to the fallback.
    pub fn new(gate: impl PermissionGate + 'static, config: &LocationConfig) -> Self {
        Self {
            gate: Box::new(gate),
            sources: Vec::new(),
            fallback: config.fallback,
            on_denied: config.on_permission_denied,
        }
    }

    /// Append a source; earlier sources win.
    pub fn with_source(mut self, source: impl LocationSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    fn fallback(&self, reason: FallbackReason) -> ResolvedLocation {
        tracing::info!(fallback = %self.fallback, ?reason, "Using fallback location");
        ResolvedLocation {
            coordinate: self.fallback,
            origin: LocationOrigin::Fallback { reason },
        }
    }
}

impl LocationProvider for DeviceLocationProvider {
    fn current_coordinate(&self) -> PlacesResult<ResolvedLocation> {
        if !self.gate.is_location_granted() && !self.gate.request() {
            return match self.on_denied {
                PermissionPolicy::Fallback => Ok(self.fallback(FallbackReason::PermissionDenied)),
                PermissionPolicy::Fail => Err(PlacesError::PermissionDenied),
            };
        }

        for source in &self.sources {
            match source.last_known() {
                Ok(Some(fix)) if fix.is_finite() => {
                    tracing::debug!(source = source.name(), fix = %fix, "Using device location");
                    return Ok(ResolvedLocation {
                        coordinate: fix,
                        origin: LocationOrigin::Device {
                            source: source.name().to_string(),
                        },
                    });
                }
                Ok(Some(fix)) => {
                    tracing::warn!(source = source.name(), ?fix, "Ignoring non-finite fix");
                }
                Ok(None) => {
                    tracing::debug!(source = source.name(), "No fix from source");
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "Location source failed");
                }
            }
        }

        Ok(self.fallback(FallbackReason::NoFix))
    }
}
