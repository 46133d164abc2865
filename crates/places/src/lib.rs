//! Nearby places around the user's location.
//!
//! This crate wires the ranking core in `nearby-geo` to its collaborators:
//!
//! - **Catalogs**: where candidate places come from ([`CatalogProvider`])
//! - **Location**: permission gate, device sources and the fallback
//!   coordinate ([`LocationProvider`])
//! - **Configuration**: TOML file plus `NEARBY_*` environment overrides
//! - **Service**: resolve, list, rank ([`NearbyPlacesService`])
//! - **Session**: what a map screen shows between loads ([`PlacesSession`])
//!
//! # Example
//!
//! ```
//! use nearby_places::prelude::*;
//!
//! let config = PlacesConfig::default();
//! let location = DeviceLocationProvider::new(StaticPermission::DENIED, &config.location);
//! let service = NearbyPlacesService::new(location, StaticCatalog::demo());
//!
//! let result = service.get_nearby_places().unwrap();
//! assert!(result.origin.is_fallback());
//! assert_eq!(result.places[0].name(), "Restaurant");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod location;
pub mod service;
pub mod session;

pub use catalog::{CatalogProvider, FileCatalog, StaticCatalog};
pub use error::{PlacesError, PlacesErrorCode, PlacesResult};
pub use location::{
    DeviceLocationProvider, FallbackReason, FixedSource, LocationOrigin, LocationProvider,
    LocationSource, PermissionGate, ResolvedLocation, StaticPermission,
};
pub use service::{NearbyPlacesResult, NearbyPlacesService};
pub use session::{MapRegion, PlacesSession};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{CatalogProvider, FileCatalog, StaticCatalog};
    pub use crate::config::{Config, PlacesConfig};
    pub use crate::error::{PlacesError, PlacesResult};
    pub use crate::location::{
        DeviceLocationProvider, FixedSource, LocationProvider, PermissionGate, StaticPermission,
    };
    pub use crate::service::{NearbyPlacesResult, NearbyPlacesService};
    pub use crate::session::PlacesSession;
    pub use nearby_geo::{Coordinate, Place, RankOptions, RankedPlace};
}
