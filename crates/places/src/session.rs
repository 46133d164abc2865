//! Presentation state for a map screen.
//!
//! A [`PlacesSession`] holds whatever the screen is showing: the last
//! successful result, the latest alert text, and the map region to centre on.
//! A failed load records a message and keeps the previous places on screen.

use crate::config::LocationConfig;
use crate::location::LocationOrigin;
use crate::service::NearbyPlacesService;
use nearby_geo::{Coordinate, RankedPlace};
use serde::{Deserialize, Serialize};

/// A map viewport: centre plus span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn around(center: Coordinate, delta: f64) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }
}

pub struct PlacesSession {
    service: NearbyPlacesService,
    places: Vec<RankedPlace>,
    query: Option<Coordinate>,
    origin: Option<LocationOrigin>,
    error: Option<String>,
    fallback: Coordinate,
    delta: f64,
}

impl PlacesSession {
    /// The initial region is centred on the configured fallback.
    pub fn new(service: NearbyPlacesService, location: &LocationConfig) -> Self {
        Self {
            service,
            places: Vec::new(),
            query: None,
            origin: None,
            error: None,
            fallback: location.fallback,
            delta: location.initial_delta,
        }
    }

    /// Fetch and rank. Returns `true` on success.
    ///
    /// On failure the error message is stored for display and the previously
    /// loaded places are left untouched.
    pub fn load(&mut self) -> bool {
        self.error = None;

        match self.service.get_nearby_places() {
            Ok(result) => {
                self.query = Some(result.query);
                self.origin = Some(result.origin);
                self.places = result.places;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, kept = self.places.len(), "Loading places failed");
                self.error = Some(e.user_message());
                false
            }
        }
    }

    pub fn places(&self) -> &[RankedPlace] {
        &self.places
    }

    /// The coordinate the current places were ranked around.
    pub fn query(&self) -> Option<Coordinate> {
        self.query
    }

    pub fn origin(&self) -> Option<&LocationOrigin> {
        self.origin.as_ref()
    }

    /// Alert text from the last failed load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Centred on the nearest place, or on the fallback before anything loads.
    pub fn region(&self) -> MapRegion {
        let center = self
            .places
            .first()
            .map(RankedPlace::location)
            .unwrap_or(self.fallback);
        MapRegion::around(center, self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, StaticCatalog};
    use crate::config::{PermissionPolicy, DEFAULT_FALLBACK};
    use crate::error::{PlacesError, PlacesResult};
    use crate::location::{DeviceLocationProvider, StaticPermission};
    use nearby_geo::Place;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Serves the demo catalog until told to fail.
    struct FlakyCatalog {
        broken: Arc<AtomicBool>,
    }

    impl CatalogProvider for FlakyCatalog {
        fn list_candidates(&self) -> PlacesResult<Vec<Place>> {
            if self.broken.load(Ordering::SeqCst) {
                Err(PlacesError::catalog("backend offline"))
            } else {
                StaticCatalog::demo().list_candidates()
            }
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    fn session_with(catalog: impl CatalogProvider + 'static) -> PlacesSession {
        let config = LocationConfig::default();
        let provider = DeviceLocationProvider::new(StaticPermission::GRANTED, &config);
        PlacesSession::new(NearbyPlacesService::new(provider, catalog), &config)
    }

    #[test]
    fn test_initial_region_is_fallback() {
        let session = session_with(StaticCatalog::demo());
        assert!(session.places().is_empty());
        assert_eq!(session.region(), MapRegion::around(DEFAULT_FALLBACK, 0.01));
    }

    #[test]
    fn test_load_success() {
        let mut session = session_with(StaticCatalog::demo());
        assert!(session.load());
        assert_eq!(session.places().len(), 5);
        assert_eq!(session.query(), Some(DEFAULT_FALLBACK));
        assert!(session.origin().unwrap().is_fallback());
        assert!(session.error().is_none());

        // Centred on the restaurant, the nearest place.
        let region = session.region();
        assert_eq!(region.latitude, 28.6135);
        assert_eq!(region.longitude, 77.2085);
    }

    #[test]
    fn test_failure_keeps_previous_places() {
        let broken = Arc::new(AtomicBool::new(false));
        let mut session = session_with(FlakyCatalog { broken: broken.clone() });

        assert!(session.load());
        broken.store(true, Ordering::SeqCst);
        assert!(!session.load());

        assert_eq!(session.places().len(), 5);
        assert_eq!(
            session.error(),
            Some("Failed to load places: Catalog error: backend offline")
        );

        session.clear_error();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_permission_denied_message() {
        let config = LocationConfig {
            on_permission_denied: PermissionPolicy::Fail,
            ..LocationConfig::default()
        };
        let provider = DeviceLocationProvider::new(StaticPermission::DENIED, &config);
        let mut session =
            PlacesSession::new(NearbyPlacesService::new(provider, StaticCatalog::demo()), &config);

        assert!(!session.load());
        assert_eq!(session.error(), Some("Location permission required"));
        assert!(session.places().is_empty());
    }

    #[test]
    fn test_successful_load_clears_old_error() {
        let broken = Arc::new(AtomicBool::new(true));
        let mut session = session_with(FlakyCatalog { broken: broken.clone() });

        assert!(!session.load());
        assert!(session.error().is_some());

        broken.store(false, Ordering::SeqCst);
        assert!(session.load());
        assert!(session.error().is_none());
    }
}
