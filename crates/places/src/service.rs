//! The nearby-places service: resolve a location, list the catalog, rank.

use crate::catalog::{self, CatalogProvider};
use crate::config::PlacesConfig;
use crate::error::PlacesResult;
use crate::location::{LocationOrigin, LocationProvider};
use nearby_geo::{rank_with_options, Coordinate, RankOptions, RankedPlace};
use nearby_telemetry::{metrics, Timer};
use serde::{Deserialize, Serialize};

/// One answer to "what is near me?".
///
/// The distances in `places` are only meaningful relative to `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlacesResult {
    /// Coordinate the places were ranked around
    pub query: Coordinate,
    /// Whether `query` is a device fix or the fallback
    pub origin: LocationOrigin,
    /// Closest first
    pub places: Vec<RankedPlace>,
}

/// Ranks a catalog around the location a provider resolves.
///
/// Holds no mutable state, so one instance can serve any number of requests.
pub struct NearbyPlacesService {
    location: Box<dyn LocationProvider>,
    catalog: Box<dyn CatalogProvider>,
    options: RankOptions,
}

impl NearbyPlacesService {
    pub fn new(
        location: impl LocationProvider + 'static,
        catalog: impl CatalogProvider + 'static,
    ) -> Self {
        Self {
            location: Box::new(location),
            catalog: Box::new(catalog),
            options: RankOptions::default(),
        }
    }

    /// Build a service whose catalog and limits come from configuration.
    pub fn from_config(
        config: &PlacesConfig,
        location: impl LocationProvider + 'static,
    ) -> PlacesResult<Self> {
        Ok(Self {
            location: Box::new(location),
            catalog: catalog::from_config(&config.catalog)?,
            options: config.ranking.to_options(),
        })
    }

    pub fn with_options(mut self, options: RankOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.catalog.as_ref()
    }

    /// Resolve the current location (device or fallback) and rank around it.
    pub fn get_nearby_places(&self) -> PlacesResult<NearbyPlacesResult> {
        let _timer = Timer::start("places.get_nearby");
        metrics().increment("places.requests");

        let resolved = self.location.current_coordinate()?;
        self.rank_from(resolved.coordinate, resolved.origin)
    }

    /// Rank around an explicit coordinate, skipping location resolution.
    pub fn rank_around(&self, query: Coordinate) -> PlacesResult<NearbyPlacesResult> {
        self.rank_from(
            query,
            LocationOrigin::Device {
                source: "explicit".to_string(),
            },
        )
    }

    fn rank_from(&self, query: Coordinate, origin: LocationOrigin) -> PlacesResult<NearbyPlacesResult> {
        let candidates = self.catalog.list_candidates()?;
        let ranking = rank_with_options(query, &candidates, &self.options)?;

        tracing::info!(
            query = %ranking.query,
            fallback = origin.is_fallback(),
            catalog = %self.catalog.describe(),
            returned = ranking.len(),
            "Nearby places ranked"
        );

        Ok(NearbyPlacesResult {
            query: ranking.query,
            origin,
            places: ranking.places,
        })
    }
}
