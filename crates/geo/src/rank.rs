//! Nearest-first ranking of a catalog with optional parallelism.
//!
//! Every ranking validates the query and each candidate first, annotates the
//! candidates with their haversine distance in meters, then stable-sorts them
//! ascending so equal distances keep catalog order.

use crate::{haversine_distance_meters, Coordinate, Place, Result};
use serde::{Deserialize, Serialize};

/// A place annotated with its distance from a query.
///
/// Serializes as `{"name", "latitude", "longitude", "distance"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlace {
    /// The catalog entry, unchanged
    #[serde(flatten)]
    pub place: Place,
    /// Great-circle distance from the query in meters
    #[serde(rename = "distance")]
    pub distance_meters: f64,
}

impl RankedPlace {
    /// The place name.
    pub fn name(&self) -> &str {
        &self.place.name
    }

    /// The place coordinate.
    pub fn location(&self) -> Coordinate {
        self.place.location
    }
}

/// A ranked result set together with the query that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// Reference point all distances are measured from
    pub query: Coordinate,
    /// Places sorted by distance, closest first
    pub places: Vec<RankedPlace>,
}

impl Ranking {
    /// The closest place, if any.
    pub fn nearest(&self) -> Option<&RankedPlace> {
        self.places.first()
    }

    /// Number of ranked places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// True if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Limits applied after ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RankOptions {
    /// Keep at most this many places (None for all)
    pub max_results: Option<usize>,
    /// Drop places farther than this many meters (None for unbounded)
    pub radius_m: Option<f64>,
}

impl RankOptions {
    /// Keep only the closest `max` places.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Keep only places within `radius_m` meters.
    pub fn with_radius_m(mut self, radius_m: f64) -> Self {
        self.radius_m = Some(radius_m);
        self
    }
}

/// Rank every place in `catalog` by distance from `query`, closest first.
///
/// Fails with [`GeoError::InvalidCoordinate`](crate::GeoError::InvalidCoordinate)
/// if the query or any candidate has a NaN or infinite component. An empty
/// catalog yields an empty ranking.
///
/// # Example
/// ```
/// use nearby_geo::{rank_by_distance, Coordinate, Place};
///
/// let query = Coordinate::new(28.6139, 77.2090);
/// let catalog = vec![
///     Place::new("Gas Station", 28.6150, 77.2100),
///     Place::new("Restaurant", 28.6135, 77.2085),
/// ];
///
/// let ranking = rank_by_distance(query, &catalog).unwrap();
/// assert_eq!(ranking.places[0].name(), "Restaurant");
/// assert!(ranking.places[0].distance_meters < ranking.places[1].distance_meters);
/// ```
pub fn rank_by_distance(query: Coordinate, catalog: &[Place]) -> Result<Ranking> {
    rank_with_options(query, catalog, &RankOptions::default())
}

/// Rank and keep only the closest `max_results` places.
pub fn rank_nearest(query: Coordinate, catalog: &[Place], max_results: usize) -> Result<Ranking> {
    rank_with_options(query, catalog, &RankOptions::default().with_max_results(max_results))
}

/// Rank and keep only places within `radius_m` meters of the query.
pub fn rank_within_radius(query: Coordinate, catalog: &[Place], radius_m: f64) -> Result<Ranking> {
    rank_with_options(query, catalog, &RankOptions::default().with_radius_m(radius_m))
}

/// Rank with the given limits applied.
pub fn rank_with_options(query: Coordinate, catalog: &[Place], options: &RankOptions) -> Result<Ranking> {
    query.ensure_finite("query")?;
    for place in catalog {
        place.location.ensure_finite(&place.name)?;
    }

    let mut places = annotate(&query, catalog);

    if let Some(radius) = options.radius_m {
        places.retain(|p| p.distance_meters <= radius);
    }

    sort_nearest_first(&mut places);

    if let Some(max) = options.max_results {
        places.truncate(max);
    }

    tracing::debug!(
        query = %query,
        candidates = catalog.len(),
        ranked = places.len(),
        "Ranked places by distance"
    );

    Ok(Ranking { query, places })
}

/// Stable sort so ties keep their catalog order.
fn sort_nearest_first(places: &mut [RankedPlace]) {
    places.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
}

fn annotate(query: &Coordinate, catalog: &[Place]) -> Vec<RankedPlace> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        catalog
            .par_iter()
            .map(|place| annotate_single(query, place))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        annotate_sequential(query, catalog)
    }
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn annotate_sequential(query: &Coordinate, catalog: &[Place]) -> Vec<RankedPlace> {
    catalog
        .iter()
        .map(|place| annotate_single(query, place))
        .collect()
}

#[inline]
fn annotate_single(query: &Coordinate, place: &Place) -> RankedPlace {
    RankedPlace {
        place: place.clone(),
        distance_meters: haversine_distance_meters(query, &place.location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeoErrorCode, EARTH_RADIUS_M};
    use proptest::prelude::*;

    const NEW_DELHI: Coordinate = Coordinate::new(28.6139, 77.2090);

    fn demo_catalog() -> Vec<Place> {
        vec![
            Place::new("Coffee Shop", 28.6145, 77.2095),
            Place::new("Restaurant", 28.6135, 77.2085),
            Place::new("Gas Station", 28.6150, 77.2100),
            Place::new("Pharmacy", 28.6130, 77.2080),
            Place::new("Bank", 25.2155, 55.2105),
        ]
    }

    fn names(ranking: &Ranking) -> Vec<&str> {
        ranking.places.iter().map(RankedPlace::name).collect()
    }

    #[test]
    fn test_demo_catalog_order() {
        let ranking = rank_by_distance(NEW_DELHI, &demo_catalog()).unwrap();
        assert_eq!(
            names(&ranking),
            vec!["Restaurant", "Coffee Shop", "Pharmacy", "Gas Station", "Bank"]
        );
        assert_eq!(ranking.query, NEW_DELHI);
    }

    #[test]
    fn test_known_distances() {
        let ranking = rank_by_distance(NEW_DELHI, &demo_catalog()).unwrap();
        let coffee = ranking.places.iter().find(|p| p.name() == "Coffee Shop").unwrap();
        assert!(coffee.distance_meters > 82.0 && coffee.distance_meters < 85.0);

        let bank = ranking.places.iter().find(|p| p.name() == "Bank").unwrap();
        let km = bank.distance_meters / 1000.0;
        assert!(km > 2150.0 && km < 2250.0, "Bank: {} km", km);
    }

    #[test]
    fn test_self_distance_is_zero() {
        let here = Place::new("Here", NEW_DELHI.latitude, NEW_DELHI.longitude);
        let ranking = rank_by_distance(NEW_DELHI, &[here]).unwrap();
        assert!(ranking.places[0].distance_meters.abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog() {
        let ranking = rank_by_distance(NEW_DELHI, &[]).unwrap();
        assert!(ranking.is_empty());
        assert!(ranking.nearest().is_none());
    }

    #[test]
    fn test_nan_query_rejected() {
        let err = rank_by_distance(Coordinate::new(f64::NAN, 77.2), &demo_catalog()).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
        assert!(err.to_string().contains("query"));
    }

    #[test]
    fn test_nan_query_rejected_even_with_empty_catalog() {
        assert!(rank_by_distance(Coordinate::new(0.0, f64::NEG_INFINITY), &[]).is_err());
    }

    #[test]
    fn test_non_finite_candidate_rejected() {
        let mut catalog = demo_catalog();
        catalog.push(Place::new("Broken", f64::INFINITY, 0.0));
        let err = rank_by_distance(NEW_DELHI, &catalog).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_out_of_range_query_is_accepted() {
        assert!(rank_by_distance(Coordinate::new(120.0, 400.0), &demo_catalog()).is_ok());
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let catalog = vec![
            Place::new("First", 28.6145, 77.2095),
            Place::new("Second", 28.6145, 77.2095),
            Place::new("First", 28.6145, 77.2095),
        ];
        let ranking = rank_by_distance(NEW_DELHI, &catalog).unwrap();
        assert_eq!(names(&ranking), vec!["First", "Second", "First"]);
    }

    #[test]
    fn test_max_results() {
        let ranking = rank_nearest(NEW_DELHI, &demo_catalog(), 2).unwrap();
        assert_eq!(names(&ranking), vec!["Restaurant", "Coffee Shop"]);
    }

    #[test]
    fn test_radius_filter() {
        let ranking = rank_within_radius(NEW_DELHI, &demo_catalog(), 1_000.0).unwrap();
        assert_eq!(ranking.len(), 4);
        assert!(ranking.places.iter().all(|p| p.distance_meters <= 1_000.0));
    }

    #[test]
    fn test_radius_and_max_combined() {
        let options = RankOptions::default().with_radius_m(100.0).with_max_results(5);
        let ranking = rank_with_options(NEW_DELHI, &demo_catalog(), &options).unwrap();
        assert_eq!(names(&ranking), vec!["Restaurant", "Coffee Shop"]);
    }

    #[test]
    fn test_ranked_place_serializes_bridge_shape() {
        let ranking = rank_by_distance(NEW_DELHI, &demo_catalog()[..1]).unwrap();
        let json = serde_json::to_value(&ranking.places[0]).unwrap();
        assert_eq!(json["name"], "Coffee Shop");
        assert_eq!(json["latitude"], 28.6145);
        assert!(json["distance"].as_f64().unwrap() > 82.0);
    }

    fn arb_place() -> impl Strategy<Value = Place> {
        ("[a-z]{1,8}", -90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(name, lat, lon)| Place::new(name, lat, lon))
    }

    proptest! {
        #[test]
        fn prop_sorted_non_decreasing(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            catalog in prop::collection::vec(arb_place(), 0..40),
        ) {
            let ranking = rank_by_distance(Coordinate::new(lat, lon), &catalog).unwrap();
            prop_assert_eq!(ranking.len(), catalog.len());
            for pair in ranking.places.windows(2) {
                prop_assert!(pair[0].distance_meters <= pair[1].distance_meters);
            }
            for p in &ranking.places {
                prop_assert!(p.distance_meters >= 0.0);
                prop_assert!(p.distance_meters <= std::f64::consts::PI * EARTH_RADIUS_M + 1.0);
            }
        }

        #[test]
        fn prop_ties_keep_catalog_order(
            lat in -60.0f64..=60.0,
            lon in -170.0f64..=170.0,
            copies in 2usize..10,
        ) {
            let catalog: Vec<Place> = (0..copies)
                .map(|i| Place::new(format!("p{i}"), lat + 1.0, lon + 1.0))
                .collect();
            let ranking = rank_by_distance(Coordinate::new(lat, lon), &catalog).unwrap();
            let got: Vec<String> = ranking.places.iter().map(|p| p.place.name.clone()).collect();
            let expected: Vec<String> = catalog.iter().map(|p| p.name.clone()).collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn prop_parallel_matches_sequential(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            catalog in prop::collection::vec(arb_place(), 0..40),
        ) {
            let query = Coordinate::new(lat, lon);
            prop_assert_eq!(annotate(&query, &catalog), annotate_sequential(&query, &catalog));
        }
    }
}
