//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. Accuracy degrades near
//! antipodal points; that is inherent to the formula and accepted here.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in meters.
///
/// # Example
/// ```
/// use nearby_geo::{haversine_distance_meters, Coordinate};
///
/// let query = Coordinate::new(28.6139, 77.2090);
/// let coffee = Coordinate::new(28.6145, 77.2095);
///
/// let meters = haversine_distance_meters(&query, &coffee);
/// assert!(meters > 82.0 && meters < 85.0);
/// ```
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use nearby_geo::{haversine_distance, Coordinate};
///
/// let delhi = Coordinate::new(28.6139, 77.2090);
/// let dubai = Coordinate::new(25.2155, 55.2105);
///
/// let km = haversine_distance(&delhi, &dubai);
/// assert!((km - 2210.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    // Differences are taken in degrees before conversion.
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 near antipodes. `clamp` keeps NaN.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NEW_DELHI: Coordinate = Coordinate { latitude: 28.6139, longitude: 77.2090 };
    const COFFEE_SHOP: Coordinate = Coordinate { latitude: 28.6145, longitude: 77.2095 };
    const DUBAI: Coordinate = Coordinate { latitude: 25.2155, longitude: 55.2105 };
    const BERLIN: Coordinate = Coordinate { latitude: 52.5200, longitude: 13.4050 };
    const PARIS: Coordinate = Coordinate { latitude: 48.8566, longitude: 2.3522 };

    #[test]
    fn test_short_hop_in_new_delhi() {
        let meters = haversine_distance_meters(&NEW_DELHI, &COFFEE_SHOP);
        assert!(meters > 82.0 && meters < 85.0, "Delhi-coffee: {}", meters);
    }

    #[test]
    fn test_new_delhi_to_dubai() {
        let km = haversine_distance(&NEW_DELHI, &DUBAI);
        // Roughly 2,210 km along the great circle.
        assert!((km - 2210.4).abs() < 1.0, "Delhi-Dubai: {}", km);
    }

    #[test]
    fn test_berlin_to_paris() {
        let km = haversine_distance(&BERLIN, &PARIS);
        assert!((km - 878.0).abs() < 5.0, "Berlin-Paris: {}", km);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert!(haversine_distance_meters(&NEW_DELHI, &NEW_DELHI).abs() < 1e-6);
    }

    #[test]
    fn test_meters_and_km_agree() {
        let km = haversine_distance(&BERLIN, &PARIS);
        let meters = haversine_distance_meters(&BERLIN, &PARIS);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    #[test]
    fn test_near_antipodal_stays_finite() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let meters = haversine_distance_meters(&a, &b);
        assert!(meters.is_finite());
        assert!((meters - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn test_nan_input_yields_nan() {
        let origin = Coordinate::new(0.0, 0.0);
        assert!(haversine_distance_meters(&Coordinate::new(f64::NAN, 0.0), &origin).is_nan());
        assert!(haversine_distance(&origin, &Coordinate::new(0.0, f64::NAN)).is_nan());
    }

    proptest! {
        #[test]
        fn prop_symmetric(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let a = Coordinate::new(lat1, lon1);
            let b = Coordinate::new(lat2, lon2);
            let ab = haversine_distance_meters(&a, &b);
            let ba = haversine_distance_meters(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        #[test]
        fn prop_non_negative_and_bounded(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let d = haversine_distance_meters(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2));
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1.0);
        }
    }
}
