//! WASM bindings for the geo crate.
//!
//! These bindings let a JavaScript host (a browser map view, or a React Native
//! layer through a WASM runtime) rank places without a native bridge.

use crate::{haversine_distance_meters, rank_with_options, Coordinate, Place, RankOptions};
use wasm_bindgen::prelude::*;

/// Calculate distance between two coordinates.
///
/// # Returns
/// Distance in meters, or an error if either coordinate is not finite
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, JsValue> {
    let from = Coordinate::new(lat1, lng1);
    let to = Coordinate::new(lat2, lng2);
    from.ensure_finite("from")
        .and_then(|()| to.ensure_finite("to"))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(haversine_distance_meters(&from, &to))
}

/// Rank a catalog around the user's location.
///
/// # Arguments
/// * `user_lat` - User's latitude
/// * `user_lng` - User's longitude
/// * `places_json` - JSON array of `{name, latitude, longitude}`
/// * `max_results` - Maximum results to return (0 for all)
///
/// # Returns
/// JSON string `{"places": [{name, latitude, longitude, distance}, ...]}`
#[wasm_bindgen(js_name = rankNearby)]
pub fn rank_nearby(user_lat: f64, user_lng: f64, places_json: &str, max_results: u32) -> Result<String, JsValue> {
    let catalog: Vec<Place> = serde_json::from_str(places_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    let mut options = RankOptions::default();
    if max_results > 0 {
        options = options.with_max_results(max_results as usize);
    }

    let ranking = rank_with_options(Coordinate::new(user_lat, user_lng), &catalog, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = serde_json::json!({ "places": ranking.places });
    Ok(result.to_string())
}
