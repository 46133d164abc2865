//! Plain-text rendering of ranked places.

use crate::output::format_distance;
use nearby_geo::{Place, RankedPlace};

/// Render ranked places as aligned rows: rank, name, distance, coordinate.
pub fn render_ranked(places: &[RankedPlace]) -> String {
    let width = name_width(places.iter().map(|p| p.name()));
    places
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{:>3}. {:<width$}  {:>10}  {}",
                i + 1,
                p.name(),
                format_distance(p.distance_meters),
                p.location(),
                width = width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render catalog entries as aligned rows: name, coordinate.
pub fn render_catalog(places: &[Place]) -> String {
    let width = name_width(places.iter().map(|p| p.name.as_str()));
    places
        .iter()
        .map(|p| format!("  {:<width$}  {}", p.name, p.location, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(name: &str, lat: f64, lon: f64, distance: f64) -> RankedPlace {
        RankedPlace {
            place: Place::new(name, lat, lon),
            distance_meters: distance,
        }
    }

    #[test]
    fn test_render_ranked_rows() {
        let rows = render_ranked(&[
            ranked("Restaurant", 28.6135, 77.2085, 66.03),
            ranked("Bank", 25.2155, 55.2105, 2_210_356.5),
        ]);
        let lines: Vec<&str> = rows.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. Restaurant"));
        assert!(lines[0].contains("66 m"));
        assert!(lines[1].starts_with("  2. Bank      "));
        assert!(lines[1].contains("2,210 km"));
        assert!(lines[1].ends_with("(25.2155, 55.2105)"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_ranked(&[]), "");
        assert_eq!(render_catalog(&[]), "");
    }

    #[test]
    fn test_render_catalog_rows() {
        let rows = render_catalog(&[Place::new("Pharmacy", 28.613, 77.208)]);
        assert_eq!(rows, "  Pharmacy  (28.6130, 77.2080)");
    }
}
