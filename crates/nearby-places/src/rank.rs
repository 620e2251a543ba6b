//! Distance computation and ordering for search results.

use std::cmp::Ordering;

use nearby_core::{distance_meters, Coordinate};

use crate::types::Place;

/// Computes each place's distance from `origin` and sorts ascending.
///
/// Places without coordinates keep `distance_m = None` and sort after every
/// place with a known distance. The sort is stable, so ties and
/// unknown-distance entries keep the remote service's original order.
pub(crate) fn rank_by_distance(origin: Coordinate, places: &mut [Place]) {
    for place in places.iter_mut() {
        place.distance_m = place
            .coordinate
            .map(|coordinate| distance_meters(origin, coordinate));
    }

    places.sort_by(|a, b| match (a.distance_m, b.distance_m) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, coordinate: Option<Coordinate>) -> Place {
        Place {
            id: name.to_string(),
            name: name.to_string(),
            category: "restaurant".to_string(),
            coordinate,
            address: String::new(),
            distance_m: None,
            rating: None,
            price_level: None,
            photos: None,
        }
    }

    #[test]
    fn sorts_ascending_by_distance() {
        let origin = Coordinate::new(40.0, -74.0);
        // Roughly 900 m, 100 m, and 500 m north of the origin.
        let mut places = vec![
            place("far", Some(Coordinate::new(40.0081, -74.0))),
            place("near", Some(Coordinate::new(40.0009, -74.0))),
            place("mid", Some(Coordinate::new(40.0045, -74.0))),
        ];
        rank_by_distance(origin, &mut places);

        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["near", "mid", "far"]);
        let near = places[0].distance_m.unwrap();
        let far = places[2].distance_m.unwrap();
        assert!((near - 100.0).abs() < 10.0, "got {near}");
        assert!((far - 900.0).abs() < 20.0, "got {far}");
    }

    #[test]
    fn unknown_distance_sorts_last() {
        let origin = Coordinate::new(0.001, 0.001);
        let mut places = vec![
            place("mystery_a", None),
            place("known", Some(Coordinate::new(0.002, 0.001))),
            place("mystery_b", None),
        ];
        rank_by_distance(origin, &mut places);

        assert_eq!(places[0].name, "known");
        // Stable sort keeps the remote order among unknowns.
        assert_eq!(places[1].name, "mystery_a");
        assert_eq!(places[2].name, "mystery_b");
        assert!(places[1].distance_m.is_none());
    }

    #[test]
    fn distances_are_recomputed_on_each_ranking() {
        let mut places = vec![place("p", Some(Coordinate::new(40.0009, -74.0)))];
        rank_by_distance(Coordinate::new(40.0, -74.0), &mut places);
        let first = places[0].distance_m.unwrap();

        rank_by_distance(Coordinate::new(40.0018, -74.0), &mut places);
        let second = places[0].distance_m.unwrap();
        assert!(
            (first - second).abs() > 1.0,
            "distance is a derived property and must follow the origin"
        );
    }
}
