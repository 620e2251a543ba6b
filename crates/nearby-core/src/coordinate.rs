use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Latitude is positive north, longitude positive east. The type does not
/// enforce range on construction; callers run [`crate::validate`] before
/// using a coordinate for remote queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    /// Renders as `"lat, lon"` to six decimal places (~0.1 m resolution),
    /// the precision used throughout debug reports.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_six_decimal_places() {
        let c = Coordinate::new(40.7128, -74.006);
        assert_eq!(c.to_string(), "40.712800, -74.006000");
    }

    #[test]
    fn serde_round_trips() {
        let c = Coordinate::new(34.0522, -118.2437);
        let json = serde_json::to_string(&c).unwrap();
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
