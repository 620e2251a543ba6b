//! Wire and report types for the weather debug lookup.

use nearby_core::Coordinate;
use serde::{Deserialize, Serialize};

/// Distance beyond which the response coordinates are considered a mismatch
/// with the requested ones.
pub const MISMATCH_THRESHOLD_METERS: f64 = 10_000.0;

/// The slice of the weather API response this core consumes.
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    pub coord: Option<ResponseCoord>,
    pub name: Option<String>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseCoord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherCondition {
    pub description: Option<String>,
}

/// Weather conditions at a location, with the coordinate cross-check used
/// for debugging location accuracy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    /// Station/place name reported by the service; `"Unknown"` when absent.
    pub name: String,
    /// First weather condition description; `"No description"` when absent.
    pub description: String,
    /// Coordinates the service actually answered for, when it reported any.
    pub response_coordinate: Option<Coordinate>,
    /// Meters between requested and response coordinates.
    pub coordinate_distance_m: Option<f64>,
    /// True when the response coordinates are more than 10 km from the
    /// requested ones.
    pub coordinates_mismatch: bool,
}

impl WeatherReport {
    /// One-line summary used in debug log entries: `"{name} - {description}"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} - {}", self.name, self.description)
    }
}
