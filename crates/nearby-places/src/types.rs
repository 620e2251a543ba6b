//! Domain and wire types for the places search.

use nearby_core::Coordinate;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub(crate) const DEFAULT_CATEGORY: &str = "restaurant";
pub(crate) const MIN_LIMIT: u32 = 1;
pub(crate) const MAX_LIMIT: u32 = 50;

/// A point of interest returned by a places search.
///
/// `rating`, `price_level`, and `photos` are carried for host applications
/// but never populated by this core; the geocoding API does not supply them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Missing when the remote feature carried no usable coordinates; such
    /// places rank after every place with a known distance.
    pub coordinate: Option<Coordinate>,
    pub address: String,
    /// Meters from the query origin. Recomputed per search, never stored
    /// across re-sorts.
    pub distance_m: Option<f64>,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub photos: Option<Vec<String>>,
}

/// Options for a nearby-places search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// POI category; defaults to `"restaurant"` when unset.
    pub category: Option<String>,
    /// Advisory radius hint in meters. The remote service biases toward the
    /// origin but does not enforce radius containment.
    pub radius_m: Option<u32>,
    /// Result cap; clamped to `[1, 50]` before the request. `None` means 20.
    pub limit: Option<u32>,
    /// Cooperative cancellation; observed before and during the request.
    pub cancel: Option<CancellationToken>,
}

impl SearchOptions {
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn radius_m(mut self, radius_m: u32) -> Self {
        self.radius_m = Some(radius_m);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn effective_category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    pub(crate) fn effective_radius_m(&self) -> u32 {
        self.radius_m.unwrap_or(1000)
    }

    pub(crate) fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(20).clamp(MIN_LIMIT, MAX_LIMIT)
    }
}

/// Geocoding feature collection envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One geocoding feature. Every field is optional; real responses are
/// routinely missing pieces and a malformed entry must not sink the batch.
#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    pub id: Option<String>,
    pub text: Option<String>,
    pub place_name: Option<String>,
    #[serde(default)]
    pub properties: FeatureProperties,
    /// `[longitude, latitude]` per the GeoJSON convention.
    pub center: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeatureProperties {
    pub category: Option<String>,
}

impl Feature {
    pub(crate) fn into_place(self, fallback_category: &str) -> Place {
        let coordinate = self.center.as_deref().and_then(|center| match center {
            [lon, lat, ..] => Some(Coordinate::new(*lat, *lon)),
            _ => None,
        });
        let address = self.place_name.clone().unwrap_or_default();
        Place {
            id: self.id.unwrap_or_default(),
            name: self
                .text
                .or(self.place_name)
                .unwrap_or_else(|| "Unknown".to_string()),
            category: self
                .properties
                .category
                .unwrap_or_else(|| fallback_category.to_string()),
            coordinate,
            address,
            distance_m: None,
            rating: None,
            price_level: None,
            photos: None,
        }
    }
}
