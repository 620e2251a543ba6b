//! HTTP client for the proximity-biased places search.
//!
//! Wraps `reqwest` over a Mapbox-style geocoding endpoint. The `proximity`
//! parameter biases ranking toward the origin; it is not a hard radius
//! filter, so callers must not assume results fall inside `radius_m`.

use std::time::Duration;

use nearby_core::Coordinate;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::rank::rank_by_distance;
use crate::types::{FeatureCollection, Place, SearchOptions};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Characters escaped when a search term becomes a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%')
    .add(b'&')
    .add(b'+');

/// Client for the places geocoding API.
///
/// Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl PlacesClient {
    /// Creates a new client pointed at the production geocoding API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(access_token: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| PlacesError::InvalidUrl(format!("{trimmed}: {e}")))?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url: trimmed.to_owned(),
        })
    }

    /// Searches for places near `origin`, ranked ascending by distance.
    ///
    /// Issues a single GET biased toward the origin, computes each result's
    /// haversine distance, and stable-sorts with unknown-distance entries
    /// last. Observes the options' cancellation token before sending and
    /// while the request is in flight.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Cancelled`] if the caller cancelled; never returns a
    ///   partial list.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search(
        &self,
        origin: Coordinate,
        options: &SearchOptions,
    ) -> Result<Vec<Place>, PlacesError> {
        let category = options.effective_category();
        let limit = options.effective_limit();

        // A flagged origin is still usable; the warnings are for operators.
        let check = nearby_core::validate(origin.latitude, origin.longitude);
        if !check.errors.is_empty() {
            tracing::warn!(origin = %origin, issues = ?check.errors, "searching from a flagged origin");
        }

        if let Some(token) = &options.cancel {
            if token.is_cancelled() {
                return Err(PlacesError::Cancelled);
            }
        }

        let mut url = self.endpoint(category)?;
        url.query_pairs_mut()
            .append_pair(
                "proximity",
                &format!("{},{}", origin.longitude, origin.latitude),
            )
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", &limit.to_string())
            .append_pair("radius", &options.effective_radius_m().to_string())
            .append_pair("types", "poi");

        let fetch = self.fetch_body(url);
        let body = match &options.cancel {
            Some(token) => tokio::select! {
                () = token.cancelled() => return Err(PlacesError::Cancelled),
                body = fetch => body?,
            },
            None => fetch.await?,
        };

        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("search(category={category})"),
                source: e,
            })?;

        let mut places: Vec<Place> = collection
            .features
            .into_iter()
            .map(|feature| feature.into_place(category))
            .collect();
        rank_by_distance(origin, &mut places);

        tracing::debug!(category, count = places.len(), "places search complete");
        Ok(places)
    }

    /// Looks up a single place by id, reusing the search endpoint as a text
    /// query with `limit=1`.
    ///
    /// Never errors: any failure is logged and resolves to `None`; absence
    /// is the only failure representation for detail lookups.
    pub async fn place_details(&self, place_id: &str) -> Option<Place> {
        match self.fetch_details(place_id).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(place_id, error = %err, "place details lookup failed");
                None
            }
        }
    }

    async fn fetch_details(&self, place_id: &str) -> Result<Option<Place>, PlacesError> {
        let mut url = self.endpoint(place_id)?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("types", "poi")
            .append_pair("limit", "1");

        let body = self.fetch_body(url).await?;
        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("place_details(id={place_id})"),
                source: e,
            })?;

        Ok(collection.features.into_iter().next().map(|feature| {
            let mut place = feature.into_place("poi");
            if place.id.is_empty() {
                place.id = place_id.to_owned();
            }
            place
        }))
    }

    async fn fetch_body(&self, url: Url) -> Result<String, PlacesError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// `{base}/{percent-encoded query}.json`
    fn endpoint(&self, query: &str) -> Result<Url, PlacesError> {
        let encoded = utf8_percent_encode(query, PATH_SEGMENT);
        let raw = format!("{}/{}.json", self.base_url, encoded);
        Url::parse(&raw).map_err(|e| PlacesError::InvalidUrl(format!("{raw}: {e}")))
    }
}
