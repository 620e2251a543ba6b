//! Debug-only HTTP client for current weather conditions.
//!
//! Exists to cross-check resolved locations: it fetches weather for the
//! resolved coordinates, compares the coordinates the service answered for
//! against the ones requested, and records the whole exchange in the debug
//! event log.

use std::time::Duration;

use nearby_core::{distance_meters, Coordinate};
use nearby_location::{DebugEventLog, EventDetail, ResolvedLocation};
use reqwest::{Client, Url};

use crate::error::WeatherError;
use crate::types::{WeatherReport, WeatherResponse, MISMATCH_THRESHOLD_METERS};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

/// Client for the current-weather API.
///
/// Use [`WeatherClient::new`] for production or
/// [`WeatherClient::with_base_url`] to point at a mock server in tests.
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl WeatherClient {
    /// Creates a new client pointed at the production weather API.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WeatherError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Keep exactly one trailing slash so Url::join appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| WeatherError::InvalidUrl(format!("{normalised}: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches current weather for a resolved location, recording the
    /// request, response (or failure), and any coordinate mismatch in the
    /// debug event log.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure or non-2xx HTTP status.
    /// - [`WeatherError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn current_weather(
        &self,
        location: &ResolvedLocation,
        log: &DebugEventLog,
    ) -> Result<WeatherReport, WeatherError> {
        let requested = location.coordinate;
        // Validation warnings ride along in the request entry; a flagged
        // location is still queried.
        let mut request_notes = nearby_core::validate(requested.latitude, requested.longitude).errors;
        request_notes.push(format!("requesting weather for: {requested}"));
        log.record(
            "weather_request",
            requested,
            EventDetail {
                address: location.address.clone(),
                errors: request_notes,
                ..EventDetail::default()
            },
        );

        let response = match self.fetch(requested).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "weather request failed");
                log.record(
                    "weather_error",
                    requested,
                    EventDetail::note(format!("weather request failed: {err}")),
                );
                return Err(err);
            }
        };

        let response_coordinate = response.coord.as_ref().and_then(|c| match (c.lat, c.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        });
        let coordinate_distance_m =
            response_coordinate.map(|coordinate| distance_meters(requested, coordinate));
        let coordinates_mismatch = coordinate_distance_m
            .is_some_and(|d| d.is_finite() && d > MISMATCH_THRESHOLD_METERS);

        let report = WeatherReport {
            name: response.name.unwrap_or_else(|| "Unknown".to_string()),
            description: response
                .weather
                .first()
                .and_then(|w| w.description.clone())
                .unwrap_or_else(|| "No description".to_string()),
            response_coordinate,
            coordinate_distance_m,
            coordinates_mismatch,
        };

        let mut errors = Vec::new();
        if coordinates_mismatch {
            let answered = response_coordinate.unwrap_or(requested);
            let km = coordinate_distance_m.unwrap_or_default() / 1000.0;
            errors.push(format!(
                "coordinate mismatch: requested {requested} but got {answered} ({km:.0} km apart)"
            ));
            tracing::warn!(
                requested = %requested,
                answered = %answered,
                distance_km = km,
                "weather response coordinates differ from request"
            );
        }
        log.record(
            "weather_response",
            response_coordinate.unwrap_or(requested),
            EventDetail {
                address: Some(report.name.clone()),
                weather_summary: Some(report.summary()),
                errors,
                ..EventDetail::default()
            },
        );

        Ok(report)
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherResponse, WeatherError> {
        let mut url = self
            .base_url
            .join("weather")
            .map_err(|e| WeatherError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("lat", &coordinate.latitude.to_string())
            .append_pair("lon", &coordinate.longitude.to_string())
            .append_pair("appid", &self.api_key)
            .append_pair("units", "metric");

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}
