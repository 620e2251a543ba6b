//! The platform location-services seam.
//!
//! Host applications implement [`PositionProvider`] over whatever the
//! platform offers (mobile location APIs, IP geolocation, a fixed test
//! position) and hand it to [`crate::LocationResolver`]. Keeping the
//! boundary a trait means the resolver's fallback chain is testable without
//! any platform at all.

use std::time::Duration;

use nearby_core::Coordinate;
use thiserror::Error;

use crate::types::{PermissionStatus, PositionFix};

/// Failure reported by a platform position provider.
///
/// Providers collapse their platform-specific errors into a message; the
/// resolver only needs something displayable to log and carry through the
/// fallback chain.
#[derive(Debug, Clone, Error)]
#[error("position provider error: {message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Knobs for a live position request.
#[derive(Debug, Clone, Copy)]
pub struct AccuracyProfile {
    /// Maximum time the provider may spend acquiring a fix.
    pub time_budget: Duration,
    /// Minimum movement, in meters, before the platform reports a new fix.
    pub distance_interval_m: f64,
}

impl AccuracyProfile {
    /// Balanced accuracy: 10 s budget, 100 m movement threshold.
    #[must_use]
    pub fn balanced() -> Self {
        Self {
            time_budget: Duration::from_secs(10),
            distance_interval_m: 100.0,
        }
    }
}

impl Default for AccuracyProfile {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Platform location services: permission, live fix, last-known position,
/// reverse geocoding.
pub trait PositionProvider {
    /// Requests foreground location permission from the user/platform.
    fn request_permission(
        &self,
    ) -> impl std::future::Future<Output = Result<PermissionStatus, ProviderError>> + Send;

    /// Acquires a live position fix under the given accuracy profile.
    fn current_position(
        &self,
        profile: &AccuracyProfile,
    ) -> impl std::future::Future<Output = Result<PositionFix, ProviderError>> + Send;

    /// Returns the platform's cached last-known position, if one exists that
    /// is younger than `max_age` and at least as accurate as
    /// `required_accuracy_m`.
    fn last_known_position(
        &self,
        max_age: Duration,
        required_accuracy_m: f64,
    ) -> impl std::future::Future<Output = Result<Option<PositionFix>, ProviderError>> + Send;

    /// Best-effort human-readable address for a coordinate.
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> impl std::future::Future<Output = Result<Option<String>, ProviderError>> + Send;
}
