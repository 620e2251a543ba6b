//! Domain types for location resolution.

use chrono::{DateTime, Utc};
use nearby_core::Coordinate;
use serde::{Deserialize, Serialize};

/// Which step of the resolution chain produced a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationSource {
    Gps,
    Cache,
    LastKnown,
    Manual,
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationSource::Gps => write!(f, "gps"),
            LocationSource::Cache => write!(f, "cache"),
            LocationSource::LastKnown => write!(f, "last-known"),
            LocationSource::Manual => write!(f, "manual"),
        }
    }
}

/// Outcome of a foreground location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Restricted,
    Undetermined,
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionStatus::Granted => write!(f, "granted"),
            PermissionStatus::Denied => write!(f, "denied"),
            PermissionStatus::Restricted => write!(f, "restricted"),
            PermissionStatus::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// A raw position reading from the platform provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    /// Horizontal accuracy in meters, when the platform reports one.
    pub accuracy: Option<f64>,
}

/// A fully resolved location, ready for places/weather queries.
///
/// Immutable by convention: a stale location is replaced by a new instance,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub accuracy: Option<f64>,
    pub address: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: LocationSource,
}

impl ResolvedLocation {
    /// Age of this location relative to now.
    #[must_use]
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.timestamp
    }

    /// Whether this location is younger than `max_age_secs`.
    #[must_use]
    pub fn is_fresh(&self, max_age_secs: u64) -> bool {
        self.age() < chrono::Duration::seconds(i64::try_from(max_age_secs).unwrap_or(i64::MAX))
    }
}
