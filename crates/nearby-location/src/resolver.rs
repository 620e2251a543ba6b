//! Location acquisition with an ordered fallback chain.
//!
//! Attempts, in order: permission check → live fix → best-effort reverse
//! geocode → fresh cache → device last-known position. Each step is logged
//! to the [`DebugEventLog`]; every intermediate failure is absorbed and the
//! chain falls through. Only total exhaustion surfaces an error, carrying
//! the failure that started the fallback.

use std::time::Duration;

use chrono::Utc;
use nearby_core::{validate, AppConfig, Coordinate};

use crate::debug_log::{DebugEventLog, EventDetail};
use crate::error::LocationError;
use crate::provider::{AccuracyProfile, PositionProvider};
use crate::types::{LocationSource, PermissionStatus, ResolvedLocation};

/// Placeholder coordinate for events that happen before any fix exists.
const NO_COORDINATE: Coordinate = Coordinate {
    latitude: 0.0,
    longitude: 0.0,
};

const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300;
const DEFAULT_LAST_KNOWN_MAX_AGE_SECS: u64 = 600;
const DEFAULT_LAST_KNOWN_REQUIRED_ACCURACY_M: f64 = 1000.0;

/// Resolves the current location through the fallback chain.
///
/// Owns the last-writer-wins "current resolved location" used for the cache
/// fallback. One resolution should be in flight at a time per resolver;
/// deduplicating overlapping calls is the caller's responsibility.
pub struct LocationResolver<P> {
    provider: P,
    log: DebugEventLog,
    profile: AccuracyProfile,
    cache_max_age_secs: u64,
    last_known_max_age: Duration,
    last_known_required_accuracy_m: f64,
    current: Option<ResolvedLocation>,
}

impl<P: PositionProvider> LocationResolver<P> {
    /// Creates a resolver with the default tunables (5 min cache freshness,
    /// 10 min / 1 km last-known acceptance, balanced accuracy).
    pub fn new(provider: P, log: DebugEventLog) -> Self {
        Self {
            provider,
            log,
            profile: AccuracyProfile::balanced(),
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            last_known_max_age: Duration::from_secs(DEFAULT_LAST_KNOWN_MAX_AGE_SECS),
            last_known_required_accuracy_m: DEFAULT_LAST_KNOWN_REQUIRED_ACCURACY_M,
            current: None,
        }
    }

    /// Creates a resolver with tunables taken from application config.
    pub fn from_config(provider: P, log: DebugEventLog, config: &AppConfig) -> Self {
        Self {
            provider,
            log,
            profile: AccuracyProfile::balanced(),
            cache_max_age_secs: config.cache_max_age_secs,
            last_known_max_age: Duration::from_secs(config.last_known_max_age_secs),
            last_known_required_accuracy_m: config.last_known_required_accuracy_m,
            current: None,
        }
    }

    /// The most recently resolved location, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ResolvedLocation> {
        self.current.as_ref()
    }

    /// Resolves a location, falling back through cache and last-known
    /// position when the live fix fails.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Unavailable`] when every fallback is
    /// exhausted; the wrapped source is the error from the live-fix step.
    pub async fn resolve(&mut self) -> Result<ResolvedLocation, LocationError> {
        self.log.record(
            "resolve_start",
            NO_COORDINATE,
            EventDetail::note("starting location request"),
        );

        match self.live_fix().await {
            Ok(resolved) => {
                self.current = Some(resolved.clone());
                Ok(resolved)
            }
            Err(original) => self.fall_back(original).await,
        }
    }

    /// Manually installs a location (e.g. user-entered coordinates).
    ///
    /// Validation warnings are logged but never block: a manual location is
    /// trusted as given and becomes the new basis for the cache fallback.
    pub fn set_manual(
        &mut self,
        latitude: f64,
        longitude: f64,
        label: Option<&str>,
    ) -> ResolvedLocation {
        let coordinate = Coordinate::new(latitude, longitude);
        let check = validate(latitude, longitude);
        let mut errors = check.errors;
        errors.push("manually set location".to_string());
        self.log.record(
            "manual_location",
            coordinate,
            EventDetail {
                address: label.map(ToString::to_string),
                errors,
                ..EventDetail::default()
            },
        );

        let resolved = ResolvedLocation {
            coordinate,
            accuracy: None,
            address: label.map(ToString::to_string),
            timestamp: Utc::now(),
            source: LocationSource::Manual,
        };
        self.current = Some(resolved.clone());
        resolved
    }

    /// Permission check, live fix, validation, and best-effort reverse
    /// geocode. Any failure here starts the fallback chain.
    async fn live_fix(&self) -> Result<ResolvedLocation, LocationError> {
        let status = match self.provider.request_permission().await {
            Ok(status) => status,
            Err(err) => {
                self.log.record(
                    "permission_error",
                    NO_COORDINATE,
                    EventDetail::note(format!("permission request failed: {err}")),
                );
                return Err(err.into());
            }
        };
        self.log.record(
            "permission_request",
            NO_COORDINATE,
            EventDetail::note(format!("permission status: {status}")),
        );
        if status != PermissionStatus::Granted {
            return Err(LocationError::PermissionDenied { status });
        }

        let fix = match self.provider.current_position(&self.profile).await {
            Ok(fix) => fix,
            Err(err) => {
                self.log.record(
                    "location_error",
                    NO_COORDINATE,
                    EventDetail::note(format!("location request failed: {err}")),
                );
                return Err(err.into());
            }
        };

        let check = validate(fix.coordinate.latitude, fix.coordinate.longitude);
        self.log.record(
            "gps_fix",
            fix.coordinate,
            EventDetail {
                accuracy: fix.accuracy,
                errors: check.errors.clone(),
                ..EventDetail::default()
            },
        );
        if !check.valid {
            return Err(LocationError::InvalidCoordinates {
                details: check.errors.join(", "),
            });
        }

        let address = match self.provider.reverse_geocode(fix.coordinate).await {
            Ok(address) => {
                self.log.record(
                    "reverse_geocode",
                    fix.coordinate,
                    EventDetail {
                        address: address.clone(),
                        errors: if address.is_none() {
                            vec!["no readable address for fix".to_string()]
                        } else {
                            Vec::new()
                        },
                        ..EventDetail::default()
                    },
                );
                address
            }
            Err(err) => {
                // Address is decoration; a failed lookup never fails the fix.
                tracing::warn!(error = %err, "reverse geocoding failed");
                self.log.record(
                    "reverse_geocode_error",
                    fix.coordinate,
                    EventDetail::note(format!("reverse geocoding failed: {err}")),
                );
                None
            }
        };

        Ok(ResolvedLocation {
            coordinate: fix.coordinate,
            accuracy: fix.accuracy,
            address,
            timestamp: Utc::now(),
            source: LocationSource::Gps,
        })
    }

    /// Cache, then last-known position, then terminal failure re-raising
    /// `original`.
    async fn fall_back(
        &mut self,
        original: LocationError,
    ) -> Result<ResolvedLocation, LocationError> {
        tracing::warn!(error = %original, "live location failed; trying fallbacks");
        self.log.record(
            "fallback_attempt",
            NO_COORDINATE,
            EventDetail::note(format!("trying fallback after: {original}")),
        );

        if let Some(cached) = &self.current {
            if cached.is_fresh(self.cache_max_age_secs) {
                self.log.record(
                    "cache_hit",
                    cached.coordinate,
                    EventDetail {
                        address: cached.address.clone(),
                        errors: vec!["using cached location".to_string()],
                        ..EventDetail::default()
                    },
                );
                return Ok(ResolvedLocation {
                    source: LocationSource::Cache,
                    ..cached.clone()
                });
            }
        }

        match self
            .provider
            .last_known_position(self.last_known_max_age, self.last_known_required_accuracy_m)
            .await
        {
            Ok(Some(fix)) => {
                self.log.record(
                    "last_known",
                    fix.coordinate,
                    EventDetail {
                        accuracy: fix.accuracy,
                        errors: vec!["using last known location".to_string()],
                        ..EventDetail::default()
                    },
                );
                return Ok(ResolvedLocation {
                    coordinate: fix.coordinate,
                    accuracy: fix.accuracy,
                    address: None,
                    timestamp: Utc::now(),
                    source: LocationSource::LastKnown,
                });
            }
            Ok(None) => {
                self.log.record(
                    "last_known_miss",
                    NO_COORDINATE,
                    EventDetail::note("no acceptable last known position"),
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "last known position lookup failed");
                self.log.record(
                    "last_known_error",
                    NO_COORDINATE,
                    EventDetail::note(format!("last known location failed: {err}")),
                );
            }
        }

        self.log.record(
            "location_error",
            NO_COORDINATE,
            EventDetail::note(format!("all fallbacks exhausted: {original}")),
        );
        Err(LocationError::Unavailable {
            source: Box::new(original),
        })
    }
}
