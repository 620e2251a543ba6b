use thiserror::Error;

use crate::provider::ProviderError;
use crate::types::PermissionStatus;

/// Errors surfaced by the location resolver.
///
/// Intermediate fallback failures are absorbed and logged; only
/// [`LocationError::Unavailable`] reaches callers from [`crate::LocationResolver::resolve`],
/// carrying the original failure that started the fallback chain.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied: {status}")]
    PermissionDenied { status: PermissionStatus },

    #[error("invalid coordinates received: {details}")]
    InvalidCoordinates { details: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Every fallback was exhausted; `source` is the error that failed the
    /// live-fix step (or the permission denial that preceded it).
    #[error("location unavailable after all fallbacks: {source}")]
    Unavailable {
        #[source]
        source: Box<LocationError>,
    },
}
