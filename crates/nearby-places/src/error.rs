use thiserror::Error;

/// Errors returned by the places search client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The caller cancelled the request before a full response arrived.
    /// Distinct from other failures so hosts can skip user-facing error UI.
    #[error("places request cancelled")]
    Cancelled,

    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("places request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("places response deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL or a built request URL is not valid.
    #[error("invalid places URL: {0}")]
    InvalidUrl(String),
}
