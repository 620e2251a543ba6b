use thiserror::Error;

/// Errors returned by the weather debug client.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("weather response deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not valid.
    #[error("invalid weather URL: {0}")]
    InvalidUrl(String),
}
