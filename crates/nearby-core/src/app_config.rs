#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration for the location/places core.
///
/// Loaded from environment variables; see [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    pub mapbox_token: String,
    pub openweather_api_key: String,
    pub env: Environment,
    pub log_level: String,
    /// Timeout applied to every outbound places/weather request.
    pub request_timeout_secs: u64,
    /// Freshness window for the cached resolved location.
    pub cache_max_age_secs: u64,
    /// Maximum age accepted from the platform's last-known position.
    pub last_known_max_age_secs: u64,
    /// Accuracy ceiling required of a last-known position, in meters.
    pub last_known_required_accuracy_m: f64,
    /// Whether the debug event log records entries at all.
    pub debug_log_enabled: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("mapbox_token", &"[redacted]")
            .field("openweather_api_key", &"[redacted]")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cache_max_age_secs", &self.cache_max_age_secs)
            .field("last_known_max_age_secs", &self.last_known_max_age_secs)
            .field(
                "last_known_required_accuracy_m",
                &self.last_known_required_accuracy_m,
            )
            .field("debug_log_enabled", &self.debug_log_enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = AppConfig {
            mapbox_token: "pk.secret".to_string(),
            openweather_api_key: "owm-secret".to_string(),
            env: Environment::Development,
            log_level: "info".to_string(),
            request_timeout_secs: 10,
            cache_max_age_secs: 300,
            last_known_max_age_secs: 600,
            last_known_required_accuracy_m: 1000.0,
            debug_log_enabled: true,
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("pk.secret"));
        assert!(!rendered.contains("owm-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Development.to_string(), "development");
    }
}
