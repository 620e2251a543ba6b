use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let mapbox_token = require("NEARBY_MAPBOX_TOKEN")?;
    let openweather_api_key = require("NEARBY_OPENWEATHER_KEY")?;

    let env = parse_environment(&or_default("NEARBY_ENV", "development"));
    let log_level = or_default("NEARBY_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("NEARBY_REQUEST_TIMEOUT_SECS", "10")?;
    let cache_max_age_secs = parse_u64("NEARBY_CACHE_MAX_AGE_SECS", "300")?;
    let last_known_max_age_secs = parse_u64("NEARBY_LAST_KNOWN_MAX_AGE_SECS", "600")?;
    let last_known_required_accuracy_m =
        parse_f64("NEARBY_LAST_KNOWN_REQUIRED_ACCURACY_M", "1000")?;

    // Debug logging defaults on outside production, mirroring a __DEV__ flag.
    let debug_log_enabled = match lookup("NEARBY_DEBUG_LOG") {
        Ok(raw) => parse_bool("NEARBY_DEBUG_LOG", &raw)?,
        Err(_) => env != Environment::Production,
    };

    Ok(AppConfig {
        mapbox_token,
        openweather_api_key,
        env,
        log_level,
        request_timeout_secs,
        cache_max_age_secs,
        last_known_max_age_secs,
        last_known_required_accuracy_m,
        debug_log_enabled,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("NEARBY_MAPBOX_TOKEN", "pk.test-token");
        m.insert("NEARBY_OPENWEATHER_KEY", "owm-test-key");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_mapbox_token() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEARBY_MAPBOX_TOKEN"),
            "expected MissingEnvVar(NEARBY_MAPBOX_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_openweather_key() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("NEARBY_MAPBOX_TOKEN", "pk.test-token");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEARBY_OPENWEATHER_KEY"),
            "expected MissingEnvVar(NEARBY_OPENWEATHER_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.cache_max_age_secs, 300);
        assert_eq!(cfg.last_known_max_age_secs, 600);
        assert!((cfg.last_known_required_accuracy_m - 1000.0).abs() < f64::EPSILON);
        assert!(cfg.debug_log_enabled, "debug log defaults on in development");
    }

    #[test]
    fn debug_log_defaults_off_in_production() {
        let mut map = full_env();
        map.insert("NEARBY_ENV", "production");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.debug_log_enabled);
    }

    #[test]
    fn debug_log_explicit_override_beats_environment() {
        let mut map = full_env();
        map.insert("NEARBY_ENV", "production");
        map.insert("NEARBY_DEBUG_LOG", "true");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.debug_log_enabled);
    }

    #[test]
    fn debug_log_rejects_garbage() {
        let mut map = full_env();
        map.insert("NEARBY_DEBUG_LOG", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_DEBUG_LOG"),
            "expected InvalidEnvVar(NEARBY_DEBUG_LOG), got: {result:?}"
        );
    }

    #[test]
    fn cache_max_age_override() {
        let mut map = full_env();
        map.insert("NEARBY_CACHE_MAX_AGE_SECS", "120");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.cache_max_age_secs, 120);
    }

    #[test]
    fn cache_max_age_invalid() {
        let mut map = full_env();
        map.insert("NEARBY_CACHE_MAX_AGE_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_CACHE_MAX_AGE_SECS"),
            "expected InvalidEnvVar(NEARBY_CACHE_MAX_AGE_SECS), got: {result:?}"
        );
    }

    #[test]
    fn last_known_required_accuracy_override() {
        let mut map = full_env();
        map.insert("NEARBY_LAST_KNOWN_REQUIRED_ACCURACY_M", "250.5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.last_known_required_accuracy_m - 250.5).abs() < f64::EPSILON);
    }

    #[test]
    fn request_timeout_invalid() {
        let mut map = full_env();
        map.insert("NEARBY_REQUEST_TIMEOUT_SECS", "ten");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(NEARBY_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
