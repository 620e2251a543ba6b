pub mod app_config;
pub mod config;
pub mod coordinate;
pub mod distance;
pub mod validate;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::Coordinate;
pub use distance::{distance_meters, has_moved, EARTH_RADIUS_METERS};
pub use validate::{validate, CoordinateCheck};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
