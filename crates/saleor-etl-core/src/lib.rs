pub mod app_config;
pub mod config;
pub mod mapper;
pub mod products;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use mapper::{map_row, ProductInput, SeoInput};
pub use products::{CategoryPath, ImportRow, Weight};

use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryPathError {
    #[error("category path \"{0}\" needs at least a parent and a child segment")]
    TooShort(String),
}
