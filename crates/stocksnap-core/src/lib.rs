//! Shared configuration and record types for stocksnap.

pub mod app_config;
pub mod config;
pub mod snapshot;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use snapshot::{NewsItem, Quote, QuoteRow, StockSnapshot};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
