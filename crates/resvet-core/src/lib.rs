//! Shared domain types and configuration for resvet.
//!
//! Holds the risk-flag and confidence vocabulary used across the extraction,
//! verification, and scoring crates, the environment-driven [`AppConfig`],
//! and the injectable extraction [`Vocabulary`] loaded from YAML.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod text;
pub mod types;
pub mod vocabulary;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use text::title_case;
pub use types::{FlagCounts, RegistryConfidence, RiskFlag, Severity};
pub use vocabulary::Vocabulary;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read vocabulary file {path}: {source}")]
    VocabularyIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary file: {0}")]
    VocabularyParse(#[from] serde_yaml::Error),

    #[error("vocabulary validation failed: {0}")]
    Validation(String),
}
