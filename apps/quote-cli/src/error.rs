//! # CLI Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Request      │  │      Engine             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigNotFound │  │  Io             │  │  Core (mismatch,        │ │
//! │  │  ConfigParse    │  │  Json           │  │        validation,      │ │
//! │  │  InvalidConfig  │  │                 │  │        pricing tables)  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `main` wraps these in `anyhow` so the process exits non-zero with the
//! message.

use std::path::PathBuf;

use filmquote_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config path was given explicitly but does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Request Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(CoreError::Validation(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let err: CliError = CoreError::OpeningProductMismatch {
            openings: 2,
            products: 1,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Must have one product per opening: got 2 openings and 1 products"
        );
    }

    #[test]
    fn test_validation_error_wraps_into_core() {
        let err: CliError = ValidationError::Required {
            field: "sku".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_missing_config_names_path() {
        let err = CliError::ConfigNotFound(PathBuf::from("/tmp/nope.toml"));
        assert_eq!(err.to_string(), "Config file not found: /tmp/nope.toml");
    }
}
