//! # Error Types
//!
//! Domain-specific error types for filmquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  filmquote-core errors (this file)                                     │
//! │  ├── CoreError        - Quotation cannot be built                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quote-cli errors (app crate)                                          │
//! │  └── CliError         - Config, request file, JSON                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown opening/product category combinations are NOT errors: they fall
//! back to the default waste fraction so any well-formed input prices.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors that stop a quotation from being built.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Openings and products are paired by position, so both lists must
    /// have the same length.
    ///
    /// ## When This Occurs
    /// Raised by `calculate_quotation` before any item is priced. No partial
    /// result is produced.
    #[error("Must have one product per opening: got {openings} openings and {products} products")]
    OpeningProductMismatch { openings: usize, products: usize },

    /// Pricing tables are internally inconsistent.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the validators in [`crate::validation`], which callers run
/// before handing inputs to the calculator.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Invalid format (e.g. SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mismatch_message() {
        let err = CoreError::OpeningProductMismatch {
            openings: 3,
            products: 2,
        };
        assert_eq!(
            err.to_string(),
            "Must have one product per opening: got 3 openings and 2 products"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "width".to_string(),
        };
        assert_eq!(err.to_string(), "width must be positive");

        let err = ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: dec!(0),
            max: dec!(1),
        };
        assert_eq!(err.to_string(), "tax_rate must be between 0 and 1");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
