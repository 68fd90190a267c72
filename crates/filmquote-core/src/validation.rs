//! # Validation Module
//!
//! Input validation for quotation requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Closed category sets, typed flags                                 │
//! │  └── Misspelled flag keys rejected                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (caller runs it before pricing)                  │
//! │  ├── Dimensions, quantity and prices within bounds                     │
//! │  ├── SKU/name format                                                   │
//! │  └── Tax rate within [0, 1]                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: QuotationCalculator                                          │
//! │  └── Opening/product length check only                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use filmquote_core::validation::{validate_sku, validate_tax_rate};
//! use rust_decimal_macros::dec;
//!
//! validate_sku("LAM-SEC-4MIL").unwrap();
//! validate_tax_rate(dec!(0.21)).unwrap();
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{OpeningInput, ProductInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted room/location label.
pub const MAX_ROOM_NAME_LEN: usize = 100;

/// Largest accepted width or height, in meters.
pub const MAX_DIMENSION: Decimal = dec!(1000);

/// Most identical openings on one line.
pub const MAX_OPENING_QUANTITY: u32 = 10_000;

/// Highest accepted material or installation price per m².
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000);

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use filmquote_core::validation::validate_sku;
///
/// assert!(validate_sku("SOL-CTRL_70").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name (1 to 200 characters).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a room or location label.
///
/// The label becomes the prefix of the line's display name and is what the
/// distinct-room count groups by.
pub fn validate_room_name(room: &str) -> ValidationResult<()> {
    let room = room.trim();

    if room.is_empty() {
        return Err(ValidationError::Required {
            field: "room_name".to_string(),
        });
    }

    if room.chars().count() > MAX_ROOM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "room_name".to_string(),
            max: MAX_ROOM_NAME_LEN,
        });
    }

    Ok(())
}

fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a dimension in meters.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_DIMENSION (1000 m)
pub fn validate_dimension(field: &str, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if value > MAX_DIMENSION {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: MAX_DIMENSION,
        });
    }

    Ok(())
}

/// Validates an opening quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_OPENING_QUANTITY (10,000)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_OPENING_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: Decimal::ONE,
            max: Decimal::from(MAX_OPENING_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a unit price per m². Zero is allowed (free material or labor).
///
/// ## Example
/// ```rust
/// use filmquote_core::validation::validate_unit_price;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_unit_price("price_per_area", dec!(18.50)).is_ok());
/// assert!(validate_unit_price("price_per_area", dec!(0)).is_ok());
/// assert!(validate_unit_price("price_per_area", dec!(-1)).is_err());
/// assert!(validate_unit_price("price_per_area", dec!(2000000)).is_err());
/// ```
pub fn validate_unit_price(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    if value > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates a tax rate given as a fraction.
///
/// ## Rules
/// - Must be between 0 and 1 (0% to 100%)
/// - Most VAT rates are 0.0 to 0.27
pub fn validate_tax_rate(rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates one opening.
///
/// ## Rules
/// - `id` and `room_name` present, room at most 100 characters
/// - `width`, `height` and `quantity` strictly positive and within the
///   MAX_DIMENSION / MAX_OPENING_QUANTITY bounds
/// - `floor` at least 1
pub fn validate_opening(opening: &OpeningInput) -> ValidationResult<()> {
    validate_id("id", &opening.id)?;
    validate_room_name(&opening.room_name)?;
    validate_dimension("width", opening.width)?;
    validate_dimension("height", opening.height)?;

    validate_quantity(opening.quantity)?;

    if opening.floor == 0 {
        return Err(ValidationError::MustBePositive {
            field: "floor".to_string(),
        });
    }

    Ok(())
}

/// Validates one product.
pub fn validate_product(product: &ProductInput) -> ValidationResult<()> {
    validate_id("id", &product.id)?;
    validate_sku(&product.sku)?;
    validate_product_name(&product.name)?;
    validate_unit_price("price_per_area", product.price_per_area)?;
    validate_unit_price("installation_per_area", product.installation_per_area)?;
    Ok(())
}

/// Validates a whole request before it is handed to the calculator.
///
/// The length check runs first so a mismatch is reported as such rather
/// than as a problem with some element. Element errors name their position,
/// e.g. `openings[2].width must be positive`.
pub fn validate_quotation_inputs(
    openings: &[OpeningInput],
    products: &[ProductInput],
    tax_override: Option<Decimal>,
) -> CoreResult<()> {
    if openings.len() != products.len() {
        return Err(CoreError::OpeningProductMismatch {
            openings: openings.len(),
            products: products.len(),
        });
    }

    for (index, opening) in openings.iter().enumerate() {
        validate_opening(opening).map_err(|e| at_position("openings", index, e))?;
    }
    for (index, product) in products.iter().enumerate() {
        validate_product(product).map_err(|e| at_position("products", index, e))?;
    }
    if let Some(rate) = tax_override {
        validate_tax_rate(rate)?;
    }

    Ok(())
}

fn at_position(list: &str, index: usize, mut error: ValidationError) -> ValidationError {
    let field = match &mut error {
        ValidationError::Required { field }
        | ValidationError::TooLong { field, .. }
        | ValidationError::MustBePositive { field }
        | ValidationError::MustBeNonNegative { field }
        | ValidationError::OutOfRange { field, .. }
        | ValidationError::InvalidFormat { field, .. } => field,
    };
    *field = format!("{}[{}].{}", list, index, field);
    error
}

// =============================================================================
// Unit Tests
// =============================================================================
