//! # Waste Resolver
//!
//! Extra film consumed beyond the theoretical area, as a fraction.
//!
//! ## Resolution Order
//! ```text
//! (opening category, product category, flags)
//!      │
//!      ▼
//! curved?      ──yes──► automotive_curved bucket
//! automotive?  ──yes──► automotive_flat bucket
//!      │
//!      ▼
//! matrix[bucket][product]  (missing → default 15%)
//!      │
//!      ▼
//! + difficult_access (+5%)  + irregular_shape (+8%)
//!      │
//!      ▼
//! min(result, cap 35%)
//! ```

use rust_decimal::Decimal;

use crate::config::WasteRules;
use crate::types::{OpeningCategory, OpeningFlags, ProductCategory};

/// Category the waste matrix is read with, after the flag overrides.
pub fn effective_category(category: OpeningCategory, flags: &OpeningFlags) -> OpeningCategory {
    if flags.curved {
        OpeningCategory::AutomotiveCurved
    } else if flags.automotive {
        OpeningCategory::AutomotiveFlat
    } else {
        category
    }
}

/// Resolves the waste fraction for one opening/product pair.
///
/// Never fails: pairs missing from the matrix, including unknown opening
/// categories, use `rules.default_fraction`.
///
/// ## Example
/// ```rust
/// use filmquote_core::config::WasteRules;
/// use filmquote_core::waste::resolve_waste;
/// use filmquote_core::{OpeningCategory, OpeningFlags, ProductCategory};
/// use rust_decimal_macros::dec;
///
/// let rules = WasteRules::default();
/// let flags = OpeningFlags { curved: true, ..OpeningFlags::default() };
/// let waste = resolve_waste(
///     &rules,
///     OpeningCategory::Window,
///     ProductCategory::LaminateSecurity,
///     &flags,
/// );
/// assert_eq!(waste, dec!(0.30));
/// ```
pub fn resolve_waste(
    rules: &WasteRules,
    category: OpeningCategory,
    product: ProductCategory,
    flags: &OpeningFlags,
) -> Decimal {
    let bucket = effective_category(category, flags);

    let mut fraction = rules
        .matrix
        .get(bucket.as_str())
        .and_then(|row| row.get(product.as_str()))
        .copied()
        .unwrap_or(rules.default_fraction);

    if flags.difficult_access {
        fraction += rules.difficult_access;
    }
    if flags.irregular_shape {
        fraction += rules.irregular_shape;
    }

    fraction.min(rules.max_fraction)
}

// =============================================================================
// Unit Tests
// =============================================================================
