//! # Area Calculator
//!
//! Base film area for one opening, before waste.
//!
//! ```text
//!   window, door, ...      strip_horizontal        strip_vertical
//!   ┌──────────┐           ════════════ width      ║
//!   │  w × h   │                                   ║ height
//!   └──────────┘                                   ║
//!   w × h × qty            w × qty × roll          h × qty × roll
//! ```
//!
//! Strips are sold by linear meter but billed by area: one linear meter of
//! strip consumes one meter of roll, which is `film_roll_width` wide.

use rust_decimal::Decimal;

use crate::money::round_half_up;
use crate::types::{OpeningCategory, OpeningInput};

/// Linear meters of strip needed for an opening (before roll conversion).
fn strip_length(opening: &OpeningInput) -> Decimal {
    let run = match opening.category {
        OpeningCategory::StripVertical => opening.height,
        _ => opening.width,
    };
    run * Decimal::from(opening.quantity)
}

/// Resolves the base area in m², rounded half-up to two decimals.
///
/// ## Example
/// ```rust
/// use filmquote_core::area::resolve_area;
/// use filmquote_core::{OpeningCategory, OpeningFlags, OpeningInput};
/// use rust_decimal_macros::dec;
///
/// let strip = OpeningInput {
///     id: "s-1".to_string(),
///     room_name: "Lobby".to_string(),
///     floor: 1,
///     category: OpeningCategory::StripHorizontal,
///     width: dec!(4),
///     height: dec!(0.1),
///     quantity: 2,
///     flags: OpeningFlags::default(),
/// };
/// assert_eq!(resolve_area(&strip, dec!(1.52)), dec!(12.16));
/// ```
pub fn resolve_area(opening: &OpeningInput, film_roll_width: Decimal) -> Decimal {
    let area = if opening.category.is_strip() {
        strip_length(opening) * film_roll_width
    } else {
        opening.width * opening.height * Decimal::from(opening.quantity)
    };
    round_half_up(area)
}

// =============================================================================
// Unit Tests
// =============================================================================
