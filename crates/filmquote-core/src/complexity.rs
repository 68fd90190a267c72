//! # Complexity Resolver
//!
//! Installation difficulty as a multiplier on labor cost. Material cost is
//! never touched by it.
//!
//! Each applicable condition multiplies the running factor (starting at
//! 1.0), so evaluation order does not matter and there is no cap:
//!
//! | condition            | multiplier |
//! |----------------------|------------|
//! | floor bracket        | ×1.2 / ×1.4 (first listed bracket that fires) |
//! | difficult_access     | ×1.3       |
//! | curved               | ×1.5       |
//! | extreme_weather      | ×1.15      |
//! | night_install        | ×1.25      |
//! | requires_scaffolding | ×1.4       |

use rust_decimal::Decimal;

use crate::config::ComplexityRules;
use crate::types::OpeningFlags;

/// Multiplier from the first floor bracket that fires, or 1.
pub fn floor_multiplier(rules: &ComplexityRules, floor: u32) -> Decimal {
    rules
        .floor_brackets
        .iter()
        .find(|bracket| floor > bracket.above_floor)
        .map(|bracket| bracket.multiplier)
        .unwrap_or(Decimal::ONE)
}

/// Resolves the combined complexity factor for one opening.
///
/// ## Example
/// ```rust
/// use filmquote_core::complexity::resolve_complexity;
/// use filmquote_core::config::ComplexityRules;
/// use filmquote_core::OpeningFlags;
/// use rust_decimal_macros::dec;
///
/// let flags = OpeningFlags {
///     difficult_access: true,
///     night_install: true,
///     ..OpeningFlags::default()
/// };
/// // 1.3 × 1.25
/// assert_eq!(resolve_complexity(&ComplexityRules::default(), &flags), dec!(1.625));
/// ```
pub fn resolve_complexity(rules: &ComplexityRules, flags: &OpeningFlags) -> Decimal {
    let conditions = [
        (flags.difficult_access, rules.difficult_access),
        (flags.curved, rules.curved),
        (flags.extreme_weather, rules.extreme_weather),
        (flags.night_install, rules.night_install),
        (flags.requires_scaffolding, rules.requires_scaffolding),
    ];

    conditions
        .into_iter()
        .filter(|(applies, _)| *applies)
        .fold(
            floor_multiplier(rules, flags.effective_floor()),
            |factor, (_, multiplier)| factor * multiplier,
        )
}

// =============================================================================
// Unit Tests
// =============================================================================
