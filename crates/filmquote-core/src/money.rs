//! # Money Module
//!
//! Rounding discipline and currency formatting for quotation amounts.
//!
//! ## Why Fixed-Point Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    3.45 m² × 22.00 = 75.89999999999999  ❌ WRONG!                       │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    3.45 × 22.00 = 75.9000 exactly, rounded once at each boundary       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Rule
//! Every monetary and area boundary rounds to two decimals, half away from
//! zero (`2.345 → 2.35`). There is exactly one helper for it,
//! [`round_half_up`], so repeated runs are bit-for-bit identical.
//!
//! ## Usage
//! ```rust
//! use filmquote_core::money::{format_currency, round_half_up};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(round_half_up(dec!(2.345)), dec!(2.35));
//! assert_eq!(format_currency(dec!(1234.5), "USD"), "$1,234.50");
//! assert_eq!(format_currency(dec!(99.999), "EUR"), "€100.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Decimal places kept at every rounding boundary.
pub const DECIMAL_PLACES: u32 = 2;

/// Rounds to two decimals, half away from zero.
///
/// ## Example
/// ```rust
/// use filmquote_core::money::round_half_up;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_half_up(dec!(0.445)), dec!(0.45));
/// assert_eq!(round_half_up(dec!(-0.445)), dec!(-0.45));
/// assert_eq!(round_half_up(dec!(3)), dec!(3));
/// ```
#[inline]
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Currency
// =============================================================================

/// Currencies with a known display symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Ars,
    Eur,
    Gbp,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Display symbol. USD and ARS both print as `$`.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd | Currency::Ars => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Formats an amount in this currency, e.g. `$1,234.56`.
    pub fn format(&self, amount: Decimal) -> String {
        format_with_symbol(amount, self.symbol())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "ARS" => Ok(Currency::Ars),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(ValidationError::InvalidFormat {
                field: "currency".to_string(),
                reason: format!("unsupported currency '{}'", s),
            }),
        }
    }
}

/// Symbol for a currency code; unknown codes fall back to `$`.
pub fn currency_symbol(code: &str) -> &'static str {
    code.parse::<Currency>().map(|c| c.symbol()).unwrap_or("$")
}

/// Formats an amount for customer-facing text.
///
/// Rounds half-up to two decimals and groups thousands with `,`.
/// Negative amounts print as `-$5.50`.
pub fn format_currency(amount: Decimal, code: &str) -> String {
    format_with_symbol(amount, currency_symbol(code))
}

fn format_with_symbol(amount: Decimal, symbol: &str) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, symbol, group_thousands(rounded.abs()))
}

/// `1234567.8` → `1,234,567.80`
fn group_thousands(value: Decimal) -> String {
    let mut value = value;
    value.rescale(DECIMAL_PLACES);
    let text = value.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    format!("{}.{}", grouped, frac_part)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up_midpoints() {
        assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
        assert_eq!(round_half_up(dec!(0.135)), dec!(0.14));
        assert_eq!(round_half_up(dec!(2.5149)), dec!(2.51));
        assert_eq!(round_half_up(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn test_round_half_up_is_not_bankers() {
        // Bankers rounding would give 0.12 here.
        assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.56), "USD"), "$1,234.56");
        assert_eq!(format_currency(dec!(5), "USD"), "$5.00");
        assert_eq!(format_currency(dec!(0), "USD"), "$0.00");
        assert_eq!(format_currency(dec!(1000000), "ARS"), "$1,000,000.00");
        assert_eq!(format_currency(dec!(999.995), "GBP"), "£1,000.00");
        assert_eq!(format_currency(dec!(-5.5), "EUR"), "-€5.50");
    }

    #[test]
    fn test_unknown_currency_falls_back_to_dollar() {
        assert_eq!(currency_symbol("JPY"), "$");
        assert_eq!(format_currency(dec!(12.3), "XYZ"), "$12.30");
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" GBP ".parse::<Currency>().unwrap(), Currency::Gbp);
        assert!("BTC".parse::<Currency>().is_err());
        assert_eq!(Currency::default(), Currency::Usd);
    }

    #[test]
    fn test_group_thousands_small_values() {
        assert_eq!(group_thousands(dec!(0.5)), "0.50");
        assert_eq!(group_thousands(dec!(999)), "999.00");
        assert_eq!(group_thousands(dec!(1000)), "1,000.00");
    }
}
