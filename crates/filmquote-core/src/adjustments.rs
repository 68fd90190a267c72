//! # Pricing Adjustments
//!
//! Seasonal, loyalty and rush rate lookups a caller may apply on top of a
//! quotation subtotal. They are never part of
//! [`crate::QuotationCalculator::calculate_quotation`].
//!
//! | lookup   | input                      | rates                              |
//! |----------|----------------------------|------------------------------------|
//! | seasonal | month 1..=12               | Mar/Apr/Nov −10%, Dec/Jan/Feb −5%  |
//! | loyalty  | lifetime purchases         | ≥50k −15%, ≥20k −10%, ≥10k −5%     |
//! | rush     | days until installation    | ≤2 +25%, ≤5 +15%, ≤7 +10%          |
//!
//! An inapplicable lookup yields rate 0, amount 0 and an empty reason.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round_half_up;

/// Which lookup produced an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    SeasonalDiscount,
    LoyaltyDiscount,
    RushSurcharge,
}

impl AdjustmentKind {
    #[inline]
    pub const fn is_surcharge(&self) -> bool {
        matches!(self, AdjustmentKind::RushSurcharge)
    }
}

/// Outcome of one lookup. `amount` is always non-negative; use
/// [`PricingAdjustment::signed_amount`] to fold it into a total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingAdjustment {
    pub kind: AdjustmentKind,
    #[ts(as = "String")]
    pub rate: Decimal,
    #[ts(as = "String")]
    pub amount: Decimal,
    pub reason: String,
}

impl PricingAdjustment {
    fn none(kind: AdjustmentKind) -> Self {
        PricingAdjustment {
            kind,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
            reason: String::new(),
        }
    }

    fn at_rate(kind: AdjustmentKind, subtotal: Decimal, rate: Decimal, reason: &str) -> Self {
        PricingAdjustment {
            kind,
            rate,
            amount: round_half_up(subtotal * rate),
            reason: reason.to_string(),
        }
    }

    #[inline]
    pub fn is_applicable(&self) -> bool {
        !self.rate.is_zero()
    }

    /// Negative for discounts, positive for surcharges.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_surcharge() {
            self.amount
        } else {
            -self.amount
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Low-season and summer discounts by calendar month.
pub fn seasonal_discount(subtotal: Decimal, month: u32) -> PricingAdjustment {
    let kind = AdjustmentKind::SeasonalDiscount;
    match month {
        3 | 4 | 11 => PricingAdjustment::at_rate(kind, subtotal, dec!(0.10), "Low season discount (10%)"),
        12 | 1 | 2 => PricingAdjustment::at_rate(kind, subtotal, dec!(0.05), "Summer discount (5%)"),
        _ => PricingAdjustment::none(kind),
    }
}

const LOYALTY_TIERS: [(Decimal, Decimal, &str); 3] = [
    (dec!(50000), dec!(0.15), "VIP customer (15%)"),
    (dec!(20000), dec!(0.10), "Premium customer (10%)"),
    (dec!(10000), dec!(0.05), "Frequent customer (5%)"),
];

/// Discount by the customer's lifetime purchase total.
///
/// ## Example
/// ```rust
/// use filmquote_core::adjustments::loyalty_discount;
/// use rust_decimal_macros::dec;
///
/// let adjustment = loyalty_discount(dec!(1000), dec!(25000));
/// assert_eq!(adjustment.rate, dec!(0.10));
/// assert_eq!(adjustment.amount, dec!(100.00));
/// assert_eq!(adjustment.signed_amount(), dec!(-100.00));
/// ```
pub fn loyalty_discount(subtotal: Decimal, customer_total_purchases: Decimal) -> PricingAdjustment {
    let kind = AdjustmentKind::LoyaltyDiscount;
    LOYALTY_TIERS
        .iter()
        .find(|(threshold, _, _)| customer_total_purchases >= *threshold)
        .map(|(_, rate, reason)| PricingAdjustment::at_rate(kind, subtotal, *rate, reason))
        .unwrap_or_else(|| PricingAdjustment::none(kind))
}

const RUSH_TIERS: [(u32, Decimal, &str); 3] = [
    (2, dec!(0.25), "Urgent installation within 48h (+25%)"),
    (5, dec!(0.15), "Express installation within 5 days (+15%)"),
    (7, dec!(0.10), "Priority installation within 1 week (+10%)"),
];

/// Surcharge for installations booked at short notice.
pub fn rush_surcharge(subtotal: Decimal, days_until_installation: u32) -> PricingAdjustment {
    let kind = AdjustmentKind::RushSurcharge;
    RUSH_TIERS
        .iter()
        .find(|(max_days, _, _)| days_until_installation <= *max_days)
        .map(|(_, rate, reason)| PricingAdjustment::at_rate(kind, subtotal, *rate, reason))
        .unwrap_or_else(|| PricingAdjustment::none(kind))
}

// =============================================================================
// Batch
// =============================================================================

/// What the caller knows about the order. Absent fields skip their lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdjustmentContext {
    pub month: Option<u32>,
    #[ts(as = "Option<String>")]
    pub customer_total_purchases: Option<Decimal>,
    pub days_until_installation: Option<u32>,
}

/// Runs every lookup the context allows and keeps the applicable ones,
/// in seasonal, loyalty, rush order.
pub fn apply_adjustments(subtotal: Decimal, context: &AdjustmentContext) -> Vec<PricingAdjustment> {
    [
        context.month.map(|m| seasonal_discount(subtotal, m)),
        context
            .customer_total_purchases
            .map(|total| loyalty_discount(subtotal, total)),
        context
            .days_until_installation
            .map(|days| rush_surcharge(subtotal, days)),
    ]
    .into_iter()
    .flatten()
    .filter(PricingAdjustment::is_applicable)
    .collect()
}

/// Sum of the signed amounts.
pub fn net_adjustment(adjustments: &[PricingAdjustment]) -> Decimal {
    adjustments.iter().map(PricingAdjustment::signed_amount).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
