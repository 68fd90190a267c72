//! # Quotation Aggregator
//!
//! [`QuotationCalculator`] prices every opening/product pair and folds the
//! lines into one invoice.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  openings[i] + products[i]                                              │
//! │        │  (length mismatch → CoreError::OpeningProductMismatch,         │
//! │        │   raised before any line is priced)                           │
//! │        ▼                                                                │
//! │  price_item ×N ──► items                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Σ areas, Σ material, Σ installation   (rounded once, at the end)       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  subtotal_before_discount = material + installation                     │
//! │  volume discount: first tier with total_final_area ≥ min_area           │
//! │        500 m² → 20%   200 m² → 15%   100 m² → 10%   50 m² → 5%          │
//! │  subtotal_after_discount = before − discount                            │
//! │  tax   = after × tax_rate   (override, else configured default)         │
//! │  total = after + tax                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step rounds half-up to two decimals, so
//! `total == subtotal_after_discount + tax_amount` holds exactly.
//!
//! ## Example
//! ```rust
//! use filmquote_core::{
//!     OpeningCategory, OpeningFlags, OpeningInput, ProductCategory, ProductInput,
//!     QuotationCalculator,
//! };
//! use rust_decimal_macros::dec;
//!
//! let opening = OpeningInput {
//!     id: "o-1".to_string(),
//!     room_name: "Office".to_string(),
//!     floor: 1,
//!     category: OpeningCategory::Window,
//!     width: dec!(1.5),
//!     height: dec!(2.0),
//!     quantity: 1,
//!     flags: OpeningFlags::default(),
//! };
//! let product = ProductInput {
//!     id: "p-1".to_string(),
//!     sku: "SOL-70".to_string(),
//!     name: "Solar Control 70".to_string(),
//!     category: ProductCategory::SolarControl,
//!     price_per_area: dec!(20),
//!     installation_per_area: dec!(10),
//! };
//!
//! let calculator = QuotationCalculator::default();
//! let result = calculator
//!     .calculate_quotation(&[opening], &[product], None)
//!     .unwrap();
//!
//! assert_eq!(result.total_final_area, dec!(3.45));
//! assert_eq!(result.subtotal_before_discount, dec!(103.50));
//! assert_eq!(result.tax_amount, dec!(21.74));
//! assert_eq!(result.total, dec!(125.24));
//! ```

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::PricingConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::round_half_up;
use crate::pricing::{self, CalculationItem};
use crate::types::{OpeningInput, ProductInput};

// =============================================================================
// Result Types
// =============================================================================

/// Aggregate statistics kept alongside the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationDetails {
    pub items_count: usize,

    /// `total_waste_area / total_base_area`, 0 when there is no base area.
    #[ts(as = "String")]
    pub average_waste_fraction: Decimal,

    /// Whether total final area reached the smallest discount tier.
    pub volume_discount_threshold_reached: bool,

    #[ts(as = "String")]
    pub tax_rate: Decimal,

    /// Any line with a complexity factor above 1.
    pub has_complex_installation: bool,

    /// Distinct room labels across the lines.
    pub total_rooms: usize,
}

/// The full invoice for one quotation build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotationCalculationResult {
    pub items: Vec<CalculationItem>,

    #[ts(as = "String")]
    pub total_base_area: Decimal,
    #[ts(as = "String")]
    pub total_waste_area: Decimal,
    #[ts(as = "String")]
    pub total_final_area: Decimal,

    #[ts(as = "String")]
    pub material_subtotal: Decimal,
    #[ts(as = "String")]
    pub installation_subtotal: Decimal,
    #[ts(as = "String")]
    pub subtotal_before_discount: Decimal,

    /// Fraction of the tier that applied (0.05 = 5%).
    #[ts(as = "String")]
    pub volume_discount_rate: Decimal,
    #[ts(as = "String")]
    pub volume_discount_amount: Decimal,

    #[ts(as = "String")]
    pub subtotal_after_discount: Decimal,

    #[ts(as = "String")]
    pub tax_rate: Decimal,
    #[ts(as = "String")]
    pub tax_amount: Decimal,

    #[ts(as = "String")]
    pub total: Decimal,

    pub details: CalculationDetails,
}

// =============================================================================
// Calculator
// =============================================================================

/// Stateless quotation engine over an immutable set of pricing tables.
///
/// Cheap to share: every call works on its own locals, so one calculator can
/// serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct QuotationCalculator {
    config: PricingConfig,
}

impl QuotationCalculator {
    /// Builds a calculator after checking the tables.
    pub fn new(config: PricingConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(QuotationCalculator { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Prices one opening/product pair with this calculator's tables.
    pub fn price_item(&self, opening: &OpeningInput, product: &ProductInput) -> CalculationItem {
        pricing::price_item(&self.config, opening, product)
    }

    /// Discount fraction for a total billed area; 0 below the lowest tier.
    ///
    /// Tiers are checked in listed (descending) order and the first reached
    /// tier wins, so exactly one rate ever applies.
    pub fn resolve_volume_discount(&self, total_final_area: Decimal) -> Decimal {
        self.config
            .volume_discounts
            .iter()
            .find(|tier| total_final_area >= tier.min_area)
            .map(|tier| tier.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Tax rate a quotation will use: the override when given, else the
    /// configured default. An explicit zero override is honored.
    pub fn effective_tax_rate(&self, tax_override: Option<Decimal>) -> Decimal {
        tax_override.unwrap_or(self.config.default_tax_rate)
    }

    /// Prices all pairs and aggregates them into one result.
    ///
    /// ## Errors
    /// [`CoreError::OpeningProductMismatch`] when the two slices differ in
    /// length. Nothing is priced in that case. Per-field data is not checked
    /// here; run [`crate::validation::validate_quotation_inputs`] first.
    pub fn calculate_quotation(
        &self,
        openings: &[OpeningInput],
        products: &[ProductInput],
        tax_override: Option<Decimal>,
    ) -> CoreResult<QuotationCalculationResult> {
        if openings.len() != products.len() {
            return Err(CoreError::OpeningProductMismatch {
                openings: openings.len(),
                products: products.len(),
            });
        }

        let tax_rate = self.effective_tax_rate(tax_override);

        let items: Vec<CalculationItem> = openings
            .iter()
            .zip(products)
            .map(|(opening, product)| self.price_item(opening, product))
            .collect();

        let total_base_area = sum_rounded(&items, |i| i.base_area);
        let total_waste_area = sum_rounded(&items, |i| i.waste_area);
        let total_final_area = sum_rounded(&items, |i| i.final_area);
        let material_subtotal = sum_rounded(&items, |i| i.material_subtotal);
        let installation_subtotal = sum_rounded(&items, |i| i.installation_subtotal);

        let subtotal_before_discount = round_half_up(material_subtotal + installation_subtotal);

        let volume_discount_rate = self.resolve_volume_discount(total_final_area);
        let volume_discount_amount = round_half_up(subtotal_before_discount * volume_discount_rate);
        let subtotal_after_discount =
            round_half_up(subtotal_before_discount - volume_discount_amount);

        let tax_amount = round_half_up(subtotal_after_discount * tax_rate);
        let total = round_half_up(subtotal_after_discount + tax_amount);

        let details = CalculationDetails {
            items_count: items.len(),
            average_waste_fraction: if total_base_area > Decimal::ZERO {
                total_waste_area / total_base_area
            } else {
                Decimal::ZERO
            },
            volume_discount_threshold_reached: self
                .config
                .discount_threshold()
                .is_some_and(|threshold| total_final_area >= threshold),
            tax_rate,
            has_complex_installation: items.iter().any(CalculationItem::is_complex),
            total_rooms: items
                .iter()
                .map(CalculationItem::room)
                .collect::<BTreeSet<_>>()
                .len(),
        };

        debug!(
            items = details.items_count,
            %total_final_area,
            %volume_discount_rate,
            %tax_rate,
            %total,
            "Calculated quotation"
        );

        Ok(QuotationCalculationResult {
            items,
            total_base_area,
            total_waste_area,
            total_final_area,
            material_subtotal,
            installation_subtotal,
            subtotal_before_discount,
            volume_discount_rate,
            volume_discount_amount,
            subtotal_after_discount,
            tax_rate,
            tax_amount,
            total,
            details,
        })
    }
}

/// Sums one column across the lines, rounding once at the end.
fn sum_rounded<F>(items: &[CalculationItem], field: F) -> Decimal
where
    F: Fn(&CalculationItem) -> Decimal,
{
    round_half_up(items.iter().map(field).sum())
}

// =============================================================================
// Unit Tests
// =============================================================================
