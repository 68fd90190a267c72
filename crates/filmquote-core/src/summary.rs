//! # Quotation Summary
//!
//! Customer-facing view of a [`QuotationCalculationResult`]: every money
//! line carries both its value and a formatted string.
//!
//! ```text
//! QuotationSummary
//! ├── items_count
//! ├── total_area      { value, "56.00 m²" }
//! ├── pricing
//! │   ├── material       { value, "$840.00" }
//! │   ├── installation   { value, "$448.00" }
//! │   ├── subtotal       { value, "$1,288.00" }
//! │   ├── discount       { percentage: 5,  value, "$64.40" }
//! │   ├── tax            { rate: 21,       value, "$256.96" }
//! │   └── total          { value, "$1,480.56" }
//! └── details         (copied from the result)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{round_half_up, Currency, DECIMAL_PLACES};
use crate::pricing::AREA_UNIT;
use crate::quotation::{CalculationDetails, QuotationCalculationResult};

/// A value with its display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormattedAmount {
    #[ts(as = "String")]
    pub value: Decimal,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountLine {
    /// Percent, e.g. `5` for a 5% tier.
    #[ts(as = "String")]
    pub percentage: Decimal,
    #[ts(as = "String")]
    pub value: Decimal,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxLine {
    /// Percent, e.g. `21`.
    #[ts(as = "String")]
    pub rate: Decimal,
    #[ts(as = "String")]
    pub value: Decimal,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingLines {
    pub material: FormattedAmount,
    pub installation: FormattedAmount,
    pub subtotal: FormattedAmount,
    pub discount: DiscountLine,
    pub tax: TaxLine,
    pub total: FormattedAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotationSummary {
    pub currency: Currency,
    pub items_count: usize,
    pub total_area: FormattedAmount,
    pub pricing: PricingLines,
    pub details: CalculationDetails,
}

impl QuotationSummary {
    /// Builds the summary in the given display currency. No conversion
    /// happens: only the symbol changes.
    pub fn from_result(result: &QuotationCalculationResult, currency: Currency) -> Self {
        let money = |value: Decimal| FormattedAmount {
            value,
            formatted: currency.format(value),
        };

        QuotationSummary {
            currency,
            items_count: result.items.len(),
            total_area: FormattedAmount {
                value: result.total_final_area,
                formatted: format_area(result.total_final_area),
            },
            pricing: PricingLines {
                material: money(result.material_subtotal),
                installation: money(result.installation_subtotal),
                subtotal: money(result.subtotal_before_discount),
                discount: DiscountLine {
                    percentage: as_percent(result.volume_discount_rate),
                    value: result.volume_discount_amount,
                    formatted: currency.format(result.volume_discount_amount),
                },
                tax: TaxLine {
                    rate: as_percent(result.tax_rate),
                    value: result.tax_amount,
                    formatted: currency.format(result.tax_amount),
                },
                total: money(result.total),
            },
            details: result.details.clone(),
        }
    }
}

/// `12.5` → `"12.50 m²"`
pub fn format_area(area: Decimal) -> String {
    let mut value = round_half_up(area);
    value.rescale(DECIMAL_PLACES);
    format!("{} {}", value, AREA_UNIT)
}

fn as_percent(fraction: Decimal) -> Decimal {
    (fraction * Decimal::ONE_HUNDRED).normalize()
}

// =============================================================================
// Unit Tests
// =============================================================================
