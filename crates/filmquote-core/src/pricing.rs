//! # Item Pricer
//!
//! Turns one opening/product pair into a priced [`CalculationItem`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OpeningInput ─┬─► resolve_area ──────────► base_area        (rounded)  │
//! │                │                                │                       │
//! │  ProductInput ─┼─► resolve_waste ─► fraction ───┤                       │
//! │                │                                ▼                       │
//! │                │                 waste_area = base × fraction (rounded) │
//! │                │                 final_area = base + waste    (rounded) │
//! │                │                                │                       │
//! │                └─► resolve_complexity ─► factor │                       │
//! │                                            │    ▼                       │
//! │  material_subtotal     = final_area × price_per_area            (rounded)│
//! │  installation_subtotal = final_area × installation × factor     (rounded)│
//! │  item_subtotal         = material_subtotal + installation_subtotal      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The complexity factor touches installation only, never material.
//! `waste_area` and `final_area` are each rounded from unrounded values, so
//! `final_area` may differ by a cent from `base_area + waste_area`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::area::resolve_area;
use crate::complexity::resolve_complexity;
use crate::config::PricingConfig;
use crate::money::round_half_up;
use crate::types::{OpeningFlags, OpeningInput, ProductInput};
use crate::waste::resolve_waste;

/// Billing unit printed on every line.
pub const AREA_UNIT: &str = "m²";

/// Separator between room and category in [`CalculationItem::display_name`].
pub const DISPLAY_NAME_SEPARATOR: &str = " - ";

/// The priced outcome for one opening/product pair.
///
/// Immutable once built. Every derived field is a deterministic function of
/// the two inputs and the pricing tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationItem {
    pub opening_id: String,
    pub product_id: String,

    /// `"{room} - {category}"`
    pub display_name: String,
    pub product_name: String,

    #[ts(as = "String")]
    pub width: Decimal,
    #[ts(as = "String")]
    pub height: Decimal,

    /// Area before waste, m².
    #[ts(as = "String")]
    pub base_area: Decimal,
    /// Waste as a fraction (0.15 = 15%).
    #[ts(as = "String")]
    pub waste_fraction: Decimal,
    #[ts(as = "String")]
    pub waste_area: Decimal,
    /// Billed area, waste included.
    #[ts(as = "String")]
    pub final_area: Decimal,
    pub quantity: u32,

    #[ts(as = "String")]
    pub material_unit_cost: Decimal,
    /// Installation per m² with the complexity factor already applied.
    #[ts(as = "String")]
    pub installation_unit_cost: Decimal,
    #[ts(as = "String")]
    pub complexity_factor: Decimal,

    #[ts(as = "String")]
    pub material_subtotal: Decimal,
    #[ts(as = "String")]
    pub installation_subtotal: Decimal,
    #[ts(as = "String")]
    pub item_subtotal: Decimal,

    pub unit: String,

    /// Copy of the opening flags, for traceability.
    pub flags: OpeningFlags,
}

impl CalculationItem {
    /// Room label, taken from the display name.
    pub fn room(&self) -> &str {
        self.display_name
            .split(DISPLAY_NAME_SEPARATOR)
            .next()
            .unwrap_or_default()
    }

    /// True when installation on this line costs more than the plain rate.
    #[inline]
    pub fn is_complex(&self) -> bool {
        self.complexity_factor > Decimal::ONE
    }
}

/// Prices one opening with one product.
///
/// No error conditions: inputs are expected to have passed
/// [`crate::validation`] already.
pub fn price_item(
    config: &PricingConfig,
    opening: &OpeningInput,
    product: &ProductInput,
) -> CalculationItem {
    let base_area = resolve_area(opening, config.film_roll_width);

    let waste_fraction = resolve_waste(
        &config.waste,
        opening.category,
        product.category,
        &opening.flags,
    );
    let unrounded_waste = base_area * waste_fraction;
    let waste_area = round_half_up(unrounded_waste);
    let final_area = round_half_up(base_area + unrounded_waste);

    let complexity_factor = resolve_complexity(&config.complexity, &opening.flags);

    let material_unit_cost = product.price_per_area;
    let installation_unit_cost = product.installation_per_area * complexity_factor;

    let material_subtotal = round_half_up(final_area * material_unit_cost);
    let installation_subtotal = round_half_up(final_area * installation_unit_cost);
    let item_subtotal = round_half_up(material_subtotal + installation_subtotal);

    trace!(
        opening_id = %opening.id,
        product_sku = %product.sku,
        %base_area,
        %waste_fraction,
        %final_area,
        %complexity_factor,
        %item_subtotal,
        "priced item"
    );

    CalculationItem {
        opening_id: opening.id.clone(),
        product_id: product.id.clone(),
        display_name: opening.display_name(),
        product_name: product.name.clone(),
        width: opening.width,
        height: opening.height,
        base_area,
        waste_fraction,
        waste_area,
        final_area,
        quantity: opening.quantity,
        material_unit_cost,
        installation_unit_cost,
        complexity_factor,
        material_subtotal,
        installation_subtotal,
        item_subtotal,
        unit: AREA_UNIT.to_string(),
        flags: opening.flags.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OpeningCategory, ProductCategory};
    use rust_decimal_macros::dec;

    fn window(width: Decimal, height: Decimal, flags: OpeningFlags) -> OpeningInput {
        OpeningInput {
            id: "o-1".to_string(),
            room_name: "Living room".to_string(),
            floor: 1,
            category: OpeningCategory::Window,
            width,
            height,
            quantity: 1,
            flags,
        }
    }

    fn laminate(price: Decimal, installation: Decimal) -> ProductInput {
        ProductInput {
            id: "p-1".to_string(),
            sku: "LAM-SEC-4MIL".to_string(),
            name: "Security Laminate 4mil".to_string(),
            category: ProductCategory::LaminateSecurity,
            price_per_area: price,
            installation_per_area: installation,
        }
    }

    #[test]
    fn test_price_plain_window() {
        let item = price_item(
            &PricingConfig::default(),
            &window(dec!(1.5), dec!(2.0), OpeningFlags::default()),
            &laminate(dec!(22), dec!(10)),
        );

        assert_eq!(item.base_area, dec!(3.00));
        assert_eq!(item.waste_fraction, dec!(0.15));
        assert_eq!(item.waste_area, dec!(0.45));
        assert_eq!(item.final_area, dec!(3.45));
        assert_eq!(item.complexity_factor, Decimal::ONE);
        assert_eq!(item.material_subtotal, dec!(75.90));
        assert_eq!(item.installation_subtotal, dec!(34.50));
        assert_eq!(item.item_subtotal, dec!(110.40));
        assert_eq!(item.unit, "m²");
        assert_eq!(item.display_name, "Living room - window");
        assert_eq!(item.room(), "Living room");
        assert!(!item.is_complex());
    }

    #[test]
    fn test_complexity_only_touches_installation() {
        let flags = OpeningFlags {
            night_install: true,
            ..OpeningFlags::default()
        };
        let item = price_item(
            &PricingConfig::default(),
            &window(dec!(1.5), dec!(2.0), flags),
            &laminate(dec!(22), dec!(10)),
        );

        assert_eq!(item.material_unit_cost, dec!(22));
        assert_eq!(item.installation_unit_cost, dec!(12.50));
        assert_eq!(item.material_subtotal, dec!(75.90));
        // 3.45 × 12.5 = 43.125 → 43.13
        assert_eq!(item.installation_subtotal, dec!(43.13));
        assert_eq!(item.item_subtotal, dec!(119.03));
        assert!(item.is_complex());
    }

    #[test]
    fn test_waste_and_final_area_round_independently() {
        // base 1.01 × 0.15 = 0.1515 → waste 0.15; final 1.1615 → 1.16
        let item = price_item(
            &PricingConfig::default(),
            &window(dec!(1.01), dec!(1), OpeningFlags::default()),
            &laminate(dec!(1), dec!(0)),
        );
        assert_eq!(item.base_area, dec!(1.01));
        assert_eq!(item.waste_area, dec!(0.15));
        assert_eq!(item.final_area, dec!(1.16));

        // base 0.99 × 0.15 = 0.1485 → waste 0.15; final 1.1385 → 1.14 (not 0.99 + 0.15)
        let item = price_item(
            &PricingConfig::default(),
            &window(dec!(0.99), dec!(1), OpeningFlags::default()),
            &laminate(dec!(1), dec!(0)),
        );
        assert_eq!(item.waste_area, dec!(0.15));
        assert_eq!(item.final_area, dec!(1.14));
    }

    #[test]
    fn test_item_subtotal_is_sum_of_rounded_parts() {
        let item = price_item(
            &PricingConfig::default(),
            &window(dec!(1.37), dec!(1.93), OpeningFlags::default()),
            &laminate(dec!(19.995), dec!(7.335)),
        );
        assert_eq!(
            item.item_subtotal,
            item.material_subtotal + item.installation_subtotal
        );
    }

    #[test]
    fn test_final_area_not_below_base() {
        for (w, h) in [(dec!(0.1), dec!(0.1)), (dec!(3.3), dec!(2.7)), (dec!(12), dec!(4))] {
            let item = price_item(
                &PricingConfig::default(),
                &window(w, h, OpeningFlags::default()),
                &laminate(dec!(10), dec!(5)),
            );
            assert!(item.final_area >= item.base_area);
            assert!(item.base_area >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_item_keeps_trace_fields() {
        let flags = OpeningFlags {
            glass_type: Some("tempered".to_string()),
            ..OpeningFlags::default()
        };
        let item = price_item(
            &PricingConfig::default(),
            &window(dec!(1), dec!(1), flags.clone()),
            &laminate(dec!(10), dec!(5)),
        );
        assert_eq!(item.opening_id, "o-1");
        assert_eq!(item.product_id, "p-1");
        assert_eq!(item.product_name, "Security Laminate 4mil");
        assert_eq!(item.width, dec!(1));
        assert_eq!(item.flags, flags);
    }

    #[test]
    fn test_room_with_separator_in_name_keeps_prefix() {
        let mut opening = window(dec!(1), dec!(1), OpeningFlags::default());
        opening.room_name = "Suite 2 - North".to_string();
        let item = price_item(&PricingConfig::default(), &opening, &laminate(dec!(1), dec!(1)));
        assert_eq!(item.room(), "Suite 2");
    }
}
