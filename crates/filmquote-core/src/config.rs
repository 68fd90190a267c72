//! # Pricing Configuration
//!
//! The business tables the engine prices with: waste matrix, complexity
//! multipliers, volume-discount tiers, default tax rate and film roll width.
//!
//! ## Injection, not globals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Pricing Tables Come From                       │
//! │                                                                         │
//! │  PricingConfig::default()  ── the house tables (below)                  │
//! │          │                                                              │
//! │          ├── overridden by [pricing] in filmquote.toml (quote-cli)      │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  validate() ──► QuotationCalculator::new(config)                        │
//! │                                                                         │
//! │  Tests build their own PricingConfig to exercise alternate tables.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field has a serde default, so a TOML file only needs the values
//! it changes.
//!
//! ## Example Config Section
//! ```toml
//! [pricing]
//! default_tax_rate = "0.21"
//!
//! [pricing.waste]
//! max_fraction = "0.35"
//!
//! [pricing.waste.matrix.window]
//! laminate_security = "0.15"
//!
//! [[pricing.volume_discounts]]
//! min_area = "500"
//! rate = "0.20"
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Waste fraction for combinations missing from the matrix (15%).
pub const DEFAULT_WASTE_FRACTION: Decimal = dec!(0.15);

/// Hard cap on any waste fraction (35%).
pub const MAX_WASTE_FRACTION: Decimal = dec!(0.35);

/// Default VAT rate (21%).
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.21);

/// Standard film roll width in meters, used to bill strip treatments.
pub const FILM_ROLL_WIDTH: Decimal = dec!(1.52);

/// Upper bound for any single complexity multiplier, floor brackets included.
pub const MAX_COMPLEXITY_MULTIPLIER: Decimal = dec!(10);

/// Widest roll a configuration may declare, in meters.
pub const MAX_FILM_ROLL_WIDTH: Decimal = dec!(10);

// =============================================================================
// Waste Rules
// =============================================================================

/// Waste lookup table plus the additive adjustments and cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteRules {
    /// opening category code → product category code → waste fraction.
    pub matrix: BTreeMap<String, BTreeMap<String, Decimal>>,

    /// Used when the matrix has no entry for the pair.
    pub default_fraction: Decimal,

    /// Added when the opening has difficult access.
    pub difficult_access: Decimal,

    /// Added when the opening has an irregular shape.
    pub irregular_shape: Decimal,

    /// Applied last, after all additions.
    pub max_fraction: Decimal,
}

impl Default for WasteRules {
    fn default() -> Self {
        WasteRules {
            matrix: default_waste_matrix(),
            default_fraction: DEFAULT_WASTE_FRACTION,
            difficult_access: dec!(0.05),
            irregular_shape: dec!(0.08),
            max_fraction: MAX_WASTE_FRACTION,
        }
    }
}

fn default_waste_matrix() -> BTreeMap<String, BTreeMap<String, Decimal>> {
    // (laminate_security, solar_control, vinyl_decorative, privacy)
    let rows: [(&str, [Option<Decimal>; 4]); 11] = [
        ("window", [Some(dec!(0.15)), Some(dec!(0.15)), Some(dec!(0.12)), Some(dec!(0.12))]),
        ("door", [Some(dec!(0.18)), Some(dec!(0.18)), Some(dec!(0.15)), Some(dec!(0.15))]),
        ("sliding_door", [Some(dec!(0.20)), Some(dec!(0.20)), Some(dec!(0.18)), Some(dec!(0.18))]),
        ("shower_enclosure", [Some(dec!(0.22)), Some(dec!(0.22)), Some(dec!(0.20)), Some(dec!(0.18))]),
        ("partition", [Some(dec!(0.20)), Some(dec!(0.20)), Some(dec!(0.15)), Some(dec!(0.15))]),
        ("skylight", [Some(dec!(0.25)), Some(dec!(0.25)), Some(dec!(0.22)), Some(dec!(0.22))]),
        ("curtain_wall", [Some(dec!(0.20)), Some(dec!(0.20)), Some(dec!(0.18)), Some(dec!(0.18))]),
        ("strip_horizontal", [None, None, Some(dec!(0.08)), Some(dec!(0.08))]),
        ("strip_vertical", [None, None, Some(dec!(0.08)), Some(dec!(0.08))]),
        ("automotive_curved", [Some(dec!(0.30)), Some(dec!(0.30)), Some(dec!(0.28)), None]),
        ("automotive_flat", [Some(dec!(0.20)), Some(dec!(0.20)), Some(dec!(0.18)), None]),
    ];
    let products = ["laminate_security", "solar_control", "vinyl_decorative", "privacy"];

    rows.into_iter()
        .map(|(opening, fractions)| {
            let row = products
                .iter()
                .zip(fractions)
                .filter_map(|(product, fraction)| fraction.map(|f| (product.to_string(), f)))
                .collect();
            (opening.to_string(), row)
        })
        .collect()
}

// =============================================================================
// Complexity Rules
// =============================================================================

/// One floor-height bracket of the complexity rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorBracket {
    /// Fires when the installation floor is strictly above this.
    pub above_floor: u32,
    pub multiplier: Decimal,
}

/// Installation difficulty multipliers.
///
/// ## Floor brackets
/// Brackets are tried in the order listed and only the FIRST one that fires
/// applies. The house order is `>3` then `>6`, so a floor-8 job matches `>3`
/// and receives ×1.2, never ×1.4. List `>6` first to give tall buildings
/// the larger multiplier.
///
/// Both orderings are in use: the TypeScript web calculator
/// (`lib/calculator.ts`) checks `>6` first and charges ×1.4 from floor 7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityRules {
    pub floor_brackets: Vec<FloorBracket>,
    pub difficult_access: Decimal,
    pub curved: Decimal,
    pub extreme_weather: Decimal,
    pub night_install: Decimal,
    pub requires_scaffolding: Decimal,
}

impl Default for ComplexityRules {
    fn default() -> Self {
        ComplexityRules {
            floor_brackets: vec![
                FloorBracket {
                    above_floor: 3,
                    multiplier: dec!(1.2),
                },
                FloorBracket {
                    above_floor: 6,
                    multiplier: dec!(1.4),
                },
            ],
            difficult_access: dec!(1.3),
            curved: dec!(1.5),
            extreme_weather: dec!(1.15),
            night_install: dec!(1.25),
            requires_scaffolding: dec!(1.4),
        }
    }
}

// =============================================================================
// Volume Discounts
// =============================================================================

/// Discount rate granted once total final area reaches `min_area` m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDiscountTier {
    pub min_area: Decimal,
    pub rate: Decimal,
}

fn default_volume_discounts() -> Vec<VolumeDiscountTier> {
    [
        (dec!(500), dec!(0.20)),
        (dec!(200), dec!(0.15)),
        (dec!(100), dec!(0.10)),
        (dec!(50), dec!(0.05)),
    ]
    .into_iter()
    .map(|(min_area, rate)| VolumeDiscountTier { min_area, rate })
    .collect()
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Complete set of pricing tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub waste: WasteRules,

    pub complexity: ComplexityRules,

    /// Checked in listed order, first reached tier wins. Must be strictly
    /// descending by `min_area`.
    pub volume_discounts: Vec<VolumeDiscountTier>,

    /// Used when the caller supplies no tax override.
    pub default_tax_rate: Decimal,

    /// Meters of film width consumed per linear meter of strip.
    pub film_roll_width: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            waste: WasteRules::default(),
            complexity: ComplexityRules::default(),
            volume_discounts: default_volume_discounts(),
            default_tax_rate: DEFAULT_TAX_RATE,
            film_roll_width: FILM_ROLL_WIDTH,
        }
    }
}

impl PricingConfig {
    /// Checks the tables for values that would break the engine's
    /// guarantees (waste within [0, cap], multipliers within [1, 10], one
    /// discount tier per area).
    pub fn validate(&self) -> CoreResult<()> {
        let unit_interval = |value: Decimal| value >= Decimal::ZERO && value <= Decimal::ONE;

        if !unit_interval(self.waste.max_fraction) {
            return Err(invalid("waste.max_fraction must be between 0 and 1"));
        }
        if !unit_interval(self.waste.default_fraction) {
            return Err(invalid("waste.default_fraction must be between 0 and 1"));
        }
        if self.waste.difficult_access.is_sign_negative()
            || self.waste.irregular_shape.is_sign_negative()
        {
            return Err(invalid("waste adjustments must not be negative"));
        }
        for (opening, row) in &self.waste.matrix {
            if let Some((product, _)) = row.iter().find(|(_, f)| !unit_interval(**f)) {
                return Err(CoreError::InvalidConfig(format!(
                    "waste.matrix.{}.{} must be between 0 and 1",
                    opening, product
                )));
            }
        }

        let c = &self.complexity;
        let multipliers = [
            c.difficult_access,
            c.curved,
            c.extreme_weather,
            c.night_install,
            c.requires_scaffolding,
        ];
        if multipliers
            .iter()
            .chain(c.floor_brackets.iter().map(|b| &b.multiplier))
            .any(|m| *m < Decimal::ONE || *m > MAX_COMPLEXITY_MULTIPLIER)
        {
            return Err(invalid("complexity multipliers must be between 1 and 10"));
        }

        if self
            .volume_discounts
            .windows(2)
            .any(|pair| pair[0].min_area <= pair[1].min_area)
        {
            return Err(invalid(
                "volume_discounts must be strictly descending by min_area",
            ));
        }
        if self.volume_discounts.iter().any(|t| !unit_interval(t.rate)) {
            return Err(invalid("volume discount rates must be between 0 and 1"));
        }

        if !unit_interval(self.default_tax_rate) {
            return Err(invalid("default_tax_rate must be between 0 and 1"));
        }
        if self.film_roll_width <= Decimal::ZERO || self.film_roll_width > MAX_FILM_ROLL_WIDTH {
            return Err(invalid("film_roll_width must be positive and at most 10 m"));
        }

        Ok(())
    }

    /// Area at which the smallest volume discount starts, if any tier exists.
    pub fn discount_threshold(&self) -> Option<Decimal> {
        self.volume_discounts.iter().map(|t| t.min_area).min()
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::InvalidConfig(message.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_tax_rate, dec!(0.21));
        assert_eq!(config.film_roll_width, dec!(1.52));
        assert_eq!(config.discount_threshold(), Some(dec!(50)));
    }

    #[test]
    fn test_default_matrix_entries() {
        let matrix = PricingConfig::default().waste.matrix;
        assert_eq!(matrix.len(), 11);
        assert_eq!(matrix["window"]["laminate_security"], dec!(0.15));
        assert_eq!(matrix["shower_enclosure"]["privacy"], dec!(0.18));
        assert_eq!(matrix["automotive_curved"]["vinyl_decorative"], dec!(0.28));
        assert!(!matrix["strip_horizontal"].contains_key("laminate_security"));
        assert!(!matrix["automotive_flat"].contains_key("privacy"));
    }

    #[test]
    fn test_rejects_unordered_tiers() {
        let mut config = PricingConfig::default();
        config.volume_discounts.swap(0, 1);
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_duplicate_tier_area() {
        let mut config = PricingConfig::default();
        config.volume_discounts[1].min_area = dec!(500);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut config = PricingConfig::default();
        config.default_tax_rate = dec!(1.5);
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.complexity.curved = dec!(0.9);
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config
            .waste
            .matrix
            .get_mut("door")
            .unwrap()
            .insert("privacy".to_string(), dec!(-0.1));
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.film_roll_width = Decimal::ZERO;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.film_roll_width = dec!(10.5);
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.complexity.night_install = dec!(11);
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.complexity.floor_brackets[1].multiplier = MAX_COMPLEXITY_MULTIPLIER;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_tiers_means_no_threshold() {
        let config = PricingConfig {
            volume_discounts: Vec::new(),
            ..PricingConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.discount_threshold(), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PricingConfig = toml::from_str(
            r#"
            default_tax_rate = "0.105"

            [waste]
            max_fraction = "0.30"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_tax_rate, dec!(0.105));
        assert_eq!(config.waste.max_fraction, dec!(0.30));
        assert_eq!(config.waste.default_fraction, dec!(0.15));
        assert_eq!(config.volume_discounts.len(), 4);
        assert_eq!(config.complexity.curved, dec!(1.5));
    }
}
