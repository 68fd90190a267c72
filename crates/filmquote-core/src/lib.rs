//! # filmquote-core: Pricing Engine for Film Installation Quotes
//!
//! This crate turns a list of physical openings plus the film chosen for each
//! into an itemized, volume-discounted, tax-inclusive quotation. Everything
//! here is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FilmQuote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              quote-cli / web front end / chat intake            │   │
//! │  │   load config ──► read request ──► validate ──► print/persist   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ filmquote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌──────────┐  ┌────────────┐  │   │
//! │  │   │   waste   │  │ complexity │  │   area   │  │ validation │  │   │
//! │  │   └─────┬─────┘  └──────┬─────┘  └────┬─────┘  └────────────┘  │   │
//! │  │         └───────────────┼─────────────┘                        │   │
//! │  │                   ┌─────▼─────┐                                 │   │
//! │  │                   │  pricing  │  one CalculationItem per pair   │   │
//! │  │                   └─────┬─────┘                                 │   │
//! │  │                   ┌─────▼─────┐                                 │   │
//! │  │                   │ quotation │  totals, discount, tax          │   │
//! │  │                   └─────┬─────┘                                 │   │
//! │  │            ┌────────────┴───────────┐                           │   │
//! │  │      ┌─────▼─────┐            ┌─────▼──────┐                    │   │
//! │  │      │  summary  │            │ adjustments│  caller-side       │   │
//! │  │      └───────────┘            └────────────┘                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Openings, products, typed flags
//! - [`config`] - Pricing tables (waste matrix, multipliers, tiers, tax)
//! - [`waste`] - Waste fraction lookup
//! - [`complexity`] - Installation difficulty multiplier
//! - [`area`] - Base area, including strip treatments
//! - [`pricing`] - One priced line per opening/product pair
//! - [`quotation`] - The calculator and its result
//! - [`adjustments`] - Seasonal, loyalty and rush rates
//! - [`summary`] - Customer-facing formatted view
//! - [`vehicle`] - Vehicle glass templates
//! - [`money`] - Rounding and currency formatting
//! - [`validation`] - Input checks run before pricing
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same bytes out
//! 2. **No I/O**: files, env and clocks belong to the caller
//! 3. **Exact Decimals**: `rust_decimal`, rounded half-up to 2 places at every boundary
//! 4. **Injected Tables**: pricing rules are a value passed to the calculator
//!
//! ## Example Usage
//!
//! ```rust
//! use filmquote_core::{
//!     OpeningCategory, OpeningFlags, OpeningInput, ProductCategory, ProductInput,
//!     QuotationCalculator,
//! };
//! use rust_decimal_macros::dec;
//!
//! let opening = OpeningInput {
//!     id: "o-1".to_string(),
//!     room_name: "Living room".to_string(),
//!     floor: 1,
//!     category: OpeningCategory::Window,
//!     width: dec!(1.5),
//!     height: dec!(2.0),
//!     quantity: 1,
//!     flags: OpeningFlags::default(),
//! };
//! let product = ProductInput {
//!     id: "p-1".to_string(),
//!     sku: "LAM-SEC-4MIL".to_string(),
//!     name: "Security Laminate 4mil".to_string(),
//!     category: ProductCategory::LaminateSecurity,
//!     price_per_area: dec!(22),
//!     installation_per_area: dec!(10),
//! };
//!
//! let result = QuotationCalculator::default()
//!     .calculate_quotation(&[opening], &[product], None)
//!     .unwrap();
//!
//! // 1.5 × 2.0 = 3.00 m², +15% waste = 3.45 m²
//! assert_eq!(result.items[0].final_area, dec!(3.45));
//! assert_eq!(result.total, result.subtotal_after_discount + result.tax_amount);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adjustments;
pub mod area;
pub mod complexity;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quotation;
pub mod summary;
pub mod types;
pub mod validation;
pub mod vehicle;
pub mod waste;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use filmquote_core::QuotationCalculator` instead of
// `use filmquote_core::quotation::QuotationCalculator`

pub use adjustments::{apply_adjustments, AdjustmentContext, AdjustmentKind, PricingAdjustment};
pub use config::PricingConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_currency, round_half_up, Currency};
pub use pricing::CalculationItem;
pub use quotation::{CalculationDetails, QuotationCalculationResult, QuotationCalculator};
pub use summary::QuotationSummary;
pub use types::*;
pub use vehicle::{VehicleKind, VehicleTemplate};
