//! # Domain Types
//!
//! Input types handed to the calculator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Input Types                                     │
//! │                                                                         │
//! │  ┌──────────────────────┐            ┌──────────────────────┐          │
//! │  │    OpeningInput      │  paired by │    ProductInput      │          │
//! │  │  ──────────────────  │  position  │  ──────────────────  │          │
//! │  │  id, room_name       │◄──────────►│  id, sku, name       │          │
//! │  │  category            │            │  category            │          │
//! │  │  width × height      │            │  price_per_area      │          │
//! │  │  quantity            │            │  installation_per_   │          │
//! │  │  flags ──────────┐   │            │    area              │          │
//! │  └──────────────────┼───┘            └──────────────────────┘          │
//! │                     ▼                                                   │
//! │            ┌──────────────────┐                                         │
//! │            │  OpeningFlags    │  curved, automotive, difficult_access,  │
//! │            │  (typed, all     │  irregular_shape, extreme_weather,      │
//! │            │   default off)   │  night_install, requires_scaffolding,   │
//! │            └──────────────────┘  floor                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flags are a typed struct rather than a free-form map: every flag defaults
//! to `false` (and `floor` to absent), and a misspelled key is caught at
//! deserialization instead of silently reading as `false`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Opening Category
// =============================================================================

/// Kind of physical opening the film is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OpeningCategory {
    Window,
    Door,
    SlidingDoor,
    ShowerEnclosure,
    Partition,
    Skylight,
    CurtainWall,
    /// Horizontal decorative band, billed from the opening width.
    StripHorizontal,
    /// Vertical decorative band, billed from the opening height.
    StripVertical,
    /// Curved vehicle glass (windshields, rear windows).
    AutomotiveCurved,
    /// Flat vehicle glass (side windows).
    AutomotiveFlat,
    /// Anything the front end sends that we do not know yet.
    /// Prices with the default waste fraction.
    #[serde(other)]
    Other,
}

impl OpeningCategory {
    /// All known categories, in declaration order.
    pub const ALL: [OpeningCategory; 11] = [
        OpeningCategory::Window,
        OpeningCategory::Door,
        OpeningCategory::SlidingDoor,
        OpeningCategory::ShowerEnclosure,
        OpeningCategory::Partition,
        OpeningCategory::Skylight,
        OpeningCategory::CurtainWall,
        OpeningCategory::StripHorizontal,
        OpeningCategory::StripVertical,
        OpeningCategory::AutomotiveCurved,
        OpeningCategory::AutomotiveFlat,
    ];

    /// Stable snake_case code, also used as the waste matrix key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OpeningCategory::Window => "window",
            OpeningCategory::Door => "door",
            OpeningCategory::SlidingDoor => "sliding_door",
            OpeningCategory::ShowerEnclosure => "shower_enclosure",
            OpeningCategory::Partition => "partition",
            OpeningCategory::Skylight => "skylight",
            OpeningCategory::CurtainWall => "curtain_wall",
            OpeningCategory::StripHorizontal => "strip_horizontal",
            OpeningCategory::StripVertical => "strip_vertical",
            OpeningCategory::AutomotiveCurved => "automotive_curved",
            OpeningCategory::AutomotiveFlat => "automotive_flat",
            OpeningCategory::Other => "other",
        }
    }

    /// Strip treatments are sold by linear measure.
    #[inline]
    pub const fn is_strip(&self) -> bool {
        matches!(
            self,
            OpeningCategory::StripHorizontal | OpeningCategory::StripVertical
        )
    }

    #[inline]
    pub const fn is_automotive(&self) -> bool {
        matches!(
            self,
            OpeningCategory::AutomotiveCurved | OpeningCategory::AutomotiveFlat
        )
    }
}

impl fmt::Display for OpeningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpeningCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        OpeningCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "opening category".to_string(),
                reason: format!("unknown category '{}'", s),
            })
    }
}

// =============================================================================
// Product Category
// =============================================================================

/// Film family of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    #[serde(alias = "LAMINATE_SECURITY")]
    LaminateSecurity,
    #[serde(alias = "SOLAR_CONTROL")]
    SolarControl,
    #[serde(alias = "VINYL_DECORATIVE")]
    VinylDecorative,
    #[serde(alias = "PRIVACY")]
    Privacy,
    #[serde(alias = "ANTI_GRAFFITI")]
    AntiGraffiti,
    #[serde(alias = "CUSTOM")]
    Custom,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 6] = [
        ProductCategory::LaminateSecurity,
        ProductCategory::SolarControl,
        ProductCategory::VinylDecorative,
        ProductCategory::Privacy,
        ProductCategory::AntiGraffiti,
        ProductCategory::Custom,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::LaminateSecurity => "laminate_security",
            ProductCategory::SolarControl => "solar_control",
            ProductCategory::VinylDecorative => "vinyl_decorative",
            ProductCategory::Privacy => "privacy",
            ProductCategory::AntiGraffiti => "anti_graffiti",
            ProductCategory::Custom => "custom",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts catalog spellings too (`LAMINATE_SECURITY`).
impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "product category".to_string(),
                reason: format!("unknown category '{}'", s),
            })
    }
}

// =============================================================================
// Opening Flags
// =============================================================================

/// Installation attributes of one opening.
///
/// Camel-case aliases accept the web form's field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, deny_unknown_fields)]
pub struct OpeningFlags {
    /// Curved glass. Forces the automotive-curved waste bucket.
    pub curved: bool,

    /// Vehicle glass. Forces the automotive-flat waste bucket unless curved.
    pub automotive: bool,

    #[serde(alias = "difficultAccess")]
    pub difficult_access: bool,

    #[serde(alias = "irregularShape")]
    pub irregular_shape: bool,

    #[serde(alias = "extremeWeather")]
    pub extreme_weather: bool,

    #[serde(alias = "nightInstall")]
    pub night_install: bool,

    #[serde(alias = "requiresScaffolding")]
    pub requires_scaffolding: bool,

    /// Installation floor for the height surcharge. May repeat the opening's
    /// own floor; absent means ground level.
    pub floor: Option<u32>,

    /// Free-text glass description, carried for traceability only.
    #[serde(alias = "glassType", skip_serializing_if = "Option::is_none")]
    pub glass_type: Option<String>,
}

impl OpeningFlags {
    /// Floor used by the complexity rules (1 when not given).
    #[inline]
    pub fn effective_floor(&self) -> u32 {
        self.floor.unwrap_or(1)
    }
}

// =============================================================================
// Opening
// =============================================================================

/// One physical opening to be treated.
///
/// ## Invariants (checked by [`crate::validation::validate_opening`])
/// - `width > 0`, `height > 0` (meters)
/// - `quantity > 0` (identical repeated openings)
/// - `floor >= 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OpeningInput {
    pub id: String,

    /// Room or location label ("Living room", "Vehicle").
    pub room_name: String,

    pub floor: u32,

    pub category: OpeningCategory,

    #[ts(as = "String")]
    pub width: Decimal,

    #[ts(as = "String")]
    pub height: Decimal,

    pub quantity: u32,

    #[serde(default, alias = "specifications")]
    pub flags: OpeningFlags,
}

impl OpeningInput {
    /// Label shown on the quotation line: `"{room} - {category}"`.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.room_name, self.category)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product with its prices already resolved.
///
/// Prices are per square meter in the quotation currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown on the quotation.
    pub name: String,

    pub category: ProductCategory,

    /// Material price per m².
    #[ts(as = "String")]
    pub price_per_area: Decimal,

    /// Installation labor per m², before the complexity factor.
    #[ts(as = "String")]
    pub installation_per_area: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_codes_round_trip() {
        for category in OpeningCategory::ALL {
            assert_eq!(category.as_str().parse::<OpeningCategory>().unwrap(), category);
        }
        for category in ProductCategory::ALL {
            assert_eq!(category.as_str().parse::<ProductCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_product_category_accepts_catalog_spelling() {
        assert_eq!(
            "LAMINATE_SECURITY".parse::<ProductCategory>().unwrap(),
            ProductCategory::LaminateSecurity
        );
        assert!("laminate".parse::<ProductCategory>().is_err());

        let category: ProductCategory = serde_json::from_str("\"SOLAR_CONTROL\"").unwrap();
        assert_eq!(category, ProductCategory::SolarControl);
    }

    #[test]
    fn test_unknown_opening_category_deserializes_as_other() {
        let category: OpeningCategory = serde_json::from_str("\"garage_door\"").unwrap();
        assert_eq!(category, OpeningCategory::Other);

        let category: OpeningCategory = serde_json::from_str("\"sliding_door\"").unwrap();
        assert_eq!(category, OpeningCategory::SlidingDoor);
    }

    #[test]
    fn test_strip_and_automotive_helpers() {
        assert!(OpeningCategory::StripHorizontal.is_strip());
        assert!(OpeningCategory::StripVertical.is_strip());
        assert!(!OpeningCategory::Window.is_strip());
        assert!(OpeningCategory::AutomotiveFlat.is_automotive());
        assert!(!OpeningCategory::Skylight.is_automotive());
    }

    #[test]
    fn test_flags_default_off() {
        let flags = OpeningFlags::default();
        assert!(!flags.curved);
        assert!(!flags.difficult_access);
        assert_eq!(flags.floor, None);
        assert_eq!(flags.effective_floor(), 1);
    }

    #[test]
    fn test_flags_accept_camel_case_aliases() {
        let flags: OpeningFlags = serde_json::from_str(
            r#"{"difficultAccess": true, "nightInstall": true, "floor": 5}"#,
        )
        .unwrap();
        assert!(flags.difficult_access);
        assert!(flags.night_install);
        assert!(!flags.curved);
        assert_eq!(flags.effective_floor(), 5);
    }

    #[test]
    fn test_flags_reject_misspelled_key() {
        let result: Result<OpeningFlags, _> = serde_json::from_str(r#"{"curvd": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_opening_display_name() {
        let opening = OpeningInput {
            id: "o-1".to_string(),
            room_name: "Kitchen".to_string(),
            floor: 1,
            category: OpeningCategory::SlidingDoor,
            width: dec!(2.4),
            height: dec!(2.1),
            quantity: 1,
            flags: OpeningFlags::default(),
        };
        assert_eq!(opening.display_name(), "Kitchen - sliding_door");
    }

    #[test]
    fn test_opening_deserializes_with_specifications_key() {
        let opening: OpeningInput = serde_json::from_str(
            r#"{
                "id": "o-1",
                "room_name": "Office",
                "floor": 2,
                "category": "window",
                "width": "1.5",
                "height": "2.0",
                "quantity": 2,
                "specifications": {"curved": true}
            }"#,
        )
        .unwrap();
        assert_eq!(opening.width, dec!(1.5));
        assert_eq!(opening.quantity, 2);
        assert!(opening.flags.curved);
    }
}
