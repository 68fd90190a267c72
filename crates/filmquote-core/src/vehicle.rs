//! # Vehicle Glass Templates
//!
//! Standard glass layouts per vehicle body, so an automotive job can be
//! quoted from a pane checklist instead of measured openings.
//!
//! ```text
//!            windshield (curved, no tint)
//!          ┌──────────────────────────┐
//!  front_l │                          │ front_r
//!  rear_l  │        sunroof (suv)     │ rear_r
//!          │                          │
//!          └──────────────────────────┘
//!            rear_window (curved)
//! ```
//!
//! Areas are approximations in m². A pane becomes an [`OpeningInput`] with
//! width = area and height = 1, so the area calculator reproduces the
//! template area exactly.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::{OpeningCategory, OpeningFlags, OpeningInput};

/// Room label given to every vehicle opening.
pub const VEHICLE_ROOM: &str = "Vehicle";

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Sedan,
    Suv,
    Coupe,
    Pickup,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 4] = [
        VehicleKind::Sedan,
        VehicleKind::Suv,
        VehicleKind::Coupe,
        VehicleKind::Pickup,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Sedan => "sedan",
            VehicleKind::Suv => "suv",
            VehicleKind::Coupe => "coupe",
            VehicleKind::Pickup => "pickup",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        VehicleKind::ALL
            .into_iter()
            .find(|k| k.as_str() == code)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "vehicle kind".to_string(),
                reason: format!("unknown vehicle kind '{}'", s),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaneKind {
    Windshield,
    FrontSide,
    RearSide,
    RearWindow,
    Roof,
    QuarterGlass,
}

/// One pane of a vehicle template.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct GlassPane {
    #[ts(type = "string")]
    pub id: &'static str,
    #[ts(type = "string")]
    pub name: &'static str,
    pub kind: PaneKind,
    pub curved: bool,
    /// Approximate area in m².
    #[ts(as = "String")]
    pub area: Decimal,
    /// Included by default when quoting the vehicle.
    pub mandatory: bool,
    /// Whether privacy/tint film may be applied. Windshields may not.
    pub tinting_allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct VehicleTemplate {
    pub kind: VehicleKind,
    #[ts(type = "string")]
    pub description: &'static str,
    #[ts(as = "Vec<GlassPane>")]
    pub panes: &'static [GlassPane],
}

// =============================================================================
// Templates
// =============================================================================

const fn pane(
    id: &'static str,
    name: &'static str,
    kind: PaneKind,
    curved: bool,
    area: Decimal,
    mandatory: bool,
) -> GlassPane {
    GlassPane {
        id,
        name,
        kind,
        curved,
        area,
        mandatory,
        tinting_allowed: !matches!(kind, PaneKind::Windshield),
    }
}

static SEDAN: VehicleTemplate = VehicleTemplate {
    kind: VehicleKind::Sedan,
    description: "Four-door sedan",
    panes: &[
        pane("windshield", "Windshield", PaneKind::Windshield, true, dec!(1.5), false),
        pane("front_left", "Front Left Side", PaneKind::FrontSide, false, dec!(0.6), true),
        pane("front_right", "Front Right Side", PaneKind::FrontSide, false, dec!(0.6), true),
        pane("rear_left", "Rear Left Side", PaneKind::RearSide, false, dec!(0.5), true),
        pane("rear_right", "Rear Right Side", PaneKind::RearSide, false, dec!(0.5), true),
        pane("rear_window", "Rear Window", PaneKind::RearWindow, true, dec!(1.2), true),
    ],
};

static SUV: VehicleTemplate = VehicleTemplate {
    kind: VehicleKind::Suv,
    description: "SUV",
    panes: &[
        pane("windshield", "Windshield", PaneKind::Windshield, true, dec!(1.8), false),
        pane("front_left", "Front Left Side", PaneKind::FrontSide, false, dec!(0.7), true),
        pane("front_right", "Front Right Side", PaneKind::FrontSide, false, dec!(0.7), true),
        pane("rear_left", "Rear Left Side", PaneKind::RearSide, false, dec!(0.6), true),
        pane("rear_right", "Rear Right Side", PaneKind::RearSide, false, dec!(0.6), true),
        pane("rear_window", "Rear Window", PaneKind::RearWindow, true, dec!(1.5), true),
        pane("sunroof", "Panoramic Roof", PaneKind::Roof, true, dec!(1.2), false),
    ],
};

static COUPE: VehicleTemplate = VehicleTemplate {
    kind: VehicleKind::Coupe,
    description: "Two-door coupe",
    panes: &[
        pane("windshield", "Windshield", PaneKind::Windshield, true, dec!(1.4), false),
        pane("front_left", "Left Side", PaneKind::FrontSide, false, dec!(0.8), true),
        pane("front_right", "Right Side", PaneKind::FrontSide, false, dec!(0.8), true),
        pane("quarter_left", "Left Quarter Glass", PaneKind::QuarterGlass, false, dec!(0.15), false),
        pane("quarter_right", "Right Quarter Glass", PaneKind::QuarterGlass, false, dec!(0.15), false),
        pane("rear_window", "Rear Window", PaneKind::RearWindow, true, dec!(1.0), true),
    ],
};

static PICKUP: VehicleTemplate = VehicleTemplate {
    kind: VehicleKind::Pickup,
    description: "Pickup truck",
    panes: &[
        pane("windshield", "Windshield", PaneKind::Windshield, true, dec!(1.6), false),
        pane("front_left", "Front Left Side", PaneKind::FrontSide, false, dec!(0.7), true),
        pane("front_right", "Front Right Side", PaneKind::FrontSide, false, dec!(0.7), true),
        pane("rear_window", "Rear Window", PaneKind::RearWindow, true, dec!(1.3), true),
    ],
};

// =============================================================================
// Operations
// =============================================================================

pub fn vehicle_template(kind: VehicleKind) -> &'static VehicleTemplate {
    match kind {
        VehicleKind::Sedan => &SEDAN,
        VehicleKind::Suv => &SUV,
        VehicleKind::Coupe => &COUPE,
        VehicleKind::Pickup => &PICKUP,
    }
}

impl VehicleTemplate {
    pub fn pane(&self, id: &str) -> Option<&'static GlassPane> {
        self.panes.iter().find(|p| p.id == id)
    }
}

/// Panes included by default (everything but optional windshield, roof and
/// quarter glass).
pub fn mandatory_panes(kind: VehicleKind) -> Vec<&'static GlassPane> {
    vehicle_template(kind)
        .panes
        .iter()
        .filter(|p| p.mandatory)
        .collect()
}

/// Sum of the approximate areas of the selected panes. Unknown ids add
/// nothing.
///
/// ## Example
/// ```rust
/// use filmquote_core::vehicle::{template_total_area, VehicleKind};
/// use rust_decimal_macros::dec;
///
/// let area = template_total_area(VehicleKind::Sedan, &["front_left", "front_right", "rear_window"]);
/// assert_eq!(area, dec!(2.4));
/// ```
pub fn template_total_area(kind: VehicleKind, pane_ids: &[&str]) -> Decimal {
    vehicle_template(kind)
        .panes
        .iter()
        .filter(|p| pane_ids.contains(&p.id))
        .map(|p| p.area)
        .sum()
}

/// Unknown panes never allow tinting.
pub fn allows_tinting(kind: VehicleKind, pane_id: &str) -> bool {
    vehicle_template(kind)
        .pane(pane_id)
        .is_some_and(|p| p.tinting_allowed)
}

/// Converts selected panes to openings, in the order given.
///
/// ## Errors
/// [`ValidationError::InvalidFormat`] for a pane id the template does not
/// have.
pub fn openings_from_template(kind: VehicleKind, pane_ids: &[&str]) -> CoreResult<Vec<OpeningInput>> {
    let template = vehicle_template(kind);
    pane_ids
        .iter()
        .map(|id| {
            template
                .pane(id)
                .map(|p| pane_opening(kind, p))
                .ok_or_else(|| {
                    ValidationError::InvalidFormat {
                        field: "pane".to_string(),
                        reason: format!("{} has no pane '{}'", kind, id),
                    }
                    .into()
                })
        })
        .collect()
}

fn pane_opening(kind: VehicleKind, pane: &GlassPane) -> OpeningInput {
    let (category, flags) = if pane.curved {
        (
            OpeningCategory::AutomotiveCurved,
            OpeningFlags {
                curved: true,
                ..OpeningFlags::default()
            },
        )
    } else {
        (
            OpeningCategory::AutomotiveFlat,
            OpeningFlags {
                automotive: true,
                ..OpeningFlags::default()
            },
        )
    };

    OpeningInput {
        id: format!("{}-{}", kind, pane.id),
        room_name: VEHICLE_ROOM.to_string(),
        floor: 1,
        category,
        width: pane.area,
        height: Decimal::ONE,
        quantity: 1,
        flags,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
