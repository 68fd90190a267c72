//! # Quotation Request Document
//!
//! The JSON document `filmquote quote` reads:
//!
//! ```json
//! {
//!   "openings": [
//!     { "room_name": "Office", "category": "window",
//!       "width": "1.5", "height": "2.0",
//!       "flags": { "difficult_access": true } }
//!   ],
//!   "products": [
//!     { "id": "p-1", "sku": "LAM-SEC-4MIL", "name": "Security Laminate",
//!       "category": "laminate_security",
//!       "price_per_area": "22.00", "installation_per_area": "10.00" }
//!   ],
//!   "tax_rate": "0.21",
//!   "currency": "USD"
//! }
//! ```
//!
//! Opening `id` is optional (a UUID v4 is generated); `floor` and `quantity`
//! default to 1.

use std::path::Path;

use filmquote_core::{
    Currency, OpeningCategory, OpeningFlags, OpeningInput, ProductInput,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::CliResult;

/// One opening as written by hand or exported by the web form.
#[derive(Debug, Clone, Deserialize)]
pub struct OpeningRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub room_name: String,
    #[serde(default = "default_one")]
    pub floor: u32,
    pub category: OpeningCategory,
    pub width: Decimal,
    pub height: Decimal,
    #[serde(default = "default_one")]
    pub quantity: u32,
    #[serde(default, alias = "specifications")]
    pub flags: OpeningFlags,
}

fn default_one() -> u32 {
    1
}

impl OpeningRequest {
    /// Converts to the engine's input, filling in a missing or blank id.
    pub fn into_input(self) -> OpeningInput {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                let generated = Uuid::new_v4().to_string();
                debug!(opening_id = %generated, room = %self.room_name, "Generated opening id");
                generated
            }
        };

        OpeningInput {
            id,
            room_name: self.room_name,
            floor: self.floor,
            category: self.category,
            width: self.width,
            height: self.height,
            quantity: self.quantity,
            flags: self.flags,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotationRequest {
    pub openings: Vec<OpeningRequest>,
    pub products: Vec<ProductInput>,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<Currency>,
}

impl QuotationRequest {
    pub fn from_path(path: &Path) -> CliResult<Self> {
        debug!(?path, "Reading quotation request");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Engine inputs, positionally paired.
    pub fn into_inputs(self) -> (Vec<OpeningInput>, Vec<ProductInput>) {
        let openings = self
            .openings
            .into_iter()
            .map(OpeningRequest::into_input)
            .collect();
        (openings, self.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use rust_decimal_macros::dec;

    const REQUEST: &str = r#"{
        "openings": [
            {"room_name": "Office", "category": "window", "width": "1.5", "height": "2.0"},
            {"id": "door-1", "room_name": "Hall", "floor": 4, "category": "door",
             "width": "0.9", "height": "2.1", "quantity": 2,
             "specifications": {"night_install": true}}
        ],
        "products": [
            {"id": "p-1", "sku": "LAM-SEC", "name": "Security Laminate",
             "category": "laminate_security", "price_per_area": "22", "installation_per_area": "10"},
            {"id": "p-2", "sku": "SOL-70", "name": "Solar 70",
             "category": "SOLAR_CONTROL", "price_per_area": "18", "installation_per_area": "9"}
        ],
        "tax_rate": "0.105",
        "currency": "EUR"
    }"#;

    #[test]
    fn test_parse_request() {
        let request = QuotationRequest::from_json(REQUEST).unwrap();
        assert_eq!(request.tax_rate, Some(dec!(0.105)));
        assert_eq!(request.currency, Some(Currency::Eur));

        let (openings, products) = request.into_inputs();
        assert_eq!(openings.len(), 2);
        assert_eq!(products.len(), 2);
        assert_eq!(openings[0].floor, 1);
        assert_eq!(openings[0].quantity, 1);
        assert_eq!(openings[1].id, "door-1");
        assert_eq!(openings[1].quantity, 2);
        assert!(openings[1].flags.night_install);
    }

    #[test]
    fn test_missing_id_gets_uuid() {
        let (openings, _) = QuotationRequest::from_json(REQUEST).unwrap().into_inputs();
        assert!(Uuid::parse_str(&openings[0].id).is_ok());
    }

    #[test]
    fn test_blank_id_gets_uuid() {
        let opening: OpeningRequest = serde_json::from_str(
            r#"{"id": " ", "room_name": "Attic", "category": "skylight", "width": "1", "height": "1"}"#,
        )
        .unwrap();
        assert!(Uuid::parse_str(&opening.into_input().id).is_ok());
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let request = QuotationRequest::from_json(r#"{"openings": [], "products": []}"#).unwrap();
        assert_eq!(request.tax_rate, None);
        assert_eq!(request.currency, None);
    }

    #[test]
    fn test_misspelled_flag_is_rejected() {
        let result = QuotationRequest::from_json(
            r#"{"openings": [{"room_name": "Office", "category": "window",
                "width": "1", "height": "1", "flags": {"curvd": true}}],
                "products": []}"#,
        );
        assert!(matches!(result, Err(CliError::Json(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, REQUEST).unwrap();
        assert_eq!(QuotationRequest::from_path(&path).unwrap().openings.len(), 2);

        let missing = QuotationRequest::from_path(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(CliError::Io(_))));
    }
}
