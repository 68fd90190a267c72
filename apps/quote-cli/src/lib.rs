//! # filmquote CLI
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  filmquote quote <request.json>                                         │
//! │      [--tax-rate R] [--currency C] [--summary]                          │
//! │      [--month M] [--loyalty-total X] [--days-until-install D]           │
//! │                                                                         │
//! │      config ──► request ──► validate ──► calculate ──► adjustments      │
//! │                                                  │                      │
//! │                              stdout ◄── QuoteDocument (JSON)            │
//! │                                                                         │
//! │  filmquote vehicle <sedan|suv|coupe|pickup> [--all]                     │
//! │                                                                         │
//! │      template panes ──► openings (JSON), ready to paste into a request  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax rate precedence: `--tax-rate`, then the request's `tax_rate`, then the
//! configured default. Logs go to stderr so stdout stays machine-readable.

pub mod config;
pub mod error;
pub mod request;

use std::io::Write;
use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use clap::{Args, Parser, Subcommand};
use filmquote_core::adjustments::net_adjustment;
use filmquote_core::validation::validate_quotation_inputs;
use filmquote_core::vehicle::{mandatory_panes, openings_from_template, vehicle_template};
use filmquote_core::{
    apply_adjustments, AdjustmentContext, Currency, OpeningInput, PricingAdjustment,
    QuotationCalculationResult, QuotationCalculator, QuotationSummary, VehicleKind,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::request::QuotationRequest;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "filmquote", version, about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (defaults to the platform config dir)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a quotation request.
    Quote(QuoteArgs),
    /// Print a vehicle template as openings.
    Vehicle(VehicleArgs),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    #[arg(help = "Quotation request document (JSON)")]
    pub request: PathBuf,

    #[arg(long, help = "Tax rate as a fraction, e.g. 0.21")]
    pub tax_rate: Option<Decimal>,

    #[arg(long, help = "Display currency (USD, ARS, EUR, GBP)")]
    pub currency: Option<Currency>,

    #[arg(long, help = "Print the customer-facing summary instead of every line")]
    pub summary: bool,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12), help = "Month for the seasonal discount")]
    pub month: Option<u32>,

    #[arg(long, help = "Customer's lifetime purchases, for the loyalty discount")]
    pub loyalty_total: Option<Decimal>,

    #[arg(long, help = "Days until installation, for the rush surcharge")]
    pub days_until_install: Option<u32>,
}

#[derive(Debug, Args)]
pub struct VehicleArgs {
    pub kind: VehicleKind,

    #[arg(long, help = "Include optional panes (windshield, roof, quarter glass)")]
    pub all: bool,
}

// =============================================================================
// Output
// =============================================================================

/// What `filmquote quote` prints.
#[derive(Debug, Serialize)]
pub struct QuoteDocument {
    pub currency: Currency,
    pub issued_on: NaiveDate,
    pub valid_until: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotation: Option<QuotationCalculationResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<QuotationSummary>,

    /// Caller-side adjustments on the discounted subtotal. Not in `total`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<PricingAdjustment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_adjustment: Option<Decimal>,
}

// =============================================================================
// Commands
// =============================================================================

/// Entry point used by `main`.
pub fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Quote(args) => {
            let today = chrono::Local::now().date_naive();
            let document = quote(&config, &args, today)?;
            serde_json::to_writer_pretty(&mut out, &document)?;
        }
        Command::Vehicle(args) => {
            let openings = vehicle(&args)?;
            serde_json::to_writer_pretty(&mut out, &openings)?;
        }
    }
    writeln!(out)?;

    Ok(())
}

/// Prices the request named in `args`.
pub fn quote(config: &CliConfig, args: &QuoteArgs, today: NaiveDate) -> CliResult<QuoteDocument> {
    let request = QuotationRequest::from_path(&args.request)?;
    let tax_override = args.tax_rate.or(request.tax_rate);
    let currency = args
        .currency
        .or(request.currency)
        .unwrap_or(config.quote.currency);

    let (openings, products) = request.into_inputs();
    validate_quotation_inputs(&openings, &products, tax_override)?;

    let calculator = QuotationCalculator::new(config.pricing.clone())?;
    let result = calculator.calculate_quotation(&openings, &products, tax_override)?;
    info!(
        items = result.items.len(),
        total = %result.total,
        %currency,
        "Quotation calculated"
    );

    let adjustments = apply_adjustments(
        result.subtotal_after_discount,
        &AdjustmentContext {
            month: args.month,
            customer_total_purchases: args.loyalty_total,
            days_until_installation: args.days_until_install,
        },
    );
    let net = (!adjustments.is_empty()).then(|| net_adjustment(&adjustments));

    let valid_until = today
        .checked_add_days(Days::new(u64::from(config.quote.validity_days)))
        .ok_or_else(|| CliError::InvalidConfig("quote.validity_days out of range".into()))?;

    let (quotation, summary) = if args.summary {
        (None, Some(QuotationSummary::from_result(&result, currency)))
    } else {
        (Some(result), None)
    };

    Ok(QuoteDocument {
        currency,
        issued_on: today,
        valid_until,
        quotation,
        summary,
        adjustments,
        net_adjustment: net,
    })
}

/// Openings for a vehicle template: mandatory panes, or every pane with `--all`.
pub fn vehicle(args: &VehicleArgs) -> CliResult<Vec<OpeningInput>> {
    let pane_ids: Vec<&str> = if args.all {
        vehicle_template(args.kind).panes.iter().map(|p| p.id).collect()
    } else {
        mandatory_panes(args.kind).iter().map(|p| p.id).collect()
    };
    Ok(openings_from_template(args.kind, &pane_ids)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const REQUEST: &str = r#"{
        "openings": [
            {"id": "o-1", "room_name": "Warehouse", "category": "window", "width": "10", "height": "5"}
        ],
        "products": [
            {"id": "p-1", "sku": "PRV-FROST", "name": "Frosted Privacy",
             "category": "privacy", "price_per_area": "15", "installation_per_area": "8"}
        ]
    }"#;

    fn write_request(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("request.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    fn args(request: PathBuf) -> QuoteArgs {
        QuoteArgs {
            request,
            tax_rate: None,
            currency: None,
            summary: false,
            month: None,
            loyalty_total: None,
            days_until_install: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quote_full_document() {
        let dir = tempfile::tempdir().unwrap();
        let doc = quote(
            &CliConfig::default(),
            &args(write_request(&dir, REQUEST)),
            day(2026, 10, 19),
        )
        .unwrap();

        let result = doc.quotation.unwrap();
        assert_eq!(result.total, dec!(1480.56));
        assert!(doc.summary.is_none());
        assert_eq!(doc.valid_until, day(2026, 11, 18));
        assert!(doc.adjustments.is_empty());
        assert_eq!(doc.net_adjustment, None);
    }

    #[test]
    fn test_quote_summary_with_flag_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let body = REQUEST.replacen('{', r#"{"tax_rate": "0.5", "currency": "GBP","#, 1);
        let mut a = args(write_request(&dir, &body));
        a.summary = true;
        a.tax_rate = Some(Decimal::ZERO);

        let doc = quote(&CliConfig::default(), &a, day(2026, 1, 1)).unwrap();
        let summary = doc.summary.unwrap();
        assert_eq!(doc.currency, Currency::Gbp);
        assert_eq!(summary.pricing.tax.value, Decimal::ZERO);
        assert_eq!(summary.pricing.total.formatted, "£1,223.60");
        assert!(doc.quotation.is_none());
    }

    #[test]
    fn test_quote_with_adjustments() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(write_request(&dir, REQUEST));
        a.month = Some(11);
        a.days_until_install = Some(2);

        let doc = quote(&CliConfig::default(), &a, day(2026, 11, 2)).unwrap();
        assert_eq!(doc.adjustments.len(), 2);
        // 1223.60: −122.36 seasonal, +305.90 rush
        assert_eq!(doc.net_adjustment, Some(dec!(183.54)));
    }

    #[test]
    fn test_quote_rejects_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        let body = REQUEST.replace(r#""width": "10""#, r#""width": "0""#);
        let result = quote(&CliConfig::default(), &args(write_request(&dir, &body)), day(2026, 1, 1));
        assert!(matches!(result, Err(CliError::Core(_))));
    }

    #[test]
    fn test_quote_rejects_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"{"openings": [], "products": [
            {"id": "p-1", "sku": "X", "name": "X", "category": "custom",
             "price_per_area": "1", "installation_per_area": "1"}]}"#;
        let err = quote(&CliConfig::default(), &args(write_request(&dir, body)), day(2026, 1, 1))
            .unwrap_err();
        assert!(err.to_string().starts_with("Must have one product per opening"));
    }

    #[test]
    fn test_config_validity_days() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.quote.validity_days = 7;
        let doc = quote(&config, &args(write_request(&dir, REQUEST)), day(2026, 12, 28)).unwrap();
        assert_eq!(doc.valid_until, day(2027, 1, 4));
    }

    #[test]
    fn test_vehicle_openings() {
        let mandatory = vehicle(&VehicleArgs {
            kind: VehicleKind::Suv,
            all: false,
        })
        .unwrap();
        let all = vehicle(&VehicleArgs {
            kind: VehicleKind::Suv,
            all: true,
        })
        .unwrap();
        assert_eq!(mandatory.len(), 5);
        assert_eq!(all.len(), 7);
        assert!(all.iter().all(|o| o.category.is_automotive()));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "filmquote",
            "quote",
            "req.json",
            "--tax-rate",
            "0.105",
            "--currency",
            "eur",
            "--month",
            "3",
        ])
        .unwrap();
        match cli.command {
            Command::Quote(a) => {
                assert_eq!(a.tax_rate, Some(dec!(0.105)));
                assert_eq!(a.currency, Some(Currency::Eur));
                assert_eq!(a.month, Some(3));
            }
            Command::Vehicle(_) => panic!("expected quote"),
        }

        assert!(Cli::try_parse_from(["filmquote", "quote", "r.json", "--month", "13"]).is_err());
        assert!(Cli::try_parse_from(["filmquote", "vehicle", "truck"]).is_err());
    }
}
