//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the command)      │
//! │     --tax-rate 0.105 --currency EUR                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     FILMQUOTE_TAX_RATE=0.105                                           │
//! │     FILMQUOTE_CURRENCY=EUR                                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, else FILMQUOTE_CONFIG, else                         │
//! │     ~/.config/filmquote/filmquote.toml (Linux)                         │
//! │     ~/Library/Application Support/com.filmquote.filmquote/ (macOS)     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     USD, 30-day validity, house pricing tables                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # filmquote.toml
//! [quote]
//! currency = "ARS"
//! validity_days = 15
//!
//! [pricing]
//! default_tax_rate = "0.21"
//!
//! [[pricing.volume_discounts]]
//! min_area = "100"
//! rate = "0.10"
//! ```

use std::path::PathBuf;

use filmquote_core::{Currency, PricingConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Env var naming an alternate config file.
pub const CONFIG_PATH_ENV: &str = "FILMQUOTE_CONFIG";
pub const TAX_RATE_ENV: &str = "FILMQUOTE_TAX_RATE";
pub const CURRENCY_ENV: &str = "FILMQUOTE_CURRENCY";

// =============================================================================
// Quote Settings
// =============================================================================

/// How printed quotations are stamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Display currency. Amounts are never converted.
    #[serde(default)]
    pub currency: Currency,

    /// Days a quotation stays valid after it is issued.
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,
}

fn default_validity_days() -> u32 {
    30
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            currency: Currency::default(),
            validity_days: default_validity_days(),
        }
    }
}

// =============================================================================
// Main CLI Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub quote: QuoteSettings,

    /// Pricing tables handed to the calculator.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (filmquote.toml)
    /// 3. Environment variables
    ///
    /// An explicitly named file (flag or `FILMQUOTE_CONFIG`) must exist; the
    /// platform default is optional.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) if !path.exists() => return Err(CliError::ConfigNotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.quote.validity_days == 0 {
            return Err(CliError::InvalidConfig(
                "quote.validity_days must be greater than 0".into(),
            ));
        }

        self.pricing.validate()?;

        Ok(())
    }

    /// Applies overrides from `lookup` (the process environment in
    /// [`CliConfig::load`]). Unparseable values are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Tax rate
        if let Some(rate) = lookup(TAX_RATE_ENV) {
            match rate.trim().parse::<Decimal>() {
                Ok(parsed) => {
                    debug!(tax_rate = %parsed, "Overriding default tax rate from environment");
                    self.pricing.default_tax_rate = parsed;
                }
                Err(_) => warn!(value = %rate, "Ignoring unparseable {}", TAX_RATE_ENV),
            }
        }

        // Currency
        if let Some(code) = lookup(CURRENCY_ENV) {
            match code.parse::<Currency>() {
                Ok(currency) => {
                    debug!(%currency, "Overriding currency from environment");
                    self.quote.currency = currency;
                }
                Err(_) => warn!(value = %code, "Unknown currency in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "filmquote", "filmquote")
            .map(|dirs| dirs.config_dir().join("filmquote.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.quote.currency, Currency::Usd);
        assert_eq!(config.quote.validity_days, 30);
        assert_eq!(config.pricing.default_tax_rate, dec!(0.21));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [quote]
            currency = "EUR"
            validity_days = 15

            [pricing]
            default_tax_rate = "0.19"

            [pricing.complexity]
            curved = "1.6"
            "#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.quote.currency, Currency::Eur);
        assert_eq!(config.quote.validity_days, 15);
        assert_eq!(config.pricing.default_tax_rate, dec!(0.19));
        assert_eq!(config.pricing.complexity.curved, dec!(1.6));
        assert_eq!(config.pricing.complexity.night_install, dec!(1.25));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CliConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::ConfigNotFound(_))));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[quote\ncurrency = ").unwrap();
        let result = CliConfig::load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }

    #[test]
    fn test_invalid_tables_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pricing]\nfilm_roll_width = \"0\"").unwrap();
        let result = CliConfig::load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Core(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config.apply_overrides(env(&[(TAX_RATE_ENV, "0.105"), (CURRENCY_ENV, "gbp")]));
        assert_eq!(config.pricing.default_tax_rate, dec!(0.105));
        assert_eq!(config.quote.currency, Currency::Gbp);
    }

    #[test]
    fn test_bad_env_values_are_skipped() {
        let mut config = CliConfig::default();
        config.apply_overrides(env(&[(TAX_RATE_ENV, "lots"), (CURRENCY_ENV, "BTC")]));
        assert_eq!(config.pricing.default_tax_rate, dec!(0.21));
        assert_eq!(config.quote.currency, Currency::Usd);
    }

    #[test]
    fn test_zero_validity_rejected() {
        let mut config = CliConfig::default();
        config.quote.validity_days = 0;
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }
}
