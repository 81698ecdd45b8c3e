//! # CLI Configuration
//!
//! Quotation defaults, fallback forex rates, and output preferences.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied per command)         │
//! │     --tax-rate 12 --other-charges 250                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     FREIGHTDESK_TAX_RATE=12                                            │
//! │     FREIGHTDESK_VALIDATION_MODE=permissive                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/freightdesk/freightdesk.toml (Linux)                     │
//! │     ~/Library/Application Support/com.freightdesk.freightdesk/ (macOS) │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     12% VAT, no other charges, strict validation                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # freightdesk.toml
//! [quotation]
//! tax_rate_percent = "12"
//! other_charges = "0"
//! validation_mode = "strict"   # strict | permissive
//!
//! [forex]
//! usd = "58.0"
//! eur = "63.10"
//!
//! [display]
//! format = "text"              # text | json
//! show_line_items = true
//! currency_code = false
//! ```

use std::path::{Path, PathBuf};

use freightdesk_core::validation::{
    validate_forex_rate, validate_other_charges, validate_tax_rate, ValidationMode,
};
use freightdesk_core::{Currency, ForexRate, Money, TaxRate, BASE_CURRENCY, DEFAULT_TAX_RATE_BPS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "freightdesk.toml";

// =============================================================================
// Quotation Settings
// =============================================================================

/// Defaults applied to every quotation that does not set its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationSettings {
    /// Tax rate as the percentage users type (12 means 12%).
    #[serde(default = "default_tax_rate_percent")]
    pub tax_rate_percent: Decimal,

    /// Flat untaxed amount added to every grand total.
    #[serde(default)]
    pub other_charges: Money,

    #[serde(default)]
    pub validation_mode: ValidationMode,
}

fn default_tax_rate_percent() -> Decimal {
    TaxRate::from_bps(DEFAULT_TAX_RATE_BPS).percentage()
}

impl Default for QuotationSettings {
    fn default() -> Self {
        QuotationSettings {
            tax_rate_percent: default_tax_rate_percent(),
            other_charges: Money::zero(),
            validation_mode: ValidationMode::default(),
        }
    }
}

// =============================================================================
// Forex Settings
// =============================================================================

/// Fallback rates into the base currency, used when a line omits `forexRate`.
///
/// Unset currencies have no fallback; such lines must carry their own rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForexSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<ForexRate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eur: Option<ForexRate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cny: Option<ForexRate>,
}

impl ForexSettings {
    /// Returns the configured rate for `currency`.
    ///
    /// The base currency always converts at the identity rate.
    pub fn rate_for(&self, currency: Currency) -> Option<ForexRate> {
        match currency {
            c if c == BASE_CURRENCY => Some(ForexRate::identity()),
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
            Currency::Cny => self.cny,
            Currency::Php => None,
        }
    }

    fn slot_mut(&mut self, currency: Currency) -> Option<&mut Option<ForexRate>> {
        match currency {
            Currency::Usd => Some(&mut self.usd),
            Currency::Eur => Some(&mut self.eur),
            Currency::Cny => Some(&mut self.cny),
            Currency::Php => None,
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Output format for `summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,

    /// Pretty-printed JSON.
    Json,
}

/// How summaries are printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// List each charge row under its category in text output.
    #[serde(default = "default_true")]
    pub show_line_items: bool,

    /// Print `PHP 1,234.50` instead of `₱1,234.50`.
    #[serde(default)]
    pub currency_code: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            format: OutputFormat::default(),
            show_line_items: true,
            currency_code: false,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreightDeskConfig {
    #[serde(default)]
    pub quotation: QuotationSettings,

    #[serde(default)]
    pub forex: ForexSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl FreightDeskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (freightdesk.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file and returns where it went.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(CliError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    ///
    /// Configured values are always held to strict rules, whatever
    /// validation mode quotations use.
    pub fn validate(&self) -> CliResult<()> {
        let strict = ValidationMode::Strict;
        let invalid = |e: freightdesk_core::ValidationError| CliError::InvalidConfig(e.to_string());

        validate_tax_rate(self.tax_rate(), strict).map_err(invalid)?;
        validate_other_charges(self.quotation.other_charges, strict).map_err(invalid)?;

        for currency in Currency::ALL {
            if currency == BASE_CURRENCY {
                continue;
            }
            if let Some(rate) = self.forex.rate_for(currency) {
                validate_forex_rate(currency, rate, strict).map_err(|e| {
                    CliError::InvalidConfig(format!("forex.{}: {}", currency.code().to_lowercase(), e))
                })?;
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("FREIGHTDESK_TAX_RATE") {
            match raw.trim().parse::<Decimal>() {
                Ok(pct) => {
                    debug!(tax_rate_percent = %pct, "Overriding tax rate from environment");
                    self.quotation.tax_rate_percent = pct;
                }
                Err(_) => warn!(value = %raw, "Invalid FREIGHTDESK_TAX_RATE"),
            }
        }

        if let Some(raw) = lookup("FREIGHTDESK_OTHER_CHARGES") {
            match raw.parse::<Money>() {
                Ok(amount) => {
                    debug!(other_charges = %amount, "Overriding other charges from environment");
                    self.quotation.other_charges = amount;
                }
                Err(_) => warn!(value = %raw, "Invalid FREIGHTDESK_OTHER_CHARGES"),
            }
        }

        if let Some(raw) = lookup("FREIGHTDESK_VALIDATION_MODE") {
            match raw.parse::<ValidationMode>() {
                Ok(mode) => {
                    debug!(%mode, "Overriding validation mode from environment");
                    self.quotation.validation_mode = mode;
                }
                Err(_) => warn!(value = %raw, "Unknown validation mode in environment"),
            }
        }

        for currency in Currency::ALL {
            let key = format!("FREIGHTDESK_FOREX_{}", currency.code());
            let Some(raw) = lookup(&key) else {
                continue;
            };
            let Some(slot) = self.forex.slot_mut(currency) else {
                warn!(%key, "Base currency has no configurable rate");
                continue;
            };
            match raw.trim().parse::<Decimal>() {
                Ok(rate) => {
                    debug!(%currency, %rate, "Overriding forex rate from environment");
                    *slot = Some(ForexRate::new(rate));
                }
                Err(_) => warn!(%key, value = %raw, "Invalid forex rate in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "freightdesk", "freightdesk")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the configured tax rate as a fraction.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_percentage(self.quotation.tax_rate_percent)
    }

    /// Returns the configured other charges.
    pub fn other_charges(&self) -> Money {
        self.quotation.other_charges
    }

    /// Returns the configured validation mode.
    pub fn validation_mode(&self) -> ValidationMode {
        self.quotation.validation_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = FreightDeskConfig::default();
        assert_eq!(config.tax_rate(), TaxRate::from_bps(1200));
        assert!(config.other_charges().is_zero());
        assert_eq!(config.validation_mode(), ValidationMode::Strict);
        assert_eq!(config.display.format, OutputFormat::Text);
        assert!(config.display.show_line_items);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = FreightDeskConfig::default();

        config.quotation.tax_rate_percent = dec!(112);
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        config.quotation.tax_rate_percent = dec!(12);
        config.quotation.other_charges = Money::from_units(-5);
        assert!(config.validate().is_err());

        config.quotation.other_charges = Money::zero();
        config.forex.usd = Some(ForexRate::new(Decimal::ZERO));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("forex.usd"));

        config.forex.usd = Some(ForexRate::new(dec!(58.0)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rate_for() {
        let forex = ForexSettings {
            usd: Some(ForexRate::new(dec!(58.0))),
            ..Default::default()
        };
        assert_eq!(forex.rate_for(Currency::Php), Some(ForexRate::identity()));
        assert_eq!(forex.rate_for(Currency::Usd), Some(ForexRate::new(dec!(58.0))));
        assert_eq!(forex.rate_for(Currency::Eur), None);
    }

    #[test]
    fn test_overrides() {
        let mut config = FreightDeskConfig::default();
        config.apply_overrides(lookup(&[
            ("FREIGHTDESK_TAX_RATE", "10"),
            ("FREIGHTDESK_OTHER_CHARGES", "1,500.00"),
            ("FREIGHTDESK_VALIDATION_MODE", "permissive"),
            ("FREIGHTDESK_FOREX_USD", "57.5"),
        ]));

        assert_eq!(config.tax_rate(), TaxRate::from_bps(1000));
        assert_eq!(config.other_charges(), Money::from_units(1500));
        assert_eq!(config.validation_mode(), ValidationMode::Permissive);
        assert_eq!(config.forex.usd, Some(ForexRate::new(dec!(57.5))));
    }

    #[test]
    fn test_invalid_overrides_are_skipped() {
        let mut config = FreightDeskConfig::default();
        config.apply_overrides(lookup(&[
            ("FREIGHTDESK_TAX_RATE", "twelve"),
            ("FREIGHTDESK_VALIDATION_MODE", "loose"),
            ("FREIGHTDESK_FOREX_PHP", "2"),
        ]));
        assert_eq!(config, FreightDeskConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: FreightDeskConfig = toml::from_str(
            r#"
            [quotation]
            tax_rate_percent = 5

            [forex]
            eur = "63.10"

            [display]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.tax_rate(), TaxRate::from_bps(500));
        assert_eq!(config.validation_mode(), ValidationMode::Strict);
        assert_eq!(config.forex.eur, Some(ForexRate::new(dec!(63.10))));
        assert_eq!(config.forex.usd, None);
        assert_eq!(config.display.format, OutputFormat::Json);
        assert!(config.display.show_line_items);
    }

    #[test]
    fn test_toml_serialization() {
        let config = FreightDeskConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[quotation]"));
        assert!(toml_str.contains("[display]"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = FreightDeskConfig::default();
        config.quotation.other_charges = Money::from_units(250);
        config.forex.usd = Some(ForexRate::new(dec!(58.0)));
        config.display.currency_code = true;

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let reloaded = FreightDeskConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[quotation\ntax_rate_percent = 12").unwrap();

        assert!(matches!(
            FreightDeskConfig::from_file(&path),
            Err(CliError::TomlDe(_))
        ));
    }
}
