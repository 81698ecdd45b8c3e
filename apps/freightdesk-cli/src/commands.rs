//! # Command Handlers
//!
//! One handler per subcommand. Handlers return the text to print so they
//! can be tested without capturing stdout.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use freightdesk_core::validation::ValidationMode;
use freightdesk_core::{generate_id, Money, TaxRate};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::{FreightDeskConfig, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::input::{Overrides, QuotationDocument};
use crate::report::{QuotationReport, TextReport};

// =============================================================================
// summary
// =============================================================================

/// Arguments for `freightdesk summary`.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Quotation JSON document.
    pub file: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Tax rate as a percentage (12 means 12%).
    #[arg(long, value_name = "PCT")]
    pub tax_rate: Option<Decimal>,

    /// Flat untaxed amount added to the grand total.
    #[arg(long, value_name = "AMT", allow_hyphen_values = true)]
    pub other_charges: Option<Money>,
}

/// Prints category subtotals and the financial summary.
pub fn run_summary(args: &SummaryArgs, config: &FreightDeskConfig) -> CliResult<String> {
    let overrides = Overrides {
        tax_rate: args.tax_rate.map(TaxRate::from_percentage),
        other_charges: args.other_charges,
        validation_mode: None,
    };

    let draft = QuotationDocument::read(&args.file)?.into_draft(config, overrides)?;
    let summary = draft.summary();
    info!(
        quotation = draft.id(),
        categories = draft.categories().len(),
        line_items = draft.line_item_count(),
        grand_total = %summary.grand_total,
        "Summary computed"
    );

    if args.json || config.display.format == OutputFormat::Json {
        QuotationReport::new(&draft).to_json()
    } else {
        Ok(TextReport::new(&draft, &config.display).to_string())
    }
}

// =============================================================================
// validate
// =============================================================================

/// Arguments for `freightdesk validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Quotation JSON document.
    pub file: PathBuf,
}

/// Builds the document in strict mode; the first rejection is the error.
pub fn run_validate(args: &ValidateArgs, config: &FreightDeskConfig) -> CliResult<String> {
    let overrides = Overrides {
        validation_mode: Some(ValidationMode::Strict),
        ..Default::default()
    };

    let draft = QuotationDocument::read(&args.file)?
        .into_draft(config, overrides)
        .inspect_err(|e| warn!(file = ?args.file, error = %e, "Validation failed"))?;

    Ok(format!(
        "OK: {} categories, {} line items",
        draft.categories().len(),
        draft.line_item_count()
    ))
}

// =============================================================================
// new-id
// =============================================================================

/// Arguments for `freightdesk new-id`.
#[derive(Args, Debug)]
pub struct NewIdArgs {
    /// Prefix such as `quote`, `cat`, or `line`.
    pub prefix: String,
}

pub fn run_new_id(args: &NewIdArgs) -> String {
    generate_id(&args.prefix)
}

// =============================================================================
// config
// =============================================================================

/// Arguments for `freightdesk config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (file + environment).
    Show,

    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run_config(args: &ConfigArgs, config_path: Option<PathBuf>) -> CliResult<String> {
    match args.action {
        ConfigAction::Show => {
            let config = FreightDeskConfig::load(config_path.clone())?;
            let source = config_path
                .or_else(FreightDeskConfig::default_config_path)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string());
            Ok(format!(
                "# config file: {}\n{}",
                source,
                toml::to_string_pretty(&config)?
            ))
        }
        ConfigAction::Init { force } => {
            let path = config_path
                .or_else(FreightDeskConfig::default_config_path)
                .ok_or(CliError::NoConfigPath)?;
            if path.exists() && !force {
                return Err(CliError::ConfigExists(path));
            }
            let written = FreightDeskConfig::default().save(Some(path))?;
            Ok(format!("Wrote default configuration to {}", written.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::path::Path;

    const QUOTE: &str = r#"{
        "reference": "Q-2026-0007",
        "categories": [
            { "name": "Brokerage",
              "lineItems": [
                { "description": "Brokerage fee", "price": "1000", "quantity": "1", "isTaxed": true }
              ] },
            { "name": "Forwarding",
              "lineItems": [
                { "description": "Handling", "price": "500", "quantity": "2" }
              ] }
        ]
    }"#;

    fn write_quote(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("quote.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    fn summary_args(file: PathBuf) -> SummaryArgs {
        SummaryArgs {
            file,
            json: false,
            tax_rate: None,
            other_charges: None,
        }
    }

    #[test]
    fn test_summary_text() {
        let dir = tempfile::tempdir().unwrap();
        let args = summary_args(write_quote(dir.path(), QUOTE));

        let out = run_summary(&args, &FreightDeskConfig::default()).unwrap();
        assert!(out.starts_with("Quotation Q-2026-0007"));
        assert!(out.trim_end().ends_with("₱2,120.00"));
    }

    #[test]
    fn test_summary_json_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = summary_args(write_quote(dir.path(), QUOTE));
        args.json = true;
        args.tax_rate = Some(dec!(0));
        args.other_charges = Some(Money::from_units(250));

        let out = run_summary(&args, &FreightDeskConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let grand_total: Decimal = value["summary"]["grandTotal"].as_str().unwrap().parse().unwrap();
        assert_eq!(grand_total, dec!(2250));
    }

    #[test]
    fn test_summary_uses_configured_format() {
        let dir = tempfile::tempdir().unwrap();
        let args = summary_args(write_quote(dir.path(), QUOTE));
        let mut config = FreightDeskConfig::default();
        config.display.format = OutputFormat::Json;

        let out = run_summary(&args, &config).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn test_validate_forces_strict() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_quote(
            dir.path(),
            r#"{ "categories": [ { "name": "Adjustments",
                 "lineItems": [ { "description": "Credit", "price": "-1", "quantity": "1" } ] } ] }"#,
        );
        let mut config = FreightDeskConfig::default();
        config.quotation.validation_mode = ValidationMode::Permissive;

        let err = run_validate(&ValidateArgs { file }, &config).unwrap_err();
        assert!(matches!(err, CliError::InDocument { .. }));
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_quote(dir.path(), QUOTE);

        let out = run_validate(&ValidateArgs { file }, &FreightDeskConfig::default()).unwrap();
        assert_eq!(out, "OK: 2 categories, 2 line items");
    }

    #[test]
    fn test_new_id() {
        let id = run_new_id(&NewIdArgs {
            prefix: "quote".to_string(),
        });
        assert!(id.starts_with("quote_"));
    }

    #[test]
    fn test_config_init_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freightdesk.toml");
        let init = ConfigArgs {
            action: ConfigAction::Init { force: false },
        };

        let out = run_config(&init, Some(path.clone())).unwrap();
        assert!(out.contains("freightdesk.toml"));
        assert!(path.exists());

        assert!(matches!(
            run_config(&init, Some(path.clone())),
            Err(CliError::ConfigExists(_))
        ));

        let forced = ConfigArgs {
            action: ConfigAction::Init { force: true },
        };
        assert!(run_config(&forced, Some(path.clone())).is_ok());

        let show = ConfigArgs {
            action: ConfigAction::Show,
        };
        let out = run_config(&show, Some(path)).unwrap();
        assert!(out.contains("[quotation]"));
    }
}
