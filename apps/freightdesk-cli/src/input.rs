//! # Quotation Documents
//!
//! JSON input read by `summary` and `validate`, and its conversion into a
//! [`QuotationDraft`].
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Value           Flag            Document        Config                 │
//! │  ─────────────   ─────────────   ─────────────   ────────────────────   │
//! │  tax rate        --tax-rate  ──► taxRate     ──► quotation.tax_rate_%   │
//! │  other charges   --other-...  ─► otherCharges ─► quotation.other_...    │
//! │  forex rate                      forexRate   ──► forex.<currency>       │
//! │  validation      (validate       ─               quotation.validation   │
//! │                   forces strict)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use freightdesk_core::validation::ValidationMode;
use freightdesk_core::{LineItemDraft, Money, QuotationDraft, TaxRate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FreightDeskConfig;
use crate::error::{CliError, CliResult};

/// A quotation as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// Tax rate as a fraction (`"0.12"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<TaxRate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_charges: Option<Money>,

    #[serde(default)]
    pub categories: Vec<CategoryDocument>,
}

/// One charge category with its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDocument {
    pub name: String,

    #[serde(default)]
    pub line_items: Vec<LineItemDraft>,
}

/// Per-invocation values that beat both the document and the config.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub tax_rate: Option<TaxRate>,
    pub other_charges: Option<Money>,
    pub validation_mode: Option<ValidationMode>,
}

impl QuotationDocument {
    /// Reads and parses a document from disk.
    pub fn read(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let document = Self::parse(&contents)?;
        debug!(
            ?path,
            categories = document.categories.len(),
            "Quotation document loaded"
        );
        Ok(document)
    }

    /// Parses a document from a JSON string.
    pub fn parse(json: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a draft, filling gaps from overrides and configuration.
    ///
    /// Fails on the first rejected category or line, naming where it is.
    pub fn into_draft(
        self,
        config: &FreightDeskConfig,
        overrides: Overrides,
    ) -> CliResult<QuotationDraft> {
        let mode = overrides
            .validation_mode
            .unwrap_or_else(|| config.validation_mode());

        let mut draft = QuotationDraft::new(mode);
        if let Some(reference) = self.reference {
            draft = draft.with_reference(reference);
        }
        if let Some(customer) = self.customer {
            draft = draft.with_customer(customer);
        }

        draft.set_tax_rate(
            overrides
                .tax_rate
                .or(self.tax_rate)
                .unwrap_or_else(|| config.tax_rate()),
        )?;
        draft.set_other_charges(
            overrides
                .other_charges
                .or(self.other_charges)
                .unwrap_or_else(|| config.other_charges()),
        )?;

        for category in self.categories {
            let category_id = draft
                .add_category(&category.name)
                .map_err(|e| CliError::in_document(format!("category \"{}\"", category.name), e))?;

            for (index, mut line) in category.line_items.into_iter().enumerate() {
                if line.forex_rate.is_none() && line.currency != draft.base_currency() {
                    line.forex_rate = config.forex.rate_for(line.currency);
                    if let Some(rate) = line.forex_rate {
                        debug!(currency = %line.currency, %rate, "Using configured forex rate");
                    }
                }

                draft.add_line_item(&category_id, line).map_err(|e| {
                    CliError::in_document(
                        format!("category \"{}\" line {}", category.name, index + 1),
                        e,
                    )
                })?;
            }
        }

        Ok(draft)
    }
}
