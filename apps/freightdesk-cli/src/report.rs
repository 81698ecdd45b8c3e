//! # Summary Reports
//!
//! Renders a [`QuotationDraft`] as a text table or JSON.
//!
//! ## Text Layout
//! ```text
//! Quotation Q-2026-0001 · Acme Imports
//!
//! Forwarding                                               ₱17,400.00
//!   Ocean freight             3 × USD 100.00 @ 58          ₱17,400.00
//! Brokerage                                                 ₱1,000.00
//!   Brokerage fee             1 × PHP 1,000.00         T    ₱1,000.00
//! ────────────────────────────────────────────────────────────────────
//! Non-taxed subtotal                                       ₱17,400.00
//! Taxed subtotal                                            ₱1,000.00
//! Tax (12%)                                                   ₱120.00
//! Other charges                                               ₱250.00
//! ════════════════════════════════════════════════════════════════════
//! Grand total                                              ₱18,770.00
//! ```

use std::fmt;

use freightdesk_core::format::{format_amount, format_amount_with_code};
use freightdesk_core::{FinancialSummary, LineItem, Money, QuotationDraft};
use serde::Serialize;

use crate::config::DisplaySettings;
use crate::error::CliResult;

const LABEL_WIDTH: usize = 50;
const AMOUNT_WIDTH: usize = 18;
const RULE_WIDTH: usize = LABEL_WIDTH + AMOUNT_WIDTH;

/// JSON output: the full draft next to its summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationReport<'a> {
    pub quotation: &'a QuotationDraft,
    pub summary: FinancialSummary,
}

impl<'a> QuotationReport<'a> {
    pub fn new(quotation: &'a QuotationDraft) -> Self {
        QuotationReport {
            quotation,
            summary: quotation.summary(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Text table of category subtotals and the financial summary.
pub struct TextReport<'a> {
    quotation: &'a QuotationDraft,
    display: &'a DisplaySettings,
}

impl<'a> TextReport<'a> {
    pub fn new(quotation: &'a QuotationDraft, display: &'a DisplaySettings) -> Self {
        TextReport { quotation, display }
    }

    fn money(&self, amount: Money) -> String {
        let currency = self.quotation.base_currency();
        if self.display.currency_code {
            format_amount_with_code(amount, currency)
        } else {
            format_amount(amount, currency)
        }
    }

    fn row(&self, f: &mut fmt::Formatter<'_>, label: &str, amount: Money) -> fmt::Result {
        writeln!(
            f,
            "{:<label_w$}{:>amount_w$}",
            label,
            self.money(amount),
            label_w = LABEL_WIDTH,
            amount_w = AMOUNT_WIDTH
        )
    }

    fn line_row(&self, f: &mut fmt::Formatter<'_>, item: &LineItem) -> fmt::Result {
        let mut detail = format!(
            "{} × {} {}",
            item.quantity(),
            item.currency().code(),
            item.price()
        );
        if !item.forex_rate().is_identity() {
            detail.push_str(&format!(" @ {}", item.forex_rate()));
        }
        let marker = if item.is_taxed() { "T" } else { "" };
        let label = format!("  {:<24}{:<22}{:>3}", truncate(item.description(), 22), detail, marker);
        self.row(f, &label, item.amount())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = self.quotation;

        match (quote.reference(), quote.customer()) {
            (Some(reference), Some(customer)) => writeln!(f, "Quotation {reference} · {customer}")?,
            (Some(reference), None) => writeln!(f, "Quotation {reference}")?,
            (None, Some(customer)) => writeln!(f, "Quotation for {customer}")?,
            (None, None) => writeln!(f, "Quotation {}", quote.id())?,
        }
        writeln!(f)?;

        if quote.is_empty() {
            writeln!(f, "(no charges)")?;
        }

        for category in quote.categories() {
            self.row(f, category.name(), category.subtotal())?;
            if self.display.show_line_items {
                for item in category.line_items() {
                    self.line_row(f, item)?;
                }
            }
        }

        let summary = quote.summary();
        writeln!(f, "{}", "─".repeat(RULE_WIDTH))?;
        self.row(f, "Non-taxed subtotal", summary.subtotal_non_taxed)?;
        self.row(f, "Taxed subtotal", summary.subtotal_taxed)?;
        self.row(f, &format!("Tax ({})", summary.tax_rate), summary.tax_amount)?;
        self.row(f, "Other charges", summary.other_charges)?;
        writeln!(f, "{}", "═".repeat(RULE_WIDTH))?;
        self.row(f, "Grand total", summary.grand_total)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
