//! # Financial Summary
//!
//! Rolls every line item of a quotation into taxed and non-taxed buckets,
//! applies tax, and adds the flat other charges.
//!
//! ## Algorithm: Flatten, then Partition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  for category in categories:                                            │
//! │      for item in category.line_items:          (walks ITEMS, not the   │
//! │          if item.is_taxed:                      category subtotals)     │
//! │              subtotal_taxed     += item.amount                          │
//! │          else:                                                          │
//! │              subtotal_non_taxed += item.amount                          │
//! │                                                                         │
//! │  tax_amount  = subtotal_taxed × tax_rate                                │
//! │  grand_total = subtotal_non_taxed + subtotal_taxed                      │
//! │              + tax_amount + other_charges     (other charges: no tax)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The summary is a projection: it is recomputed from the category list
//! on every read and never stored as mutable state.

use serde::Serialize;
use ts_rs::TS;

use crate::category::ChargeCategory;
use crate::money::Money;
use crate::types::TaxRate;

/// Financial totals of a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinancialSummary {
    /// Σ amount of lines with `is_taxed == false`.
    pub subtotal_non_taxed: Money,

    /// Σ amount of lines with `is_taxed == true`.
    pub subtotal_taxed: Money,

    /// Rate applied to the taxed subtotal (fraction).
    pub tax_rate: TaxRate,

    /// `subtotal_taxed × tax_rate`.
    pub tax_amount: Money,

    /// Flat amount added after tax, never taxed itself.
    pub other_charges: Money,

    /// `subtotal_non_taxed + subtotal_taxed + tax_amount + other_charges`.
    pub grand_total: Money,
}

impl FinancialSummary {
    /// Non-taxed plus taxed subtotal, before tax and other charges.
    pub fn subtotal(&self) -> Money {
        self.subtotal_non_taxed + self.subtotal_taxed
    }
}

/// Computes the financial summary of a list of categories.
///
/// Pure and total: never fails, never rounds, and returns all zeros
/// (apart from the echoed `tax_rate` and `other_charges`) for an
/// empty list. `tax_rate` is not clamped.
///
/// ## Example
/// ```rust
/// use freightdesk_core::summary::compute_summary;
/// use freightdesk_core::{Money, TaxRate};
///
/// let summary = compute_summary(&[], TaxRate::from_bps(1200), Money::from_units(250));
/// assert_eq!(summary.grand_total, Money::from_units(250));
/// ```
pub fn compute_summary(
    categories: &[ChargeCategory],
    tax_rate: TaxRate,
    other_charges: Money,
) -> FinancialSummary {
    let mut subtotal_non_taxed = Money::zero();
    let mut subtotal_taxed = Money::zero();

    for category in categories {
        for item in category.line_items() {
            if item.is_taxed() {
                subtotal_taxed += item.amount();
            } else {
                subtotal_non_taxed += item.amount();
            }
        }
    }

    let tax_amount = subtotal_taxed.calculate_tax(tax_rate);
    let grand_total = subtotal_non_taxed + subtotal_taxed + tax_amount + other_charges;

    FinancialSummary {
        subtotal_non_taxed,
        subtotal_taxed,
        tax_rate,
        tax_amount,
        other_charges,
        grand_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
