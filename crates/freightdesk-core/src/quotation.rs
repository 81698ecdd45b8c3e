//! # Quotation Draft
//!
//! The mutable container a user edits while building a quotation.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quotation Builder Operations                         │
//! │                                                                         │
//! │  UI Action               Draft Method              Derived Values       │
//! │  ─────────               ────────────              ──────────────       │
//! │                                                                         │
//! │  Add Category ─────────► add_category() ─────────► (empty, subtotal 0) │
//! │                                                                         │
//! │  Add Charge Row ───────► add_line_item() ───┐                           │
//! │                                             │                           │
//! │  Edit Charge Row ──────► update_line_item() ┼────► amount, subtotal     │
//! │                                             │      recomputed eagerly   │
//! │  Delete Charge Row ────► remove_line_item() ┘                           │
//! │                                                                         │
//! │  Change VAT / Other ───► set_tax_rate() / set_other_charges()           │
//! │                                                                         │
//! │  Render Totals ────────► summary() ───────────────► FinancialSummary   │
//! │                          (fresh every call, never cached)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The draft is a plain value. A caller sharing it between threads wraps it
//! in a `Mutex` and holds the lock for the duration of one operation, so
//! [`QuotationDraft::summary`] always sees a stable snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::category::ChargeCategory;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::id::{generate_id, CATEGORY_ID_PREFIX, LINE_ITEM_ID_PREFIX, QUOTATION_ID_PREFIX};
use crate::line_item::{LineItem, LineItemDraft};
use crate::money::Money;
use crate::summary::{compute_summary, FinancialSummary};
use crate::types::{Currency, TaxRate};
use crate::validation::{self, ValidationMode};
use crate::{BASE_CURRENCY, MAX_CATEGORIES};

/// A quotation under construction.
///
/// ## Invariants
/// - Category names are unique (case-insensitive)
/// - Every category subtotal equals the sum of its line amounts
/// - At most [`MAX_CATEGORIES`] categories
/// - Tax rate and other charges have passed validation for `validation_mode`
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationDraft {
    id: String,
    reference: Option<String>,
    customer: Option<String>,
    base_currency: Currency,
    categories: Vec<ChargeCategory>,
    tax_rate: TaxRate,
    other_charges: Money,
    validation_mode: ValidationMode,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    #[ts(as = "String")]
    updated_at: DateTime<Utc>,
}

impl QuotationDraft {
    /// Creates an empty draft with no tax and no other charges.
    pub fn new(validation_mode: ValidationMode) -> Self {
        let now = Utc::now();
        QuotationDraft {
            id: generate_id(QUOTATION_ID_PREFIX),
            reference: None,
            customer: None,
            base_currency: BASE_CURRENCY,
            categories: Vec::new(),
            tax_rate: TaxRate::zero(),
            other_charges: Money::zero(),
            validation_mode,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the human quotation number (e.g. `Q-2026-0001`).
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the customer label.
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn other_charges(&self) -> Money {
        self.other_charges
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation_mode
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[ChargeCategory] {
        &self.categories
    }

    /// Looks up a category by id.
    pub fn category(&self, category_id: &str) -> Option<&ChargeCategory> {
        self.categories.iter().find(|c| c.id() == category_id)
    }

    /// Total number of line items across all categories.
    pub fn line_item_count(&self) -> usize {
        self.categories.iter().map(ChargeCategory::len).sum()
    }

    /// Checks if the draft has no line items at all.
    pub fn is_empty(&self) -> bool {
        self.line_item_count() == 0
    }

    /// Computes the financial summary from the current categories.
    pub fn summary(&self) -> FinancialSummary {
        compute_summary(&self.categories, self.tax_rate, self.other_charges)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Sets the tax rate (as a fraction).
    pub fn set_tax_rate(&mut self, tax_rate: TaxRate) -> CoreResult<()> {
        validation::validate_tax_rate(tax_rate, self.validation_mode)?;
        self.tax_rate = tax_rate;
        self.touch();
        Ok(())
    }

    /// Sets the flat, untaxed other charges.
    pub fn set_other_charges(&mut self, other_charges: Money) -> CoreResult<()> {
        validation::validate_other_charges(other_charges, self.validation_mode)?;
        self.other_charges = other_charges;
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Category Operations
    // =========================================================================

    /// Adds an empty category and returns its id.
    ///
    /// ## Errors
    /// - `Validation(Required)` / `Validation(TooLong)` for a bad name
    /// - `Validation(Duplicate)` if the name is taken
    /// - `TooManyCategories` at the limit
    pub fn add_category(&mut self, name: &str) -> CoreResult<String> {
        validation::validate_category_name(name)?;
        self.ensure_unique_name(name, None)?;

        if self.categories.len() >= MAX_CATEGORIES {
            return Err(CoreError::TooManyCategories {
                max: MAX_CATEGORIES,
            });
        }

        let id = generate_id(CATEGORY_ID_PREFIX);
        self.categories.push(ChargeCategory::new(id.clone(), name));
        self.touch();
        Ok(id)
    }

    /// Renames a category.
    pub fn rename_category(&mut self, category_id: &str, name: &str) -> CoreResult<()> {
        validation::validate_category_name(name)?;
        self.ensure_unique_name(name, Some(category_id))?;

        self.category_mut(category_id)?.rename(name);
        self.touch();
        Ok(())
    }

    /// Removes a category together with all of its line items.
    pub fn remove_category(&mut self, category_id: &str) -> CoreResult<ChargeCategory> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id() == category_id)
            .ok_or_else(|| CoreError::CategoryNotFound(category_id.to_string()))?;

        let removed = self.categories.remove(index);
        self.touch();
        Ok(removed)
    }

    // =========================================================================
    // Line Item Operations
    // =========================================================================

    /// Validates a draft line, adds it to a category, and returns its id.
    ///
    /// ## Behavior
    /// - The line's amount is computed on the way in
    /// - The category subtotal is recomputed before this returns
    pub fn add_line_item(&mut self, category_id: &str, draft: LineItemDraft) -> CoreResult<String> {
        let mode = self.validation_mode;
        let category = self.category_mut(category_id)?;

        let id = generate_id(LINE_ITEM_ID_PREFIX);
        let item = LineItem::from_draft(id.clone(), draft, mode)?;
        category.add_line_item(item)?;

        self.touch();
        Ok(id)
    }

    /// Replaces a line's inputs, keeping its id and position.
    pub fn update_line_item(
        &mut self,
        category_id: &str,
        line_item_id: &str,
        draft: LineItemDraft,
    ) -> CoreResult<()> {
        let mode = self.validation_mode;
        let category = self.category_mut(category_id)?;

        if category.line_item(line_item_id).is_none() {
            return Err(CoreError::LineItemNotFound {
                category_id: category_id.to_string(),
                line_item_id: line_item_id.to_string(),
            });
        }

        let item = LineItem::from_draft(line_item_id, draft, mode)?;
        category.replace_line_item(item)?;

        self.touch();
        Ok(())
    }

    /// Removes a line from a category.
    pub fn remove_line_item(&mut self, category_id: &str, line_item_id: &str) -> CoreResult<LineItem> {
        let removed = self.category_mut(category_id)?.remove_line_item(line_item_id)?;
        self.touch();
        Ok(removed)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn category_mut(&mut self, category_id: &str) -> CoreResult<&mut ChargeCategory> {
        self.categories
            .iter_mut()
            .find(|c| c.id() == category_id)
            .ok_or_else(|| CoreError::CategoryNotFound(category_id.to_string()))
    }

    fn ensure_unique_name(&self, name: &str, except_id: Option<&str>) -> CoreResult<()> {
        let wanted = name.trim().to_lowercase();
        let taken = self
            .categories
            .iter()
            .filter(|c| Some(c.id()) != except_id)
            .any(|c| c.name().to_lowercase() == wanted);

        if taken {
            return Err(ValidationError::Duplicate {
                field: "category name".to_string(),
                value: name.trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
