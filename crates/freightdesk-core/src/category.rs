//! # Charge Categories
//!
//! A charge category groups line items under a heading such as
//! "Forwarding", "Brokerage", or "Trucking", and carries their subtotal.
//!
//! ## Subtotal Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal == Σ line_items[i].amount   (at ALL times)                    │
//! │                                                                         │
//! │  add_line_item() ────┐                                                  │
//! │  replace_line_item() ┼──► recompute_subtotal()  (eager, never lazy)     │
//! │  remove_line_item() ─┘                                                  │
//! │                                                                         │
//! │  line_items is private: there is no other way in.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::line_item::LineItem;
use crate::money::Money;
use crate::validation;
use crate::MAX_LINE_ITEMS_PER_CATEGORY;

/// Sums the amounts of a sequence of line items.
///
/// Empty input sums to zero. Order does not matter.
///
/// ## Example
/// ```rust
/// use freightdesk_core::category::compute_subtotal;
/// use freightdesk_core::Money;
///
/// assert_eq!(compute_subtotal(&[]), Money::zero());
/// ```
pub fn compute_subtotal(line_items: &[LineItem]) -> Money {
    line_items.iter().map(LineItem::amount).sum()
}

/// A named group of line items with a derived subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChargeCategory {
    id: String,
    name: String,
    line_items: Vec<LineItem>,
    subtotal: Money,
}

impl ChargeCategory {
    /// Creates an empty category.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ChargeCategory {
            id: id.into(),
            name: name.into().trim().to_string(),
            line_items: Vec::new(),
            subtotal: Money::zero(),
        }
    }

    /// Creates a category pre-filled with line items.
    ///
    /// ## Errors
    /// - `Validation(Required | TooLong)` for a bad name
    /// - `TooManyLineItems` above the per-category limit
    /// - `Validation(Duplicate)` if two line items share an id
    pub fn with_line_items(
        id: impl Into<String>,
        name: impl Into<String>,
        line_items: Vec<LineItem>,
    ) -> CoreResult<Self> {
        let name = name.into();
        validation::validate_category_name(&name)?;

        let mut category = ChargeCategory::new(id, name);
        if line_items.len() > MAX_LINE_ITEMS_PER_CATEGORY {
            return Err(CoreError::TooManyLineItems {
                category_id: category.id,
                max: MAX_LINE_ITEMS_PER_CATEGORY,
            });
        }

        let mut seen = HashSet::with_capacity(line_items.len());
        if let Some(dup) = line_items.iter().find(|i| !seen.insert(i.id())) {
            return Err(duplicate_line_id(dup.id()));
        }

        category.line_items = line_items;
        category.recompute_subtotal();
        Ok(category)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line items in insertion order.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Looks up a line item by id.
    pub fn line_item(&self, line_item_id: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|i| i.id() == line_item_id)
    }

    /// Sum of the line item amounts.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Returns the number of line items.
    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    /// Checks if the category has no line items.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// Appends a line item and recomputes the subtotal.
    ///
    /// Line item ids are unique within a category.
    pub fn add_line_item(&mut self, item: LineItem) -> CoreResult<()> {
        if self.line_items.len() >= MAX_LINE_ITEMS_PER_CATEGORY {
            return Err(CoreError::TooManyLineItems {
                category_id: self.id.clone(),
                max: MAX_LINE_ITEMS_PER_CATEGORY,
            });
        }
        if self.line_item(item.id()).is_some() {
            return Err(duplicate_line_id(item.id()));
        }

        self.line_items.push(item);
        self.recompute_subtotal();
        Ok(())
    }

    /// Replaces the line item with the same id, keeping its position.
    pub fn replace_line_item(&mut self, item: LineItem) -> CoreResult<()> {
        let slot = self
            .line_items
            .iter_mut()
            .find(|i| i.id() == item.id())
            .ok_or_else(|| CoreError::LineItemNotFound {
                category_id: self.id.clone(),
                line_item_id: item.id().to_string(),
            })?;

        *slot = item;
        self.recompute_subtotal();
        Ok(())
    }

    /// Removes a line item by id and recomputes the subtotal.
    pub fn remove_line_item(&mut self, line_item_id: &str) -> CoreResult<LineItem> {
        let index = self
            .line_items
            .iter()
            .position(|i| i.id() == line_item_id)
            .ok_or_else(|| CoreError::LineItemNotFound {
                category_id: self.id.clone(),
                line_item_id: line_item_id.to_string(),
            })?;

        let removed = self.line_items.remove(index);
        self.recompute_subtotal();
        Ok(removed)
    }

    fn recompute_subtotal(&mut self) {
        self.subtotal = compute_subtotal(&self.line_items);
    }
}

fn duplicate_line_id(id: &str) -> CoreError {
    ValidationError::Duplicate {
        field: "line item id".to_string(),
        value: id.to_string(),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::LineItemDraft;
    use crate::types::{Currency, ForexRate, Quantity};
    use crate::validation::ValidationMode;
    use rust_decimal_macros::dec;

    fn item(id: &str, price: i64, qty: i64) -> LineItem {
        let draft = LineItemDraft::new(format!("Charge {}", id), Money::from_units(price), Quantity::from_units(qty));
        LineItem::from_draft(id, draft, ValidationMode::Strict).unwrap()
    }

    #[test]
    fn test_empty_subtotal_is_zero() {
        assert_eq!(compute_subtotal(&[]), Money::zero());
        assert_eq!(ChargeCategory::new("cat_1", "Brokerage").subtotal(), Money::zero());
    }

    #[test]
    fn test_subtotal_is_sum_of_amounts() {
        let items = vec![item("a", 1000, 1), item("b", 500, 2), item("c", 25, 4)];
        assert_eq!(compute_subtotal(&items), Money::from_units(2100));
    }

    #[test]
    fn test_subtotal_order_independent() {
        let items = vec![item("a", 1000, 1), item("b", 500, 2), item("c", 25, 4)];
        let reversed: Vec<LineItem> = items.iter().rev().cloned().collect();
        assert_eq!(compute_subtotal(&items), compute_subtotal(&reversed));
    }

    #[test]
    fn test_forex_subtotal() {
        let draft = LineItemDraft::new("Ocean freight", Money::from_units(100), Quantity::from_units(3))
            .in_currency(Currency::Usd, ForexRate::new(dec!(58.0)));
        let usd = LineItem::from_draft("line_1", draft, ValidationMode::Strict).unwrap();

        let category = ChargeCategory::with_line_items("cat_1", "Forwarding", vec![usd]).unwrap();
        assert_eq!(category.subtotal(), Money::from_units(17400));
    }

    #[test]
    fn test_with_line_items_validates_name() {
        let err = ChargeCategory::with_line_items("cat_1", "   ", vec![item("a", 1, 1)]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "name"
        ));

        let long_name = "N".repeat(crate::MAX_CATEGORY_NAME_LEN + 1);
        let err = ChargeCategory::with_line_items("cat_1", long_name, Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::TooLong { .. })));

        let category = ChargeCategory::with_line_items("cat_1", "  Brokerage ", Vec::new()).unwrap();
        assert_eq!(category.name(), "Brokerage");
    }

    #[test]
    fn test_with_line_items_rejects_duplicate_ids() {
        let items = vec![item("a", 1000, 1), item("b", 5, 1), item("a", 1, 1)];
        let err = ChargeCategory::with_line_items("cat_1", "Trucking", items).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { ref field, ref value })
                if field == "line item id" && value == "a"
        ));
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut category = ChargeCategory::new("cat_1", "Trucking");
        category.add_line_item(item("a", 5000, 1)).unwrap();

        let err = category.add_line_item(item("a", 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Duplicate { .. })));
        assert_eq!(category.len(), 1);
        assert_eq!(category.subtotal(), Money::from_units(5000));
    }

    #[test]
    fn test_add_recomputes_subtotal() {
        let mut category = ChargeCategory::new("cat_1", "Trucking");
        category.add_line_item(item("a", 5000, 1)).unwrap();
        assert_eq!(category.subtotal(), Money::from_units(5000));

        category.add_line_item(item("b", 1500, 2)).unwrap();
        assert_eq!(category.subtotal(), Money::from_units(8000));
        assert_eq!(category.len(), 2);
    }

    #[test]
    fn test_replace_recomputes_subtotal() {
        let mut category = ChargeCategory::new("cat_1", "Trucking");
        category.add_line_item(item("a", 5000, 1)).unwrap();
        category.add_line_item(item("b", 100, 1)).unwrap();

        category.replace_line_item(item("a", 4000, 1)).unwrap();
        assert_eq!(category.subtotal(), Money::from_units(4100));
        assert_eq!(category.line_items()[0].id(), "a");
    }

    #[test]
    fn test_replace_unknown_line_fails() {
        let mut category = ChargeCategory::new("cat_1", "Trucking");
        let err = category.replace_line_item(item("ghost", 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::LineItemNotFound { .. }));
    }

    #[test]
    fn test_remove_recomputes_subtotal() {
        let mut category = ChargeCategory::new("cat_1", "Trucking");
        category.add_line_item(item("a", 5000, 1)).unwrap();
        category.add_line_item(item("b", 100, 1)).unwrap();

        let removed = category.remove_line_item("a").unwrap();
        assert_eq!(removed.id(), "a");
        assert_eq!(category.subtotal(), Money::from_units(100));

        category.remove_line_item("b").unwrap();
        assert!(category.is_empty());
        assert_eq!(category.subtotal(), Money::zero());

        assert!(category.remove_line_item("b").is_err());
    }

    #[test]
    fn test_line_item_limit() {
        let items: Vec<LineItem> = (0..MAX_LINE_ITEMS_PER_CATEGORY)
            .map(|i| item(&format!("line_{}", i), 1, 1))
            .collect();
        let mut category = ChargeCategory::with_line_items("cat_1", "Misc", items).unwrap();

        let err = category.add_line_item(item("one_more", 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::TooManyLineItems { max, .. } if max == MAX_LINE_ITEMS_PER_CATEGORY));
    }
}
