//! # Line Items
//!
//! A line item is one charge row in a quotation: "Ocean freight, USD 100 ×
//! 3 containers at 58.0". Its `amount` is always derived.
//!
//! ## Draft vs. Line Item
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   LineItemDraft (user input)          LineItem (validated)              │
//! │   ──────────────────────────          ─────────────────────             │
//! │   description                         id                                │
//! │   price                     ──────►   ...same fields...                 │
//! │   currency              from_draft()  forex_rate (resolved)             │
//! │   quantity                            amount = price × qty × forex      │
//! │   forex_rate: Option                                                    │
//! │   is_taxed, remarks                   NO setters: editing means         │
//! │                                       building a new LineItem           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because `LineItem` keeps its fields private and only
//! [`LineItem::from_draft`] constructs it, `amount` can never be stale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Currency, ForexRate, Quantity};
use crate::validation::{self, ValidationMode};

// =============================================================================
// Amount Formula
// =============================================================================

/// Computes a line item's amount in the base currency.
///
/// `amount = price × quantity × forex_rate`, exact, no rounding.
/// Negative or zero inputs flow straight through; rejecting them is the
/// job of [`crate::validation`]. A product outside the `Decimal` range
/// saturates; see [`checked_amount`].
///
/// ## Example
/// ```rust
/// use freightdesk_core::line_item::compute_amount;
/// use freightdesk_core::{ForexRate, Money, Quantity};
/// use rust_decimal::Decimal;
///
/// let amount = compute_amount(
///     Money::from_units(100),
///     Quantity::from_units(3),
///     ForexRate::new(Decimal::from(58)),
/// );
/// assert_eq!(amount, Money::from_units(17400));
/// ```
#[inline]
pub fn compute_amount(price: Money, quantity: Quantity, forex_rate: ForexRate) -> Money {
    price.multiply_quantity(quantity).convert(forex_rate)
}

/// Like [`compute_amount`], but returns `None` instead of saturating when
/// the product leaves the `Decimal` range.
pub fn checked_amount(price: Money, quantity: Quantity, forex_rate: ForexRate) -> Option<Money> {
    price
        .amount()
        .checked_mul(quantity.value())?
        .checked_mul(forex_rate.value())
        .map(Money::from_decimal)
}

// =============================================================================
// Line Item Draft
// =============================================================================

/// Line item as entered by the user, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItemDraft {
    /// Free-text label for the charge.
    pub description: String,

    /// Unit price in `currency`.
    pub price: Money,

    /// Currency the price is denominated in.
    #[serde(default)]
    pub currency: Currency,

    /// Number of units.
    #[serde(default)]
    pub quantity: Quantity,

    /// Multiplier into the base currency. `None` means "use the identity
    /// rate", which is only allowed for base-currency lines.
    #[serde(default)]
    #[ts(optional)]
    pub forex_rate: Option<ForexRate>,

    /// Whether the amount is subject to tax.
    #[serde(default)]
    pub is_taxed: bool,

    /// Free text, no computational effect.
    #[serde(default)]
    pub remarks: String,
}

impl LineItemDraft {
    /// Creates a draft for a base-currency, non-taxed line.
    pub fn new(description: impl Into<String>, price: Money, quantity: Quantity) -> Self {
        LineItemDraft {
            description: description.into(),
            price,
            currency: crate::BASE_CURRENCY,
            quantity,
            forex_rate: None,
            is_taxed: false,
            remarks: String::new(),
        }
    }

    /// Sets the currency and forex rate.
    pub fn in_currency(mut self, currency: Currency, forex_rate: ForexRate) -> Self {
        self.currency = currency;
        self.forex_rate = Some(forex_rate);
        self
    }

    /// Marks the line as taxed.
    pub fn taxed(mut self) -> Self {
        self.is_taxed = true;
        self
    }

    /// Sets the remarks.
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Resolves the effective forex rate.
    ///
    /// ## Rules
    /// - Explicit rate: used as-is
    /// - No rate, base-currency line: identity (1)
    /// - No rate, foreign-currency line: error, because a silent
    ///   identity rate would under-quote by a factor of ~58 for USD
    pub fn resolve_forex_rate(&self) -> Result<ForexRate, ValidationError> {
        match self.forex_rate {
            Some(rate) => Ok(rate),
            None if self.currency == crate::BASE_CURRENCY => Ok(ForexRate::identity()),
            None => Err(ValidationError::Required {
                field: "forex_rate".to_string(),
            }),
        }
    }

    /// Runs every check for the given mode.
    pub fn validate(&self, mode: ValidationMode) -> CoreResult<ForexRate> {
        validation::validate_description(&self.description)?;
        validation::validate_remarks(&self.remarks)?;
        validation::validate_price(self.price, mode)?;
        validation::validate_quantity(self.quantity, mode)?;

        let forex_rate = self.resolve_forex_rate()?;
        validation::validate_forex_rate(self.currency, forex_rate, mode)?;

        Ok(forex_rate)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A validated line item with its derived amount.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    id: String,
    description: String,
    price: Money,
    currency: Currency,
    quantity: Quantity,
    forex_rate: ForexRate,
    is_taxed: bool,
    remarks: String,
    amount: Money,
}

impl LineItem {
    /// Validates a draft and computes its amount.
    ///
    /// ## Example
    /// ```rust
    /// use freightdesk_core::line_item::{LineItem, LineItemDraft};
    /// use freightdesk_core::validation::ValidationMode;
    /// use freightdesk_core::{Money, Quantity};
    ///
    /// let draft = LineItemDraft::new("Trucking", Money::from_units(5000), Quantity::from_units(1));
    /// let item = LineItem::from_draft("line_1", draft, ValidationMode::Strict).unwrap();
    /// assert_eq!(item.amount(), Money::from_units(5000));
    /// ```
    pub fn from_draft(
        id: impl Into<String>,
        draft: LineItemDraft,
        mode: ValidationMode,
    ) -> CoreResult<Self> {
        let forex_rate = draft.validate(mode)?;
        let amount = checked_amount(draft.price, draft.quantity, forex_rate).ok_or_else(|| {
            ValidationError::OutOfRange {
                field: "amount".to_string(),
                min: Decimal::MIN.to_string(),
                max: Decimal::MAX.to_string(),
                value: format!("{} × {} × {}", draft.price.amount(), draft.quantity, forex_rate),
            }
        })?;

        Ok(LineItem {
            id: id.into(),
            description: draft.description.trim().to_string(),
            price: draft.price,
            currency: draft.currency,
            quantity: draft.quantity,
            forex_rate,
            is_taxed: draft.is_taxed,
            remarks: draft.remarks,
            amount,
        })
    }

    /// Returns an editable copy of this line's inputs.
    pub fn to_draft(&self) -> LineItemDraft {
        LineItemDraft {
            description: self.description.clone(),
            price: self.price,
            currency: self.currency,
            quantity: self.quantity,
            forex_rate: Some(self.forex_rate),
            is_taxed: self.is_taxed,
            remarks: self.remarks.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn forex_rate(&self) -> ForexRate {
        self.forex_rate
    }

    pub fn is_taxed(&self) -> bool {
        self.is_taxed
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    /// `price × quantity × forex_rate` in the base currency.
    pub fn amount(&self) -> Money {
        self.amount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rust_decimal_macros::dec;

    fn usd_draft() -> LineItemDraft {
        LineItemDraft::new("Ocean freight", Money::from_units(100), Quantity::from_units(3))
            .in_currency(Currency::Usd, ForexRate::new(dec!(58.0)))
    }

    #[test]
    fn test_compute_amount() {
        let amount = compute_amount(
            Money::from_units(100),
            Quantity::from_units(2),
            ForexRate::identity(),
        );
        assert_eq!(amount, Money::from_units(200));
    }

    #[test]
    fn test_compute_amount_keeps_precision() {
        let amount = compute_amount(
            Money::from_decimal(dec!(19.99)),
            Quantity::new(dec!(2.5)),
            ForexRate::new(dec!(58.125)),
        );
        assert_eq!(amount.amount(), dec!(2904.796875));
    }

    #[test]
    fn test_compute_amount_lets_negatives_through() {
        let amount = compute_amount(
            Money::from_units(-10),
            Quantity::from_units(2),
            ForexRate::identity(),
        );
        assert_eq!(amount, Money::from_units(-20));
    }

    #[test]
    fn test_checked_amount() {
        let amount = checked_amount(
            Money::from_units(100),
            Quantity::from_units(3),
            ForexRate::new(dec!(58)),
        );
        assert_eq!(amount, Some(Money::from_units(17400)));

        let huge = checked_amount(
            Money::from_decimal(Decimal::MAX),
            Quantity::from_units(2),
            ForexRate::identity(),
        );
        assert_eq!(huge, None);
    }

    #[test]
    fn test_from_draft_rejects_oversized_inputs_in_every_mode() {
        for mode in [ValidationMode::Strict, ValidationMode::Permissive] {
            let draft = LineItemDraft::new(
                "Ocean freight",
                Money::from_decimal(Decimal::MAX),
                Quantity::from_units(2),
            );
            let err = LineItem::from_draft("line_1", draft, mode).unwrap_err();
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "price"
            ));

            let draft = usd_draft().in_currency(Currency::Usd, ForexRate::new(Decimal::MAX));
            assert!(LineItem::from_draft("line_1", draft, mode).is_err());
        }
    }

    #[test]
    fn test_forex_conversion() {
        let item = LineItem::from_draft("line_1", usd_draft(), ValidationMode::Strict).unwrap();
        assert_eq!(item.amount(), Money::from_units(17400));
        assert_eq!(item.currency(), Currency::Usd);
    }

    #[test]
    fn test_base_currency_defaults_to_identity_rate() {
        let draft = LineItemDraft::new("Trucking", Money::from_units(5000), Quantity::from_units(1));
        let item = LineItem::from_draft("line_1", draft, ValidationMode::Strict).unwrap();
        assert!(item.forex_rate().is_identity());
        assert_eq!(item.amount(), Money::from_units(5000));
    }

    #[test]
    fn test_foreign_currency_requires_rate() {
        let mut draft = usd_draft();
        draft.forex_rate = None;

        let err = LineItem::from_draft("line_1", draft, ValidationMode::Permissive).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "forex_rate"
        ));
    }

    #[test]
    fn test_strict_rejects_negative_price() {
        let draft = LineItemDraft::new("Refund", Money::from_units(-100), Quantity::from_units(1));
        assert!(LineItem::from_draft("line_1", draft.clone(), ValidationMode::Strict).is_err());

        let item = LineItem::from_draft("line_1", draft, ValidationMode::Permissive).unwrap();
        assert_eq!(item.amount(), Money::from_units(-100));
    }

    #[test]
    fn test_description_always_required() {
        let draft = LineItemDraft::new("  ", Money::from_units(1), Quantity::from_units(1));
        assert!(LineItem::from_draft("line_1", draft, ValidationMode::Permissive).is_err());
    }

    #[test]
    fn test_to_draft_round_trips_inputs() {
        let draft = usd_draft().taxed().with_remarks("per container");
        let item = LineItem::from_draft("line_1", draft.clone(), ValidationMode::Strict).unwrap();

        let back = item.to_draft();
        assert_eq!(back, draft);
        assert_eq!(item.remarks(), "per container");
        assert!(item.is_taxed());
    }

    #[test]
    fn test_draft_deserializes_with_defaults() {
        let json = r#"{ "description": "Arrastre", "price": "1500" }"#;
        let draft: LineItemDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.currency, Currency::Php);
        assert_eq!(draft.quantity, Quantity::default());
        assert_eq!(draft.forex_rate, None);
        assert!(!draft.is_taxed);
    }

    #[test]
    fn test_line_item_serializes_camel_case() {
        let item = LineItem::from_draft("line_1", usd_draft(), ValidationMode::Strict).unwrap();
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["forexRate"], "58.0");
        assert_eq!(value["isTaxed"], false);
        assert_eq!(value["currency"], "USD");
        assert!(value.get("amount").is_some());
    }
}
