//! # Validation Module
//!
//! Input validation for quotation data entering a draft.
//!
//! ## Validation Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Each Mode Checks                              │
//! │                                                                         │
//! │  Check                                  Permissive     Strict           │
//! │  ─────────────────────────────────────  ──────────     ──────           │
//! │  description / category name present        ✅            ✅           │
//! │  text length limits                         ✅            ✅           │
//! │  |price|, |other_charges| <= MAX_AMOUNT      ✅            ✅           │
//! │  |quantity| <= MAX_QUANTITY                 ✅            ✅           │
//! │  |forex_rate| <= MAX_FOREX_RATE             ✅            ✅           │
//! │  |tax_rate| <= MAX_TAX_RATE_BPS             ✅            ✅           │
//! │  price >= 0                                 ❌            ✅           │
//! │  quantity > 0                               ❌            ✅           │
//! │  forex_rate > 0                             ❌            ✅           │
//! │  base-currency line has forex_rate == 1     ❌            ✅           │
//! │  tax_rate within [0, 1]                     ❌            ✅           │
//! │  other_charges >= 0                         ❌            ✅           │
//! │                                                                         │
//! │  Permissive mirrors free-form data entry: odd numbers flow through     │
//! │  the formulas unchanged and a human corrects them before sending.      │
//! │  The magnitude limits keep every total inside Decimal's range.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use freightdesk_core::validation::{validate_price, ValidationMode};
//! use freightdesk_core::Money;
//!
//! let price = Money::from_cents(-100);
//! assert!(validate_price(price, ValidationMode::Permissive).is_ok());
//! assert!(validate_price(price, ValidationMode::Strict).is_err());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Currency, ForexRate, Quantity, TaxRate};
use crate::{
    MAX_AMOUNT, MAX_CATEGORY_NAME_LEN, MAX_DESCRIPTION_LEN, MAX_FOREX_RATE, MAX_QUANTITY,
    MAX_REMARKS_LEN, MAX_TAX_RATE_BPS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validation Mode
// =============================================================================

/// How strictly numeric input is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ValidationMode {
    /// Numeric values are accepted as entered.
    Permissive,

    /// Negative prices, non-positive quantities or rates, and
    /// out-of-range tax rates are rejected.
    #[default]
    Strict,
}

impl ValidationMode {
    /// Returns true for [`ValidationMode::Strict`].
    pub fn is_strict(&self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Permissive => write!(f, "permissive"),
            ValidationMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" | "lenient" => Ok(ValidationMode::Permissive),
            "strict" => Ok(ValidationMode::Strict),
            _ => Err(ValidationError::NotAllowed {
                field: "validation_mode".to_string(),
                allowed: vec!["permissive".to_string(), "strict".to_string()],
            }),
        }
    }
}

// =============================================================================
// Text Validators (all modes)
// =============================================================================

fn validate_text(field: &str, value: &str, required: bool, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if required && value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a line item description.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use freightdesk_core::validation::validate_description;
///
/// assert!(validate_description("Ocean freight 1x40HC").is_ok());
/// assert!(validate_description("   ").is_err());
/// ```
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_text("description", description, true, MAX_DESCRIPTION_LEN)
}

/// Validates free-text remarks. Empty is fine.
pub fn validate_remarks(remarks: &str) -> ValidationResult<()> {
    validate_text("remarks", remarks, false, MAX_REMARKS_LEN)
}

/// Validates a charge category name ("Forwarding", "Brokerage", ...).
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, true, MAX_CATEGORY_NAME_LEN)
}

// =============================================================================
// Numeric Validators (magnitude in all modes, sign and range in strict mode)
// =============================================================================

fn within_magnitude(field: &str, value: Decimal, limit: Decimal) -> ValidationResult<()> {
    if value.abs() > limit {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: (-limit).to_string(),
            max: limit.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn must_not_be_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn must_be_positive(field: &str, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - At most [`MAX_AMOUNT`] either side of zero (all modes)
/// - Must be non-negative (strict); zero is allowed for waived charges
pub fn validate_price(price: Money, mode: ValidationMode) -> ValidationResult<()> {
    within_magnitude("price", price.amount(), Decimal::from(MAX_AMOUNT))?;
    if mode.is_strict() {
        must_not_be_negative("price", price.amount())?;
    }
    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - At most [`MAX_QUANTITY`] either side of zero (all modes)
/// - Must be positive (strict); fractional values are fine
pub fn validate_quantity(quantity: Quantity, mode: ValidationMode) -> ValidationResult<()> {
    within_magnitude("quantity", quantity.value(), Decimal::from(MAX_QUANTITY))?;
    if mode.is_strict() {
        must_be_positive("quantity", quantity.value())?;
    }
    Ok(())
}

/// Validates a forex rate.
///
/// ## Rules
/// - At most [`MAX_FOREX_RATE`] either side of zero (all modes)
/// - Must be positive (strict)
/// - A line priced in the base currency must use the identity rate
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User picks USD and types forex rate 58.0                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_forex_rate(USD, 58.0) ← THIS FUNCTION                         │
/// │       │                                                                 │
/// │       ├── rate <= 0?            → "forex_rate must be positive"        │
/// │       │                                                                 │
/// │       ├── PHP line, rate != 1?  → "forex_rate must be between 1 and 1" │
/// │       │                                                                 │
/// │       └── OK → amount = price × quantity × 58.0                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_forex_rate(
    currency: Currency,
    rate: ForexRate,
    mode: ValidationMode,
) -> ValidationResult<()> {
    within_magnitude("forex_rate", rate.value(), Decimal::from(MAX_FOREX_RATE))?;
    if !mode.is_strict() {
        return Ok(());
    }

    must_be_positive("forex_rate", rate.value())?;

    if currency == crate::BASE_CURRENCY && !rate.is_identity() {
        return Err(ValidationError::OutOfRange {
            field: "forex_rate".to_string(),
            min: "1".to_string(),
            max: "1".to_string(),
            value: rate.to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate fraction.
///
/// ## Rules
/// - At most [`MAX_TAX_RATE_BPS`] either side of zero (all modes)
/// - Must be between 0 and 1, i.e. 0% to 100% (strict)
///
/// A value like `12` almost always means someone passed the UI
/// percentage without dividing by 100.
pub fn validate_tax_rate(rate: TaxRate, mode: ValidationMode) -> ValidationResult<()> {
    let limit = TaxRate::from_bps(MAX_TAX_RATE_BPS).fraction().normalize();
    within_magnitude("tax_rate", rate.fraction(), limit)?;
    if mode.is_strict() && (rate.fraction() < Decimal::ZERO || rate.fraction() > Decimal::ONE) {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
            value: rate.fraction().to_string(),
        });
    }
    Ok(())
}

/// Validates the flat other-charges amount.
///
/// ## Rules
/// - At most [`MAX_AMOUNT`] either side of zero (all modes)
/// - Must be non-negative (strict)
pub fn validate_other_charges(amount: Money, mode: ValidationMode) -> ValidationResult<()> {
    within_magnitude("other_charges", amount.amount(), Decimal::from(MAX_AMOUNT))?;
    if mode.is_strict() {
        must_not_be_negative("other_charges", amount.amount())?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const STRICT: ValidationMode = ValidationMode::Strict;
    const PERMISSIVE: ValidationMode = ValidationMode::Permissive;

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Ocean freight").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"A".repeat(201)).is_err());
        assert!(validate_description(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_remarks() {
        assert!(validate_remarks("").is_ok());
        assert!(validate_remarks("Subject to space availability").is_ok());
        assert!(validate_remarks(&"r".repeat(501)).is_err());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("Brokerage").is_ok());
        assert_eq!(
            validate_category_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero(), STRICT).is_ok());
        assert!(validate_price(Money::from_units(5000), STRICT).is_ok());
        assert!(validate_price(Money::from_units(-1), STRICT).is_err());
        assert!(validate_price(Money::from_units(-1), PERMISSIVE).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::new(dec!(0.5)), STRICT).is_ok());
        assert!(validate_quantity(Quantity::from_units(0), STRICT).is_err());
        assert!(validate_quantity(Quantity::from_units(-2), STRICT).is_err());
        assert!(validate_quantity(Quantity::from_units(0), PERMISSIVE).is_ok());
    }

    #[test]
    fn test_validate_forex_rate() {
        let usd_rate = ForexRate::new(dec!(58.0));
        assert!(validate_forex_rate(Currency::Usd, usd_rate, STRICT).is_ok());
        assert!(validate_forex_rate(Currency::Php, ForexRate::identity(), STRICT).is_ok());

        assert!(validate_forex_rate(Currency::Usd, ForexRate::new(dec!(0)), STRICT).is_err());
        assert!(validate_forex_rate(Currency::Usd, ForexRate::new(dec!(-58)), STRICT).is_err());
        assert!(validate_forex_rate(Currency::Php, usd_rate, STRICT).is_err());

        assert!(validate_forex_rate(Currency::Php, ForexRate::new(dec!(0)), PERMISSIVE).is_ok());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::zero(), STRICT).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(1200), STRICT).is_ok());
        assert!(validate_tax_rate(TaxRate::from_fraction(dec!(1)), STRICT).is_ok());

        // 12 instead of 0.12
        assert!(validate_tax_rate(TaxRate::from_fraction(dec!(12)), STRICT).is_err());
        assert!(validate_tax_rate(TaxRate::from_fraction(dec!(-0.01)), STRICT).is_err());
        assert!(validate_tax_rate(TaxRate::from_fraction(dec!(12)), PERMISSIVE).is_ok());
    }

    #[test]
    fn test_validate_other_charges() {
        assert!(validate_other_charges(Money::from_units(250), STRICT).is_ok());
        assert!(validate_other_charges(Money::from_units(-250), STRICT).is_err());
        assert!(validate_other_charges(Money::from_units(-250), PERMISSIVE).is_ok());
    }

    #[test]
    fn test_magnitude_limits_apply_in_every_mode() {
        for mode in [STRICT, PERMISSIVE] {
            assert!(validate_price(Money::from_units(MAX_AMOUNT), mode).is_ok());
            assert!(validate_price(Money::from_units(MAX_AMOUNT + 1), mode).is_err());
            assert!(validate_price(Money::from_decimal(Decimal::MAX), mode).is_err());

            assert!(validate_quantity(Quantity::from_units(MAX_QUANTITY), mode).is_ok());
            assert!(validate_quantity(Quantity::new(Decimal::MAX), mode).is_err());

            let too_big = ForexRate::new(Decimal::from(MAX_FOREX_RATE + 1));
            assert!(validate_forex_rate(Currency::Usd, too_big, mode).is_err());

            assert!(validate_tax_rate(TaxRate::from_fraction(Decimal::MAX), mode).is_err());
            assert!(validate_other_charges(Money::from_decimal(Decimal::MIN), mode).is_err());
        }

        // Permissive keeps negatives that stay inside the limit
        assert!(validate_price(Money::from_units(-MAX_AMOUNT), PERMISSIVE).is_ok());
        assert!(validate_price(Money::from_units(-MAX_AMOUNT - 1), PERMISSIVE).is_err());
        assert!(validate_tax_rate(TaxRate::from_fraction(dec!(100)), PERMISSIVE).is_ok());
        assert!(validate_tax_rate(TaxRate::from_fraction(dec!(-100.01)), PERMISSIVE).is_err());
    }

    #[test]
    fn test_magnitude_error_names_the_limit() {
        let err = validate_price(Money::from_units(MAX_AMOUNT + 1), PERMISSIVE).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "price".to_string(),
                min: "-1000000000000".to_string(),
                max: "1000000000000".to_string(),
                value: "1000000000001".to_string(),
            }
        );
    }

    #[test]
    fn test_validation_mode_parsing() {
        assert_eq!("strict".parse::<ValidationMode>().unwrap(), STRICT);
        assert_eq!("Permissive".parse::<ValidationMode>().unwrap(), PERMISSIVE);
        assert!("loose".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::default(), STRICT);
        assert_eq!(PERMISSIVE.to_string(), "permissive");
    }
}
