//! # Domain Types
//!
//! Numeric newtypes and the currency enumeration used by quotations.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Currency     │   │   ForexRate     │   │    Quantity     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  USD  PHP       │   │  line currency  │   │  units, CBM,    │       │
//! │  │  EUR  CNY       │   │  → PHP (base)   │   │  kg (decimal)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    TaxRate      │   Stored as a FRACTION (0.12).                     │
//! │  │  ─────────────  │   UI input is a percentage (12);                   │
//! │  │  fraction       │   use TaxRate::from_percentage at the boundary.    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Currency
// =============================================================================

/// Currencies a line item price can be denominated in.
///
/// The calculation engine never looks at the currency itself; it only
/// consumes the line's [`ForexRate`]. The enumeration exists for the
/// quotation builder's dropdown and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Currency {
    /// US Dollar.
    Usd,
    /// Philippine Peso, the quotation base currency.
    #[default]
    Php,
    /// Euro.
    Eur,
    /// Chinese Yuan Renminbi.
    Cny,
}

impl Currency {
    /// Every supported currency, in dropdown order.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Php, Currency::Eur, Currency::Cny];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Php => "PHP",
            Currency::Eur => "EUR",
            Currency::Cny => "CNY",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Php => "₱",
            Currency::Eur => "€",
            Currency::Cny => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            })
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a decimal fraction (0.12 = 12%).
///
/// ## Why a Fraction?
/// The summary multiplies the taxed subtotal by the rate directly.
/// Storing the fraction keeps that a single multiplication; the
/// percentage form only exists at the UI boundary.
///
/// The rate is NOT clamped. Strict validation rejects values outside
/// `[0, 1]`; permissive mode lets them through up to
/// [`crate::MAX_TAX_RATE_BPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a fraction (0.12 for 12%).
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        TaxRate(fraction)
    }

    /// Creates a tax rate from a percentage (12 for 12%).
    ///
    /// ## Example
    /// ```rust
    /// use freightdesk_core::types::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// let vat = TaxRate::from_percentage(Decimal::from(12));
    /// assert_eq!(vat, TaxRate::from_bps(1200));
    /// ```
    pub fn from_percentage(pct: Decimal) -> Self {
        TaxRate(pct / Decimal::ONE_HUNDRED)
    }

    /// Creates a tax rate from basis points (1200 = 12%).
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 4))
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    pub fn percentage(&self) -> Decimal {
        self.0.saturating_mul(Decimal::ONE_HUNDRED).normalize()
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Renders as a percentage: `12%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Forex Rate
// =============================================================================

/// Multiplier converting a line's currency into the base currency.
///
/// A USD line in a PHP quotation might carry `58.0`. A PHP line carries
/// the identity rate `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForexRate(#[ts(type = "string")] Decimal);

impl ForexRate {
    /// Creates a forex rate.
    #[inline]
    pub const fn new(rate: Decimal) -> Self {
        ForexRate(rate)
    }

    /// The rate for a line already in the base currency.
    #[inline]
    pub const fn identity() -> Self {
        ForexRate(Decimal::ONE)
    }

    /// Returns the multiplier.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if this is the identity rate.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.0 == Decimal::ONE
    }
}

impl Default for ForexRate {
    fn default() -> Self {
        ForexRate::identity()
    }
}

impl fmt::Display for ForexRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Number of billable units on a line.
///
/// Decimal because freight is billed per CBM, per kg, or per
/// fraction of a container as often as per whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(#[ts(type = "string")] Decimal);

impl Quantity {
    /// Creates a quantity from a decimal.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Quantity(value)
    }

    /// Creates a quantity of whole units.
    #[inline]
    pub fn from_units(units: i64) -> Self {
        Quantity(Decimal::from(units))
    }

    /// Returns the quantity as a decimal.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity(Decimal::ONE)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
