//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Quotations make it worse:                                              │
//! │    USD 19.99 × 3 units × 58.125 forex = many summed float errors        │
//! │                                                                         │
//! │  Integer cents don't fit either: forex rates and fractional             │
//! │  quantities (2.5 CBM) produce sub-cent intermediate values.             │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal (96-bit mantissa, base-10 scale)            │
//! │    100 × 3 × 58.0 = 17400.0 exactly                                     │
//! │    Rounding happens ONLY at display time                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use freightdesk_core::money::Money;
//!
//! // Create from cents or from a decimal string
//! let price = Money::from_cents(1099); // 10.99
//! let fee: Money = "250".parse().unwrap();
//!
//! // Arithmetic operations
//! let total = price + fee;
//! assert_eq!(total, Money::from_cents(26099));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{ForexRate, Quantity, TaxRate};

/// Number of decimal places shown to users.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value, stored as an exact base-10 decimal.
///
/// ## Design Decisions
/// - **Signed**: negative values flow through in permissive mode
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **No intrinsic rounding**: `price × quantity × forex` keeps full precision
/// - **Saturating arithmetic**: results clamp at `Decimal::MIN` / `Decimal::MAX`
///   instead of panicking; validated input stays far below either bound
/// - **Serializes as a string** (`"17400.0"`) so JSON consumers never parse floats
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.price ──► × quantity × forex ──► LineItem.amount             │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │                                  ChargeCategory.subtotal (Σ amount)     │
/// │                                                  │                      │
/// │  FinancialSummary: taxed / non-taxed ──► tax ──► + other charges       │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │                                             grand total                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Creates a Money value from an exact decimal.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Creates a Money value from cents (hundredths of the currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use freightdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_units(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the exact underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use freightdesk_core::money::Money;
    /// use freightdesk_core::types::Quantity;
    ///
    /// let unit_price = Money::from_units(500);
    /// let line = unit_price.multiply_quantity(Quantity::from_units(2));
    /// assert_eq!(line, Money::from_units(1000));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, quantity: Quantity) -> Self {
        Money(self.0.saturating_mul(quantity.value()))
    }

    /// Converts a foreign-currency value into the base currency.
    ///
    /// ## Example
    /// ```rust
    /// use freightdesk_core::money::Money;
    /// use freightdesk_core::types::ForexRate;
    /// use rust_decimal::Decimal;
    ///
    /// let usd = Money::from_units(300);
    /// let php = usd.convert(ForexRate::new(Decimal::new(580, 1))); // 58.0
    /// assert_eq!(php, Money::from_units(17400));
    /// ```
    #[inline]
    pub fn convert(&self, rate: ForexRate) -> Self {
        Money(self.0.saturating_mul(rate.value()))
    }

    /// Calculates tax on this amount.
    ///
    /// The result is exact; it is NOT rounded to cents. A 12% rate on
    /// 10.01 yields 1.2012, and only the display layer shows 1.20.
    ///
    /// ## User Workflow
    /// ```text
    /// Taxed subtotal: 1000.00
    ///      │
    ///      ▼
    /// calculate_tax(12%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: 120.00
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.fraction()))
    }

    /// Rounds to two decimal places using Bankers Rounding (half to even).
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Standard rounding always rounds .005 UP, causing systematic bias. │
    /// │  Bankers Rounding rounds to the nearest EVEN cent:                 │
    /// │    0.125 → 0.12, 0.135 → 0.14                                       │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Only call this for presentation. Sums must be taken over the
    /// unrounded values.
    pub fn round_for_display(&self) -> Money {
        let rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointNearestEven);
        if rounded.is_zero() {
            // round_dp keeps the sign of tiny negatives (-0.001 → -0.00)
            return Money::zero();
        }
        Money(rounded)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the value rounded to two decimals without a currency symbol.
///
/// ## Note
/// Use [`crate::format::format_amount`] for user-facing strings.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.round_for_display().0;
        value.rescale(DISPLAY_DECIMALS);
        write!(f, "{}", value)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        Decimal::from_str(&cleaned)
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
