//! # freightdesk-core: Quotation Calculation Engine
//!
//! This crate turns the charge rows of a freight quotation into category
//! subtotals and a taxed / non-taxed financial summary. It contains pure
//! functions and plain values only, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      FreightDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Back-office UI (React quotation builder)           │   │
//! │  │   Category panels ──► Charge rows ──► Totals panel ──► Export   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs generated types)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            freightdesk-cli / any other host                     │   │
//! │  │   config, logging, reading and writing quotation documents      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ freightdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌───────────┐ ┌──────────┐ ┌──────────┐ ┌───────────────────┐ │   │
//! │  │  │ line_item │ │ category │ │ summary  │ │ quotation (draft) │ │   │
//! │  │  │  amount   │ │ subtotal │ │ tax, GT  │ │  add/update/del   │ │   │
//! │  │  └───────────┘ └──────────┘ └──────────┘ └───────────────────┘ │   │
//! │  │  money · types · validation · id · format                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Fixed-point `Money` type
//! - [`types`] - `Currency`, `TaxRate`, `ForexRate`, `Quantity`
//! - [`line_item`] - Line amount formula, `LineItemDraft` → `LineItem`
//! - [`category`] - Category subtotal
//! - [`summary`] - Taxed / non-taxed financial summary
//! - [`quotation`] - `QuotationDraft`, the editable container
//! - [`validation`] - Permissive / strict input checks
//! - [`id`] - Identifier generation
//! - [`format`] - Display formatting
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe on every keystroke
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: no floats anywhere in the arithmetic
//! 4. **Derived Fields Can't Go Stale**: amounts and subtotals have no setters
//!
//! ## Example Usage
//!
//! ```rust
//! use freightdesk_core::line_item::LineItemDraft;
//! use freightdesk_core::quotation::QuotationDraft;
//! use freightdesk_core::validation::ValidationMode;
//! use freightdesk_core::{Money, Quantity, TaxRate};
//!
//! let mut quote = QuotationDraft::new(ValidationMode::Strict);
//! quote.set_tax_rate(TaxRate::from_bps(1200)).unwrap(); // 12% VAT
//!
//! let brokerage = quote.add_category("Brokerage").unwrap();
//! let fee = LineItemDraft::new("Processing fee", Money::from_units(1000), Quantity::from_units(1));
//! quote.add_line_item(&brokerage, fee.taxed()).unwrap();
//!
//! let summary = quote.summary();
//! assert_eq!(summary.tax_amount, Money::from_units(120));
//! assert_eq!(summary.grand_total, Money::from_units(1120));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod format;
pub mod id;
pub mod line_item;
pub mod money;
pub mod quotation;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use category::{compute_subtotal, ChargeCategory};
pub use error::{CoreError, CoreResult, ValidationError};
pub use id::generate_id;
pub use line_item::{checked_amount, compute_amount, LineItem, LineItemDraft};
pub use money::Money;
pub use quotation::QuotationDraft;
pub use summary::{compute_summary, FinancialSummary};
pub use types::*;
pub use validation::ValidationMode;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency every quotation total is expressed in.
pub const BASE_CURRENCY: Currency = Currency::Php;

/// Default VAT in basis points (12% Philippine VAT).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1200;

/// Maximum charge categories in a single quotation.
///
/// ## Business Reason
/// Real quotations carry a handful of categories; a runaway import
/// should fail loudly instead of producing a 10,000-section document.
pub const MAX_CATEGORIES: usize = 50;

/// Maximum line items in a single category.
pub const MAX_LINE_ITEMS_PER_CATEGORY: usize = 200;

/// Maximum length of a line item description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Maximum length of line item remarks.
pub const MAX_REMARKS_LEN: usize = 500;

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

// =============================================================================
// Numeric Limits (checked in every validation mode)
// =============================================================================
//
// ┌─────────────────────────────────────────────────────────────────────────┐
// │  Headroom against Decimal::MAX (≈ 7.9 × 10^28)                          │
// │                                                                         │
// │  one line      MAX_AMOUNT × MAX_QUANTITY × MAX_FOREX_RATE  = 10^22      │
// │  all lines     × MAX_CATEGORIES × MAX_LINE_ITEMS_PER_CATEGORY = 10^26   │
// │  tax           × MAX_TAX_RATE_BPS (10,000%)                = 10^28      │
// │  grand total   lines + tax + MAX_AMOUNT other charges      < 2 × 10^28  │
// └─────────────────────────────────────────────────────────────────────────┘

/// Largest magnitude of a unit price or of the other charges (10^12).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest magnitude of a line quantity.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Largest magnitude of a forex rate.
pub const MAX_FOREX_RATE: i64 = 10_000;

/// Largest magnitude of a tax rate in basis points (10,000%).
///
/// Strict mode narrows this to `[0, 100%]`.
pub const MAX_TAX_RATE_BPS: u32 = 1_000_000;
