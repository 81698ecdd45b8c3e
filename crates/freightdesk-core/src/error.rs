//! # Error Types
//!
//! Domain-specific error types for freightdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  freightdesk-core errors (this file)                                   │
//! │  ├── CoreError        - Quotation draft operation failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  CLI errors (apps/freightdesk-cli)                                     │
//! │  └── CliError         - Config, file, and JSON failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit status            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation functions themselves (`compute_amount`,
//! `compute_subtotal`, `compute_summary`) never fail. Errors only arise
//! when input enters a [`crate::quotation::QuotationDraft`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quotation draft operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No category with this id exists in the draft.
    #[error("Charge category not found: {0}")]
    CategoryNotFound(String),

    /// No line item with this id exists in the category.
    #[error("Line item {line_item_id} not found in category {category_id}")]
    LineItemNotFound {
        category_id: String,
        line_item_id: String,
    },

    /// Draft has reached the maximum number of categories.
    #[error("Quotation cannot have more than {max} charge categories")]
    TooManyCategories { max: usize },

    /// Category has reached the maximum number of line items.
    #[error("Category {category_id} cannot have more than {max} line items")]
    TooManyLineItems { category_id: String, max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names the offending field so the quotation builder can
/// highlight it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        value: String,
    },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative, got {value}")]
    MustNotBeNegative { field: String, value: String },

    /// Invalid format (e.g., unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two categories named "Brokerage").
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
