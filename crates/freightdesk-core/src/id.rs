//! # Identifier Generation
//!
//! Ids for newly created quotations, categories, and line items.
//!
//! Format: `{prefix}_{uuid-v7}`, e.g. `line_01929f3a-7c1e-7b30-9d2f-4a1c0e5b8f21`.
//! A v7 UUID is a 48-bit millisecond timestamp followed by random bits,
//! so ids created later sort later. The exact string shape is not a
//! contract; callers treat ids as opaque.

use uuid::Uuid;

/// Prefix for quotation ids.
pub const QUOTATION_ID_PREFIX: &str = "quote";

/// Prefix for charge category ids.
pub const CATEGORY_ID_PREFIX: &str = "cat";

/// Prefix for line item ids.
pub const LINE_ITEM_ID_PREFIX: &str = "line";

/// Generates a new id with the given prefix.
///
/// ## Example
/// ```rust
/// use freightdesk_core::id::generate_id;
///
/// let id = generate_id("line");
/// assert!(id.starts_with("line_"));
/// assert_ne!(id, generate_id("line"));
/// ```
pub fn generate_id(prefix: &str) -> String {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Uuid::now_v7().to_string();
    }
    format!("{}_{}", prefix, Uuid::now_v7())
}
