//! # Error Types
//!
//! Domain-specific error types for shopnow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopnow-core errors (this file)                                       │
//! │  ├── CoreError        - Cart contract violations                       │
//! │  └── ValidationError  - Field-level rule failures                      │
//! │                                                                         │
//! │  App errors (apps/shopnow-cli)                                         │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  NOT an error: an unknown discount code. That is routine shopper       │
//! │  input and comes back as a `DiscountOutcome` with `success: false`.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Contract violations raised by the Cart Store.
///
/// These indicate a defect in the caller (a UI passing `0` to `add_item`, a
/// catalog handing over a negative price). They are returned immediately and
/// leave the cart untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `add_item` was called with a quantity below one.
    #[error("Quantity must be at least 1, got {requested}")]
    NonPositiveQuantity { requested: i64 },

    /// Adding would overflow the line's quantity counter.
    #[error("Quantity for product {product_id} would overflow")]
    QuantityOverflow { product_id: String },

    /// The quantities across all lines would no longer fit in an `i64`.
    #[error("Total item count would overflow")]
    ItemCountOverflow,

    /// The cart subtotal would exceed the largest amount the core prices.
    #[error("Cart subtotal would exceed {max}")]
    SubtotalTooLarge { max: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for products handed in by the catalog and for pricing policies
/// loaded from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Invalid format (e.g., unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same discount code listed twice).
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
