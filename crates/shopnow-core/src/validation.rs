//! # Validation Module
//!
//! Contract checks for data entering the core from outside.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  ├── Trims the discount code the shopper typed                         │
//! │  └── Disables "-" below quantity 1                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product records from the catalog (id, name, price)                │
//! │  └── Pricing policy from configuration (rates, fees, code table)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart Store                                                   │
//! │  └── Quantity ≥ 1 and one line per product, enforced on every write    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopnow_core::money::Money;
//! use shopnow_core::validation::{validate_non_negative, validate_product_id};
//!
//! assert!(validate_product_id("42").is_ok());
//! assert!(validate_non_negative("price", Money::from_cents(-1)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::{Money, MAX_AMOUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::OutOfRange {
            field: "name length".to_string(),
            min: "1".to_string(),
            max: "200".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount code identifier (`WELCOME10`, `SAVE20`, ...).
///
/// ## Rules
/// - Must not be empty
/// - Letters and digits only, so case-folding is unambiguous
pub fn validate_code_identifier(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "discount code".to_string(),
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "discount code".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a monetary amount is zero or more.
///
/// ## Example
/// ```rust
/// use shopnow_core::money::Money;
/// use shopnow_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("price", Money::from_cents(9999)).is_ok());
/// assert!(validate_non_negative("price", Money::zero()).is_ok()); // Free item
/// assert!(validate_non_negative("price", Money::from_cents(-100)).is_err());
/// ```
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a price or fee: zero or more and at most [`MAX_AMOUNT`].
///
/// ## Example
/// ```rust
/// use shopnow_core::money::{Money, MAX_AMOUNT};
/// use shopnow_core::validation::validate_amount;
///
/// assert!(validate_amount("price", Money::from_cents(9999)).is_ok());
/// assert!(validate_amount("price", MAX_AMOUNT).is_ok());
/// assert!(validate_amount("price", MAX_AMOUNT + Money::from_cents(1)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    validate_non_negative(field, amount)?;

    if amount > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: MAX_AMOUNT.amount().to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage on the 0-100 scale.
pub fn validate_percentage(field: &str, percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

/// Validates a fractional rate (0.085 = 8.5%).
///
/// ## Rules
/// - Must be between 0 and 1 inclusive
pub fn validate_rate(field: &str, rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("1").is_ok());
        assert!(validate_product_id("sku-42").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Wireless Headphones").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_code_identifier() {
        assert!(validate_code_identifier("WELCOME10").is_ok());
        assert!(validate_code_identifier("").is_err());
        assert!(validate_code_identifier("SAVE 20").is_err());
        assert!(validate_code_identifier("FLAT-50").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("price", Money::zero()).is_ok());
        assert_eq!(
            validate_non_negative("price", Money::from_cents(-1)),
            Err(ValidationError::MustNotBeNegative {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_amount_upper_bound() {
        assert!(validate_amount("price", Money::from_cents(4999)).is_ok());
        assert!(validate_amount("price", MAX_AMOUNT).is_ok());
        assert!(matches!(
            validate_amount("price", MAX_AMOUNT + Money::from_cents(1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_amount("price", Money::from_cents(-1)),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("pct", Decimal::ZERO).is_ok());
        assert!(validate_percentage("pct", Decimal::from(100)).is_ok());
        assert!(validate_percentage("pct", Decimal::from(101)).is_err());
        assert!(validate_percentage("pct", Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("tax", Decimal::from_str("0.085").unwrap()).is_ok());
        assert!(validate_rate("tax", Decimal::ONE).is_ok());
        assert!(validate_rate("tax", Decimal::from_str("1.5").unwrap()).is_err());
        assert!(validate_rate("tax", Decimal::from_str("-0.01").unwrap()).is_err());
    }
}
