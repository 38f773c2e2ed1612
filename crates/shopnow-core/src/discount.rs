//! # Discount Codes
//!
//! Promotional codes a shopper can type at checkout, and the fixed table of
//! codes the store recognises.
//!
//! ## Code Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper types "save20"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DiscountTable::lookup("save20")  ← case-insensitive                    │
//! │       │                                                                 │
//! │       ├── miss → DiscountOutcome { success: false, .. }  (cart as-is)   │
//! │       │                                                                 │
//! │       └── hit  → CartState.applied_discount = SAVE20                    │
//! │                  DiscountOutcome { success: true, .. }                  │
//! │                                                                         │
//! │  clear() drops the discount along with the lines: a code belongs to   │
//! │  the order being built, not to the shopper.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_amount, validate_code_identifier, validate_percentage, ValidationResult,
};

// =============================================================================
// Discount Kind
// =============================================================================

/// How a discount's `amount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountKind {
    /// `amount` is a percentage of the subtotal (0-100).
    Percentage,
    /// `amount` is a flat dollar reduction, capped at the subtotal.
    Fixed,
}

// =============================================================================
// Discount Code
// =============================================================================

/// A promotional identifier mapping to a percentage or fixed reduction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountCode {
    /// Upper-case identifier, e.g. `SAVE20`.
    pub code: String,

    /// Percentage or fixed.
    pub kind: DiscountKind,

    /// Percent points for `Percentage`, dollars for `Fixed`.
    #[ts(type = "string")]
    pub amount: Decimal,
}

impl DiscountCode {
    /// A percentage-off code. `percent` is on the 0-100 scale.
    pub fn percentage(code: impl Into<String>, percent: Decimal) -> ValidationResult<Self> {
        let discount = DiscountCode {
            code: code.into().to_uppercase(),
            kind: DiscountKind::Percentage,
            amount: percent,
        };
        discount.validate()?;
        Ok(discount)
    }

    /// A fixed-amount-off code.
    pub fn fixed(code: impl Into<String>, amount: Money) -> ValidationResult<Self> {
        let discount = DiscountCode {
            code: code.into().to_uppercase(),
            kind: DiscountKind::Fixed,
            amount: amount.amount(),
        };
        discount.validate()?;
        Ok(discount)
    }

    /// Checks the identifier and the amount range for the kind.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_code_identifier(&self.code)?;
        if self.code != self.code.to_uppercase() {
            return Err(ValidationError::InvalidFormat {
                field: "discount code".to_string(),
                reason: "must be upper-case".to_string(),
            });
        }
        match self.kind {
            DiscountKind::Percentage => validate_percentage("discount percentage", self.amount),
            DiscountKind::Fixed => {
                validate_amount("discount amount", Money::from_decimal(self.amount))
            }
        }
    }

    /// Short human label, e.g. `"20% off"` or `"$50.00 off"`.
    pub fn label(&self) -> String {
        match self.kind {
            DiscountKind::Percentage => format!("{}% off", self.amount.normalize()),
            DiscountKind::Fixed => format!("{} off", Money::from_decimal(self.amount)),
        }
    }
}

// =============================================================================
// Discount Table
// =============================================================================

/// The fixed set of codes the store accepts.
///
/// Built once from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiscountTable {
    codes: Vec<DiscountCode>,
}

impl DiscountTable {
    /// Builds a table, rejecting invalid entries and duplicate identifiers.
    pub fn new(codes: Vec<DiscountCode>) -> ValidationResult<Self> {
        let mut seen = HashSet::new();
        for code in &codes {
            code.validate()?;
            if !seen.insert(code.code.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "discount code".to_string(),
                    value: code.code.clone(),
                });
            }
        }
        Ok(DiscountTable { codes })
    }

    /// The storefront's promotional codes.
    ///
    /// | Code      | Kind       | Amount |
    /// |-----------|------------|--------|
    /// | WELCOME10 | Percentage | 10     |
    /// | SAVE20    | Percentage | 20     |
    /// | FLAT50    | Fixed      | 50     |
    pub fn standard() -> Self {
        DiscountTable {
            codes: vec![
                DiscountCode {
                    code: "WELCOME10".to_string(),
                    kind: DiscountKind::Percentage,
                    amount: Decimal::from(10),
                },
                DiscountCode {
                    code: "SAVE20".to_string(),
                    kind: DiscountKind::Percentage,
                    amount: Decimal::from(20),
                },
                DiscountCode {
                    code: "FLAT50".to_string(),
                    kind: DiscountKind::Fixed,
                    amount: Decimal::from(50),
                },
            ],
        }
    }

    /// An empty table (every code is rejected).
    pub fn empty() -> Self {
        DiscountTable { codes: Vec::new() }
    }

    /// Case-insensitive lookup of a shopper-entered code.
    ///
    /// The input is not trimmed; stripping whitespace is the caller's job.
    ///
    /// ## Example
    /// ```rust
    /// use shopnow_core::DiscountTable;
    ///
    /// let table = DiscountTable::standard();
    /// assert!(table.lookup("save20").is_some());
    /// assert!(table.lookup("Save20").is_some());
    /// assert!(table.lookup(" SAVE20").is_none());
    /// ```
    pub fn lookup(&self, input: &str) -> Option<&DiscountCode> {
        let wanted = input.to_uppercase();
        self.codes.iter().find(|c| c.code == wanted)
    }

    /// Iterates the known codes in table order.
    pub fn iter(&self) -> impl Iterator<Item = &DiscountCode> {
        self.codes.iter()
    }

    /// Known code identifiers in table order.
    pub fn identifiers(&self) -> Vec<String> {
        self.codes.iter().map(|c| c.code.clone()).collect()
    }

    /// Number of known codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no code is accepted.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for DiscountTable {
    fn default() -> Self {
        DiscountTable::standard()
    }
}

// =============================================================================
// Discount Outcome
// =============================================================================

/// Result of trying a discount code.
///
/// Invalid codes are routine shopper input, so this is a plain value with a
/// message for inline display rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountOutcome {
    /// Whether the code was applied.
    pub success: bool,

    /// Message suitable for showing next to the code field.
    pub message: String,
}

impl DiscountOutcome {
    pub(crate) fn applied(entered: &str) -> Self {
        DiscountOutcome {
            success: true,
            message: format!("Discount code \"{}\" applied successfully!", entered),
        }
    }

    pub(crate) fn rejected() -> Self {
        DiscountOutcome {
            success: false,
            message: "Invalid discount code. Please try again.".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
