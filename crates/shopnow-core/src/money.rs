//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents fix addition but not percentages:                        │
//! │    20% of $199.97 = $39.994  → 3999.4 cents, not representable          │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    Every intermediate value is exact (39.994, 13.59796, ...)            │
//! │    Rounding to cents happens once, for display only                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopnow_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(4999); // $49.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // $99.98
//! let total = price + Money::from_cents(500);   // $54.99
//! assert_eq!(doubled, Money::from_cents(9998));
//! assert_eq!(total.to_string(), "$54.99");
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(49.99); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of decimal places shown to shoppers.
pub const DISPLAY_SCALE: u32 = 2;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest price, fee or cart subtotal the core accepts: 10^24.
///
/// Every pricing step stays far inside `Decimal`'s range (about 7.9 × 10^28)
/// below this bound, including the ×100 inside [`Money::percent_of`].
pub const MAX_AMOUNT: Money =
    Money::from_decimal(Decimal::from_parts(2_701_131_776, 466_537_709, 54_210, false, 0));

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact decimal amount of dollars.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Exact base-10 values; negatives are allowed as
///   intermediate results but never stored on a product or summary
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Unrounded**: Sub-cent precision is kept until [`Money::rounded`]
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.line_total ──► OrderSummary.subtotal
///                                                │
///                     discount ─► shipping ─► tax ─► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopnow_core::money::Money;
    ///
    /// let price = Money::from_cents(9999); // Represents $99.99
    /// assert_eq!(price.to_string(), "$99.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DISPLAY_SCALE))
    }

    /// Wraps an exact decimal amount of dollars.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact, unrounded amount.
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `self`, or zero when `self` is negative.
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        self.max(Money::zero())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopnow_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4999); // $49.99
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total, Money::from_cents(9998)); // $99.98
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Like [`Money::multiply_quantity`], but `None` when the product leaves
    /// `Decimal`'s range.
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Checked addition. Returns `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Returns `percent`% of this amount, unrounded.
    ///
    /// `percent` is on the 0-100 scale: `percent_of(20)` is one fifth.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use shopnow_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(19997); // $199.97
    /// let off = subtotal.percent_of(Decimal::from(20));
    /// assert_eq!(off.amount().to_string(), "39.994");
    /// ```
    pub fn percent_of(&self, percent: Decimal) -> Money {
        Money(self.0 * percent / ONE_HUNDRED)
    }

    /// Multiplies by a fractional rate (0.085 = 8.5%), unrounded.
    pub fn times_rate(&self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }

    /// Rounds to whole cents using Bankers Rounding (round half to even).
    ///
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │    $0.125 → $0.12,  $0.135 → $0.14,  $39.994 → $39.99               │
    /// │                                                                     │
    /// │  Alternating halves prevents systematic drift over many orders     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Only presentation code should call this; the pricing engine keeps
    /// full precision.
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money rounded to cents, e.g. `$39.99` or `-$5.50`.
///
/// ## Note
/// Single-currency display only; localisation belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

/// Parses a plain decimal string such as `"49.99"`.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
