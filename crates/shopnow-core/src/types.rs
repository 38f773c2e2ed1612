//! # Domain Types
//!
//! The records the cart is built from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │    CartLine     │                        │
//! │  │  ─────────────  │ 1    1 │  ─────────────  │                        │
//! │  │  id             │◄───────┤  product        │                        │
//! │  │  name           │        │  quantity ≥ 1   │                        │
//! │  │  price          │        └─────────────────┘                        │
//! │  │  original_price │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Products are owned by the catalog; the cart keeps its own copy so a   │
//! │  snapshot renders the same way for as long as it lives.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{
    validate_amount, validate_product_id, validate_product_name, ValidationResult,
};

// =============================================================================
// Product Id
// =============================================================================

/// Stable unique identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

/// Numeric catalog ids (`1`, `2`, ...) become their decimal string.
impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id.to_string())
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as supplied by the external catalog.
///
/// The core only relies on `id` and `price`; `name` and `original_price`
/// travel along for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Current selling price.
    pub price: Money,

    /// Pre-markdown price, shown struck through on product cards.
    pub original_price: Option<Money>,
}

impl Product {
    /// Creates a validated product without a markdown.
    ///
    /// ## Example
    /// ```rust
    /// use shopnow_core::{Money, Product};
    ///
    /// let wallet = Product::new("3", "Leather Wallet", Money::from_cents(4999)).unwrap();
    /// assert_eq!(wallet.id, "3");
    ///
    /// assert!(Product::new("4", "Broken", Money::from_cents(-1)).is_err());
    /// ```
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
    ) -> ValidationResult<Self> {
        let product = Product {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
        };
        product.validate()?;
        Ok(product)
    }

    /// Attaches the pre-markdown price.
    pub fn with_original_price(mut self, original_price: Money) -> ValidationResult<Self> {
        validate_amount("original price", original_price)?;
        self.original_price = Some(original_price);
        Ok(self)
    }

    /// Checks the fields the core depends on.
    ///
    /// Fields are public (the catalog owns this record), so the Cart Store
    /// re-checks every product it is handed.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_id(self.id.as_str())?;
        validate_product_name(&self.name)?;
        validate_amount("price", self.price)?;
        if let Some(original) = self.original_price {
            validate_amount("original price", original)?;
        }
        Ok(())
    }

    /// Amount saved versus the original price, if the product is marked down.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }

    /// Markdown as a whole percentage of the original price.
    ///
    /// ## Example
    /// ```rust
    /// use shopnow_core::{Money, Product};
    ///
    /// let headphones = Product::new("1", "Wireless Headphones", Money::from_cents(9999))
    ///     .unwrap()
    ///     .with_original_price(Money::from_cents(12999))
    ///     .unwrap();
    ///
    /// // $30.00 off $129.99 = 23.08% → 23
    /// assert_eq!(headphones.discount_percentage(), Some(23));
    /// ```
    pub fn discount_percentage(&self) -> Option<u32> {
        let savings = self.savings()?;
        let original = self.original_price?;
        if original.is_zero() {
            return None;
        }
        let percent = savings.amount() * Decimal::ONE_HUNDRED / original.amount();
        percent
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart with its quantity.
///
/// ## Invariants
/// - `quantity >= 1` (a line that would drop to zero is removed instead)
/// - Only the Cart Store constructs or changes lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    product: Product,
    quantity: i64,
}

impl CartLine {
    pub(crate) fn new(product: Product, quantity: i64) -> Self {
        debug_assert!(quantity >= 1, "cart line quantity must be at least 1");
        CartLine { product, quantity }
    }

    pub(crate) fn with_quantity(&self, quantity: i64) -> Self {
        CartLine::new(self.product.clone(), quantity)
    }

    /// The product this line refers to.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Shorthand for `self.product().id`.
    #[inline]
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Number of units, always at least one.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
