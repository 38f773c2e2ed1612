//! # Configuration State
//!
//! Stores the pricing policy and display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPNOW_*`)
//! 2. Defaults (the standard ShopNow policy)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use shopnow_core::{Money, PricingPolicy, TaxRate, ValidationError};
use tracing::warn;

/// Tax rate override, as a percentage (e.g. `"8.5"`).
pub const ENV_TAX_RATE: &str = "SHOPNOW_TAX_RATE";
/// Free-shipping threshold override, in dollars (e.g. `"100.00"`).
pub const ENV_FREE_SHIPPING_THRESHOLD: &str = "SHOPNOW_FREE_SHIPPING_THRESHOLD";
/// Flat shipping fee override, in dollars (e.g. `"9.99"`).
pub const ENV_FLAT_SHIPPING: &str = "SHOPNOW_FLAT_SHIPPING";
/// Currency symbol used when formatting amounts.
pub const ENV_CURRENCY_SYMBOL: &str = "SHOPNOW_CURRENCY_SYMBOL";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Pricing rules every cart in this session is priced against
    pub policy: PricingPolicy,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Currency: `$`
    /// - Policy: 8.5% tax, free shipping from $100.00, $9.99 flat fee,
    ///   codes WELCOME10 / SAVE20 / FLAT50
    fn default() -> Self {
        AppConfig {
            currency_symbol: "$".to_string(),
            policy: PricingPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPNOW_TAX_RATE`: percentage, e.g. "8.5"
    /// - `SHOPNOW_FREE_SHIPPING_THRESHOLD`: dollars, e.g. "75"
    /// - `SHOPNOW_FLAT_SHIPPING`: dollars, e.g. "4.99"
    /// - `SHOPNOW_CURRENCY_SYMBOL`: e.g. "€"
    ///
    /// Unparsable values are logged and ignored. Values that parse but make
    /// the policy inconsistent (negative fees, rate above 100%) are returned
    /// as an error so startup can abort.
    pub fn from_env() -> Result<Self, ValidationError> {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            config.currency_symbol = symbol;
        }

        if let Some(percent) = parse_env::<Decimal>(&lookup, ENV_TAX_RATE) {
            config.policy.tax_rate = TaxRate::from_fraction(percent / Decimal::ONE_HUNDRED);
        }

        if let Some(threshold) = parse_env::<Money>(&lookup, ENV_FREE_SHIPPING_THRESHOLD) {
            config.policy.free_shipping_threshold = threshold;
        }

        if let Some(fee) = parse_env::<Money>(&lookup, ENV_FLAT_SHIPPING) {
            config.policy.flat_shipping = fee;
        }

        config.policy.validate()?;
        Ok(config)
    }

    /// The pricing policy carts are created with.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Formats an amount as a currency string, rounded to cents.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let rounded = amount.rounded();
        let sign = if rounded.is_negative() { "-" } else { "" };
        format!(
            "{}{}{:.2}",
            sign,
            self.currency_symbol,
            rounded.amount().abs()
        )
    }
}

fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring unparsable config value");
            None
        }
    }
}
