//! # Config Commands
//!
//! Read-only view of the session's configuration.

use rust_decimal::Decimal;
use serde::Serialize;
use shopnow_core::{Money, PricingPolicy};
use tracing::debug;

use crate::state::AppConfig;

/// Configuration as the presentation layer needs it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub currency_symbol: String,
    /// Tax as a percentage, e.g. `"8.5"`.
    pub tax_rate_percent: Decimal,
    pub free_shipping_threshold: Money,
    pub flat_shipping: Money,
    pub policy: PricingPolicy,
}

/// Gets the current application configuration.
///
/// ## When Used
/// - Session startup (to label tax and shipping rows)
/// - Currency formatting
pub fn get_config(config: &AppConfig) -> ConfigResponse {
    debug!("get_config command");
    let policy = config.policy();
    ConfigResponse {
        currency_symbol: config.currency_symbol.clone(),
        tax_rate_percent: policy.tax_rate.percentage(),
        free_shipping_threshold: policy.free_shipping_threshold,
        flat_shipping: policy.flat_shipping,
        policy: policy.clone(),
    }
}
