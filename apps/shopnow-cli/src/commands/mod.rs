//! # Commands Module
//!
//! Every command the session accepts, one per input line.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing + dispatch)
//! ├── catalog.rs  ◄─── Product listing
//! ├── cart.rs     ◄─── Cart manipulation, discounts, totals
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin: "add 3 2"                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command::parse ──► Command::Add { product_id: "3", quantity: Some(2) } │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&state, command)                                              │
//! │         │   cart::add_to_cart(&state.cart, &state.config, ..)           │
//! │         ▼                                                               │
//! │  Result<serde_json::Value, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stdout: {"ok":{"lines":[...],"summary":{...}}}                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod config;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ErrorCode};
use crate::state::{CatalogProvider, SessionState};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Catalog,
    Product { product_id: String },
    Add { product_id: String, quantity: Option<i64> },
    Remove { product_id: String },
    SetQuantity { product_id: String, quantity: i64 },
    Clear,
    ApplyCode { code: String },
    RemoveCode,
    Cart,
    Summary,
    Codes,
    Config,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    ///
    /// ## Grammar
    /// ```text
    /// catalog | product <id>
    /// add <id> [qty] | remove <id> | qty <id> <n> | clear
    /// code <CODE> | uncode
    /// cart | summary | codes | config | quit
    /// ```
    pub fn parse(line: &str) -> Result<Option<Command>, ApiError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("catalog", []) => Command::Catalog,
            ("product", [id]) => Command::Product {
                product_id: id.to_string(),
            },
            ("add", [id]) => Command::Add {
                product_id: id.to_string(),
                quantity: None,
            },
            ("add", [id, qty]) => Command::Add {
                product_id: id.to_string(),
                quantity: Some(parse_quantity(qty)?),
            },
            ("remove", [id]) => Command::Remove {
                product_id: id.to_string(),
            },
            ("qty", [id, qty]) => Command::SetQuantity {
                product_id: id.to_string(),
                quantity: parse_quantity(qty)?,
            },
            ("clear", []) => Command::Clear,
            ("code", [code]) => Command::ApplyCode {
                code: code.to_string(),
            },
            ("uncode", []) => Command::RemoveCode,
            ("cart", []) => Command::Cart,
            ("summary", []) => Command::Summary,
            ("codes", []) => Command::Codes,
            ("config", []) => Command::Config,
            ("quit" | "exit", []) => Command::Quit,
            (
                "catalog" | "product" | "add" | "remove" | "qty" | "clear" | "code" | "uncode"
                | "cart" | "summary" | "codes" | "config" | "quit" | "exit",
                _,
            ) => {
                return Err(ApiError::validation(format!(
                    "wrong number of arguments for '{}'",
                    name
                )))
            }
            _ => {
                return Err(ApiError::new(
                    ErrorCode::UnknownCommand,
                    format!("unknown command: {}", name),
                ))
            }
        };

        Ok(Some(command))
    }
}

fn parse_quantity(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::validation(format!("quantity must be a whole number, got '{}'", raw)))
}

/// Runs a command against the session state.
///
/// `Quit` is handled by the session loop and answers with `null` here.
pub fn dispatch<C: CatalogProvider>(
    state: &SessionState<C>,
    command: Command,
) -> Result<Value, ApiError> {
    match command {
        Command::Catalog => to_value(catalog::list_products(&state.catalog, &state.cart)),
        Command::Product { product_id } => to_value(catalog::get_product(
            &state.catalog,
            &state.cart,
            &product_id,
        )?),
        Command::Add {
            product_id,
            quantity,
        } => to_value(cart::add_to_cart(
            &state.cart,
            &state.config,
            &state.catalog,
            &product_id,
            quantity,
        )?),
        Command::Remove { product_id } => to_value(cart::remove_from_cart(
            &state.cart,
            &state.config,
            &product_id,
        )),
        Command::SetQuantity {
            product_id,
            quantity,
        } => to_value(cart::update_cart_item(
            &state.cart,
            &state.config,
            &product_id,
            quantity,
        )?),
        Command::Clear => to_value(cart::clear_cart(&state.cart, &state.config)),
        Command::ApplyCode { code } => to_value(cart::apply_discount_code(
            &state.cart,
            &state.config,
            &code,
        )),
        Command::RemoveCode => to_value(cart::remove_discount(&state.cart, &state.config)),
        Command::Cart => to_value(cart::get_cart(&state.cart, &state.config)),
        Command::Summary => to_value(cart::get_summary(&state.cart, &state.config)),
        Command::Codes => to_value(cart::list_codes(&state.cart)),
        Command::Config => to_value(config::get_config(&state.config)),
        Command::Quit => Ok(Value::Null),
    }
}

fn to_value(response: impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(response)
        .map_err(|e| ApiError::internal(format!("could not encode response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppConfig, DemoCatalog, SessionCart};
    use shopnow_core::CartStore;

    fn session() -> SessionState<DemoCatalog> {
        SessionState {
            cart: SessionCart::new(CartStore::default()),
            config: AppConfig::default(),
            catalog: DemoCatalog::new().unwrap(),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("add 3").unwrap(),
            Some(Command::Add {
                product_id: "3".to_string(),
                quantity: None
            })
        );
        assert_eq!(
            Command::parse("ADD 3 2").unwrap(),
            Some(Command::Add {
                product_id: "3".to_string(),
                quantity: Some(2)
            })
        );
        assert_eq!(
            Command::parse("qty 1 -4").unwrap(),
            Some(Command::SetQuantity {
                product_id: "1".to_string(),
                quantity: -4
            })
        );
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_code_argument_keeps_case() {
        assert_eq!(
            Command::parse("code save20").unwrap(),
            Some(Command::ApplyCode {
                code: "save20".to_string()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = Command::parse("checkout").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);

        let err = Command::parse("add").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = Command::parse("add 1 two").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_dispatch_end_to_end() {
        let state = session();
        for line in ["add 2", "add 3 2", "add 1 2", "remove 1", "code SAVE20"] {
            let command = Command::parse(line).unwrap().unwrap();
            dispatch(&state, command).unwrap();
        }

        let summary = dispatch(&state, Command::Summary).unwrap();
        assert_eq!(summary["subtotal"], "399.97");
        assert_eq!(summary["itemCount"], 3);
        assert_eq!(summary["shipping"], "0");
        assert_eq!(summary["display"]["shipping"], "$0.00");
    }

    #[test]
    fn test_dispatch_set_quantity_overflow_is_cart_error() {
        let state = session();
        for line in ["add 1", "add 2"] {
            dispatch(&state, Command::parse(line).unwrap().unwrap()).unwrap();
        }

        let command = Command::parse("qty 1 9223372036854775807").unwrap().unwrap();
        let err = dispatch(&state, command).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        let cart = dispatch(&state, Command::Cart).unwrap();
        assert_eq!(cart["summary"]["itemCount"], 2);
    }

    #[test]
    fn test_dispatch_not_found() {
        let state = session();
        let err = dispatch(
            &state,
            Command::Add {
                product_id: "77".to_string(),
                quantity: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
