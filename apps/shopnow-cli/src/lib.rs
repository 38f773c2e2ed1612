//! # ShopNow Session Library
//!
//! Hosts one shopping session: loads configuration, builds the cart store
//! and answers line commands with JSON.
//!
//! ## Module Organization
//! ```text
//! shopnow_cli/
//! ├── lib.rs          ◄─── You are here (startup & session loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart behind a Mutex
//! │   ├── catalog.rs  ◄─── Product lookup
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Parsing and dispatch
//! │   ├── catalog.rs  ◄─── Product listing
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Wire Format
//! One command per input line, one JSON document per output line:
//! ```text
//! > add 3 2
//! < {"ok":{"lines":[...],"appliedDiscount":null,"summary":{...}}}
//! > add 99
//! < {"error":{"code":"NOT_FOUND","message":"Product not found: 99"}}
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::Value;
use shopnow_core::CartStore;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commands::Command;
use error::{ApiError, StartupError};
use state::{AppConfig, CatalogProvider, DemoCatalog, SessionCart, SessionState};

/// One response line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Reply {
    Ok(Value),
    Error(ApiError),
}

impl From<Result<Value, ApiError>> for Reply {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(value) => Reply::Ok(value),
            Err(err) => Reply::Error(err),
        }
    }
}

/// Runs a session on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: info,shopnow=debug; RUST_LOG overrides                   │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • SHOPNOW_* overrides on top of the standard policy                 │
/// │     • Inconsistent policy aborts here                                   │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionCart: empty store with Mutex for serialized updates        │
/// │     • DemoCatalog: sample products                                      │
/// │                                                                         │
/// │  4. Read commands until EOF or `quit` ────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), StartupError> {
    init_tracing();

    info!("Starting ShopNow session");

    let config = AppConfig::from_env()?;
    info!(
        tax_rate = %config.policy.tax_rate.percentage(),
        free_shipping_threshold = %config.policy.free_shipping_threshold,
        flat_shipping = %config.policy.flat_shipping,
        "Configuration loaded"
    );

    let state = build_state(config, DemoCatalog::new()?)?;
    info!(products = state.catalog.products().len(), "State initialized");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&state, stdin.lock(), stdout.lock())?;

    info!("Session ended");
    Ok(())
}

/// Builds session state around a fresh cart priced with `config`'s policy.
pub fn build_state<C: CatalogProvider>(
    config: AppConfig,
    catalog: C,
) -> Result<SessionState<C>, StartupError> {
    let store = CartStore::new(config.policy().clone())?;
    Ok(SessionState {
        cart: SessionCart::new(store),
        config,
        catalog,
    })
}

/// Reads commands from `input` and writes one reply per command to `output`.
///
/// Blank lines are skipped. Stops at end of input or after `quit`.
pub fn run_session<C, R, W>(
    state: &SessionState<C>,
    input: R,
    mut output: W,
) -> Result<(), StartupError>
where
    C: CatalogProvider,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let reply = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => {
                debug!("quit requested");
                break;
            }
            Ok(Some(command)) => Reply::from(commands::dispatch(state, command)),
            Err(err) => Reply::Error(err),
        };

        if let Reply::Error(err) = &reply {
            warn!(code = ?err.code, message = %err.message, input = %line, "command failed");
        }

        serde_json::to_writer(&mut output, &reply)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopnow_core=trace` - Trace the core only
/// - Default: INFO, DEBUG for shopnow crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopnow=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
