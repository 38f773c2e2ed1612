//! # ShopNow Session Entry Point
//!
//! Reads cart commands from stdin, one per line, and answers each with a JSON
//! document on stdout. Logs go to stderr.
//!
//! ```text
//! $ printf 'add 1\nadd 3 2\ncode save20\nsummary\n' | shopnow
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match shopnow_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shopnow: {e}");
            ExitCode::FAILURE
        }
    }
}
