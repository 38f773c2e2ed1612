//! # State Module
//!
//! Session state, split by concern so each command declares only what it
//! needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ SessionCart  │  │  AppConfig   │  │ CatalogProvider  │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  policy      │  │  product lookup  │              │
//! │  │   CartStore  │  │  currency    │  │  (external)      │              │
//! │  │  >>          │  │              │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionCart: the single writer boundary for cart mutations          │
//! │  • AppConfig: read-only after startup                                  │
//! │  • Catalog: read-only                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::SessionCart;
pub use catalog::{CatalogProvider, DemoCatalog};
pub use config::AppConfig;

/// Everything a command may need, owned by the session loop.
#[derive(Debug)]
pub struct SessionState<C> {
    pub cart: SessionCart,
    pub config: AppConfig,
    pub catalog: C,
}
