//! Batch price recalculation over the catalog.
//!
//! Every priced catalog item carries an optional base price and currency
//! code; this crate recomputes the public regular price as
//! `base_price * exchange_rate` in resumable, dry-runnable batches:
//!
//! - `stores`: contracts for the catalog, currency, and exclusion
//!   collaborators, with in-memory implementations in `memory`
//! - `scanner`: deterministic enumeration of priceable items
//! - `calculator`: the pure conversion arithmetic
//! - `engine`: per-item resolution and batched execution
//! - `run`: the cached item snapshot shared by one bulk run's steps

pub mod calculator;
pub mod engine;
pub mod memory;
pub mod run;
pub mod scanner;
pub mod stores;
pub mod types;

#[cfg(test)]
mod integration_tests;

pub use calculator::convert;
pub use engine::{PriceUpdateError, PriceUpdater};
pub use memory::{InMemoryCatalog, InMemoryCurrencyStore, InMemoryExclusionStore};
pub use run::{BulkRun, RunId, RunRegistry};
pub use scanner::scan;
pub use stores::{
    CatalogStore, CatalogStoreError, CurrencyStore, CurrencyStoreError, ExclusionStore,
    ExclusionStoreError,
};
pub use types::{BatchOutcome, ItemKind, ItemOutcome, ItemRef, VariationUpdate};
