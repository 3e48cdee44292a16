//! Catalog domain model.
//!
//! This crate contains the pure data model for catalog items and currencies,
//! implemented as deterministic domain types (no IO, no HTTP, no storage).

pub mod currency;
pub mod item;

pub use currency::{Currency, CurrencyCode, CurrencySpec};
pub use item::{
    CatalogItem, ItemStatus, PricingFields, SimpleProduct, VariableProduct, Variation,
};
