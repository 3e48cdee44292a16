//! Store contracts consumed by the pricing engine.
//!
//! The catalog, currency table, and exclusion list are owned by external
//! systems; the engine only depends on these traits. In-memory
//! implementations live in [`crate::memory`].

use rust_decimal::Decimal;
use thiserror::Error;

use fxsync_catalog::{CatalogItem, Currency, CurrencyCode, CurrencySpec};
use fxsync_core::{CurrencyId, ProductId};

/// Read/write access to the product catalog.
pub trait CatalogStore: Send + Sync {
    /// Look up a single item (product, variable parent, or variation).
    fn get(&self, id: ProductId) -> Result<Option<CatalogItem>, CatalogStoreError>;

    /// Overwrite an item's public regular price. No other attribute is touched.
    fn set_regular_price(&self, id: ProductId, price: Decimal) -> Result<(), CatalogStoreError>;

    /// Ids of published simple products carrying both pricing fields,
    /// ascending by id. Variable parents never qualify: they carry no pricing
    /// fields of their own.
    fn priced_products(&self) -> Result<Vec<ProductId>, CatalogStoreError>;

    /// Ids of published variations carrying both pricing fields, ordered by
    /// parent id then own id.
    fn priced_variations(&self) -> Result<Vec<ProductId>, CatalogStoreError>;

    /// Case-insensitive substring search over top-level products (name or
    /// SKU), ascending by id, truncated to `limit`.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogItem>, CatalogStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum CatalogStoreError {
    #[error("catalog item not found: {0}")]
    NotFound(ProductId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Read/write access to the currency table.
///
/// Implementations enforce code uniqueness and the single-default invariant
/// (inserting or updating a default clears any previous default).
pub trait CurrencyStore: Send + Sync {
    /// All currencies, default first, then ascending by code.
    fn list(&self) -> Result<Vec<Currency>, CurrencyStoreError>;

    fn get(&self, id: CurrencyId) -> Result<Option<Currency>, CurrencyStoreError>;

    fn find_by_code(&self, code: &CurrencyCode) -> Result<Option<Currency>, CurrencyStoreError>;

    fn insert(&self, spec: CurrencySpec) -> Result<Currency, CurrencyStoreError>;

    fn update(&self, id: CurrencyId, spec: CurrencySpec) -> Result<Currency, CurrencyStoreError>;

    fn delete(&self, id: CurrencyId) -> Result<(), CurrencyStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum CurrencyStoreError {
    #[error("currency not found: {0}")]
    NotFound(CurrencyId),
    #[error("currency code already exists: {0}")]
    DuplicateCode(CurrencyCode),
    #[error("storage error: {0}")]
    Storage(String),
}

/// The set of top-level product ids exempt from recalculation.
pub trait ExclusionStore: Send + Sync {
    /// Excluded ids in insertion order.
    fn list(&self) -> Result<Vec<ProductId>, ExclusionStoreError>;

    fn contains(&self, id: ProductId) -> Result<bool, ExclusionStoreError>;

    /// Returns false when the id was already present.
    fn add(&self, id: ProductId) -> Result<bool, ExclusionStoreError>;

    /// Returns false when the id was not present.
    fn remove(&self, id: ProductId) -> Result<bool, ExclusionStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum ExclusionStoreError {
    #[error("storage error: {0}")]
    Storage(String),
}
