//! In-memory store implementations.
//!
//! Intended for tests/dev and as the default wiring when no external
//! persistence is configured. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use rust_decimal::Decimal;

use fxsync_catalog::{CatalogItem, Currency, CurrencyCode, CurrencySpec, ItemStatus};
use fxsync_core::{CurrencyId, ProductId};

use crate::stores::{
    CatalogStore, CatalogStoreError, CurrencyStore, CurrencyStoreError, ExclusionStore,
    ExclusionStoreError,
};

/// In-memory product catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<HashMap<ProductId, CatalogItem>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item. Parent/variation links are the seeder's
    /// responsibility; no referential check is performed.
    pub fn upsert(&self, item: CatalogItem) -> Result<(), CatalogStoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| CatalogStoreError::Storage("lock poisoned".to_string()))?;
        items.insert(item.id(), item);
        Ok(())
    }

    pub fn remove(&self, id: ProductId) -> Result<Option<CatalogItem>, CatalogStoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| CatalogStoreError::Storage("lock poisoned".to_string()))?;
        Ok(items.remove(&id))
    }
}

impl CatalogStore for InMemoryCatalog {
    fn get(&self, id: ProductId) -> Result<Option<CatalogItem>, CatalogStoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| CatalogStoreError::Storage("lock poisoned".to_string()))?;
        Ok(items.get(&id).cloned())
    }

    fn set_regular_price(&self, id: ProductId, price: Decimal) -> Result<(), CatalogStoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| CatalogStoreError::Storage("lock poisoned".to_string()))?;
        match items.get_mut(&id) {
            Some(CatalogItem::Simple(p)) => {
                p.regular_price = Some(price);
                Ok(())
            }
            Some(CatalogItem::Variation(v)) => {
                v.regular_price = Some(price);
                Ok(())
            }
            // Variable parents have no own price to write.
            Some(CatalogItem::Variable(_)) | None => Err(CatalogStoreError::NotFound(id)),
        }
    }

    fn priced_products(&self) -> Result<Vec<ProductId>, CatalogStoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| CatalogStoreError::Storage("lock poisoned".to_string()))?;
        let mut ids: Vec<ProductId> = items
            .values()
            .filter_map(|item| match item {
                CatalogItem::Simple(p)
                    if p.status == ItemStatus::Published && p.pricing.is_eligible() =>
                {
                    Some(p.id)
                }
                _ => None,
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn priced_variations(&self) -> Result<Vec<ProductId>, CatalogStoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| CatalogStoreError::Storage("lock poisoned".to_string()))?;
        let mut refs: Vec<(ProductId, ProductId)> = items
            .values()
            .filter_map(|item| match item {
                CatalogItem::Variation(v)
                    if v.status == ItemStatus::Published && v.pricing.is_eligible() =>
                {
                    Some((v.parent_id, v.id))
                }
                _ => None,
            })
            .collect();
        refs.sort();
        Ok(refs.into_iter().map(|(_, id)| id).collect())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogItem>, CatalogStoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| CatalogStoreError::Storage("lock poisoned".to_string()))?;
        let needle = query.to_lowercase();
        let mut hits: Vec<CatalogItem> = items
            .values()
            .filter(|item| {
                matches!(item, CatalogItem::Simple(_) | CatalogItem::Variable(_))
                    && item.is_published()
                    && (item.name().to_lowercase().contains(&needle)
                        || item
                            .sku()
                            .is_some_and(|sku| sku.to_lowercase().contains(&needle)))
            })
            .cloned()
            .collect();
        hits.sort_by_key(CatalogItem::id);
        hits.truncate(limit);
        Ok(hits)
    }
}

/// In-memory currency table with an auto-increment id sequence.
#[derive(Debug, Default)]
pub struct InMemoryCurrencyStore {
    inner: RwLock<CurrencyRows>,
}

#[derive(Debug, Default)]
struct CurrencyRows {
    rows: HashMap<CurrencyId, Currency>,
    next_id: u64,
}

impl InMemoryCurrencyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurrencyStore for InMemoryCurrencyStore {
    fn list(&self) -> Result<Vec<Currency>, CurrencyStoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| CurrencyStoreError::Storage("lock poisoned".to_string()))?;
        let mut rows: Vec<Currency> = inner.rows.values().cloned().collect();
        // Default first, then code ascending.
        rows.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.code.as_str().cmp(b.code.as_str()))
        });
        Ok(rows)
    }

    fn get(&self, id: CurrencyId) -> Result<Option<Currency>, CurrencyStoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| CurrencyStoreError::Storage("lock poisoned".to_string()))?;
        Ok(inner.rows.get(&id).cloned())
    }

    fn find_by_code(&self, code: &CurrencyCode) -> Result<Option<Currency>, CurrencyStoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| CurrencyStoreError::Storage("lock poisoned".to_string()))?;
        Ok(inner.rows.values().find(|c| &c.code == code).cloned())
    }

    fn insert(&self, spec: CurrencySpec) -> Result<Currency, CurrencyStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| CurrencyStoreError::Storage("lock poisoned".to_string()))?;

        if inner.rows.values().any(|c| c.code == spec.code) {
            return Err(CurrencyStoreError::DuplicateCode(spec.code));
        }

        if spec.is_default {
            for row in inner.rows.values_mut() {
                row.is_default = false;
            }
        }

        inner.next_id += 1;
        let now = Utc::now();
        let currency = Currency {
            id: CurrencyId::new(inner.next_id),
            code: spec.code,
            name: spec.name,
            exchange_rate: spec.exchange_rate,
            is_default: spec.is_default,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(currency.id, currency.clone());
        Ok(currency)
    }

    fn update(&self, id: CurrencyId, spec: CurrencySpec) -> Result<Currency, CurrencyStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| CurrencyStoreError::Storage("lock poisoned".to_string()))?;

        if !inner.rows.contains_key(&id) {
            return Err(CurrencyStoreError::NotFound(id));
        }
        if inner
            .rows
            .values()
            .any(|c| c.id != id && c.code == spec.code)
        {
            return Err(CurrencyStoreError::DuplicateCode(spec.code));
        }

        if spec.is_default {
            for row in inner.rows.values_mut() {
                row.is_default = false;
            }
        }

        let row = inner
            .rows
            .get_mut(&id)
            .ok_or(CurrencyStoreError::NotFound(id))?;
        row.code = spec.code;
        row.name = spec.name;
        row.exchange_rate = spec.exchange_rate;
        row.is_default = spec.is_default;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    fn delete(&self, id: CurrencyId) -> Result<(), CurrencyStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| CurrencyStoreError::Storage("lock poisoned".to_string()))?;
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(CurrencyStoreError::NotFound(id))
    }
}

/// In-memory exclusion list, insertion-ordered.
#[derive(Debug, Default)]
pub struct InMemoryExclusionStore {
    ids: RwLock<Vec<ProductId>>,
}

impl InMemoryExclusionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExclusionStore for InMemoryExclusionStore {
    fn list(&self) -> Result<Vec<ProductId>, ExclusionStoreError> {
        let ids = self
            .ids
            .read()
            .map_err(|_| ExclusionStoreError::Storage("lock poisoned".to_string()))?;
        Ok(ids.clone())
    }

    fn contains(&self, id: ProductId) -> Result<bool, ExclusionStoreError> {
        let ids = self
            .ids
            .read()
            .map_err(|_| ExclusionStoreError::Storage("lock poisoned".to_string()))?;
        Ok(ids.contains(&id))
    }

    fn add(&self, id: ProductId) -> Result<bool, ExclusionStoreError> {
        let mut ids = self
            .ids
            .write()
            .map_err(|_| ExclusionStoreError::Storage("lock poisoned".to_string()))?;
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        Ok(true)
    }

    fn remove(&self, id: ProductId) -> Result<bool, ExclusionStoreError> {
        let mut ids = self
            .ids
            .write()
            .map_err(|_| ExclusionStoreError::Storage("lock poisoned".to_string()))?;
        match ids.iter().position(|existing| *existing == id) {
            Some(pos) => {
                ids.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
