//! Enumeration of priceable catalog items.

use crate::stores::{CatalogStore, CatalogStoreError};
use crate::types::ItemRef;

/// Build the ordered list of items that qualify for recalculation: published
/// simple products carrying both pricing fields (ascending id), followed by
/// published variations carrying both (parent id, then id). Variable parents
/// never appear; their variations are listed independently.
///
/// Exclusions are deliberately not applied here (the engine checks them per
/// item) and currency codes are not validated (the calculator's consumer
/// resolves them).
///
/// The result is a snapshot: callers that paginate over it hold it for the
/// whole run (see [`crate::run::BulkRun`]), so items edited mid-run are
/// intentionally not picked up until the next run.
pub fn scan(catalog: &dyn CatalogStore) -> Result<Vec<ItemRef>, CatalogStoreError> {
    let mut items: Vec<ItemRef> = catalog
        .priced_products()?
        .into_iter()
        .map(ItemRef::product)
        .collect();
    items.extend(
        catalog
            .priced_variations()?
            .into_iter()
            .map(ItemRef::variation),
    );
    Ok(items)
}
