//! Store and engine wiring for the HTTP surface.

use std::sync::Arc;

use fxsync_pricing::{
    CatalogStore, CurrencyStore, ExclusionStore, InMemoryCatalog, InMemoryCurrencyStore,
    InMemoryExclusionStore, PriceUpdater, RunRegistry,
};

/// Everything a request handler needs, constructed once at startup and
/// injected through an axum `Extension`.
pub struct AppServices {
    pub catalog: Arc<InMemoryCatalog>,
    pub currencies: Arc<InMemoryCurrencyStore>,
    pub exclusions: Arc<InMemoryExclusionStore>,
    pub updater: PriceUpdater,
    pub runs: RunRegistry,
}

/// Wire the in-memory stores into a ready-to-serve service set.
pub fn build_services() -> AppServices {
    let catalog = Arc::new(InMemoryCatalog::new());
    let currencies = Arc::new(InMemoryCurrencyStore::new());
    let exclusions = Arc::new(InMemoryExclusionStore::new());

    let updater = PriceUpdater::new(
        Arc::clone(&catalog) as Arc<dyn CatalogStore>,
        Arc::clone(&currencies) as Arc<dyn CurrencyStore>,
        Arc::clone(&exclusions) as Arc<dyn ExclusionStore>,
    );

    AppServices {
        catalog,
        currencies,
        exclusions,
        updater,
        runs: RunRegistry::new(),
    }
}
