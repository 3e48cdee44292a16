//! Per-item price resolution and batched execution.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use fxsync_catalog::{CatalogItem, PricingFields, VariableProduct};
use fxsync_core::ProductId;

use crate::calculator::convert;
use crate::run::BulkRun;
use crate::scanner::scan;
use crate::stores::{
    CatalogStore, CatalogStoreError, CurrencyStore, CurrencyStoreError, ExclusionStore,
    ExclusionStoreError,
};
use crate::types::{BatchOutcome, ItemKind, ItemOutcome, VariationUpdate};

/// Store-level failure while running an update.
///
/// Per-item problems (unknown product, unknown currency, missing
/// configuration, exclusion) are [`ItemOutcome`] data, not errors; only
/// infrastructure failures surface here.
#[derive(Debug, Error)]
pub enum PriceUpdateError {
    #[error(transparent)]
    Catalog(#[from] CatalogStoreError),
    #[error(transparent)]
    Currency(#[from] CurrencyStoreError),
    #[error(transparent)]
    Exclusion(#[from] ExclusionStoreError),
}

/// Recomputes regular prices from per-item base price + currency code.
///
/// All collaborators are injected; the engine keeps no state of its own
/// beyond what a [`BulkRun`] snapshot carries.
pub struct PriceUpdater {
    catalog: Arc<dyn CatalogStore>,
    currencies: Arc<dyn CurrencyStore>,
    exclusions: Arc<dyn ExclusionStore>,
}

impl PriceUpdater {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        currencies: Arc<dyn CurrencyStore>,
        exclusions: Arc<dyn ExclusionStore>,
    ) -> Self {
        Self {
            catalog,
            currencies,
            exclusions,
        }
    }

    /// Scan the catalog once and capture the snapshot for a new bulk run.
    pub fn begin_run(&self) -> Result<BulkRun, PriceUpdateError> {
        let items = scan(self.catalog.as_ref())?;
        let run = BulkRun::new(items);
        tracing::info!(run_id = %run.id(), total = run.total(), "bulk update run started");
        Ok(run)
    }

    /// Execute one batch step over the run's snapshot.
    ///
    /// `has_more` is a size heuristic (`processed == limit`): when the
    /// eligible count is an exact multiple of `limit`, the caller issues one
    /// extra step that comes back empty.
    pub fn run_batch(
        &self,
        run: &BulkRun,
        offset: usize,
        limit: usize,
        dry_run: bool,
    ) -> Result<BatchOutcome, PriceUpdateError> {
        let slice = run.slice(offset, limit);
        let mut results = Vec::with_capacity(slice.len());

        for item in slice {
            let outcome = match item.kind {
                ItemKind::Product => self.update_product(item.id, dry_run)?,
                ItemKind::Variation => self.update_variation(item.id, dry_run)?,
            };
            log_outcome(&outcome);
            results.push(outcome);
        }

        let processed = results.len();
        tracing::debug!(
            run_id = %run.id(),
            offset,
            processed,
            dry_run,
            "batch step finished"
        );
        Ok(BatchOutcome {
            offset,
            limit,
            processed,
            results,
            has_more: processed == limit,
        })
    }

    /// Manual single-item correction: same resolution as a batch step's
    /// product path, never a dry run.
    pub fn update_one(&self, id: ProductId) -> Result<ItemOutcome, PriceUpdateError> {
        let outcome = self.update_product(id, false)?;
        log_outcome(&outcome);
        Ok(outcome)
    }

    /// Resolve a top-level id: exclusion check first, then dispatch on shape.
    pub fn update_product(
        &self,
        id: ProductId,
        dry_run: bool,
    ) -> Result<ItemOutcome, PriceUpdateError> {
        let Some(item) = self.catalog.get(id)? else {
            return Ok(ItemOutcome::Failed {
                product_id: id,
                product_name: None,
                message: "Product not found".to_string(),
            });
        };

        if self.exclusions.contains(id)? {
            return Ok(ItemOutcome::Excluded {
                product_id: id,
                product_name: item.name().to_string(),
                message: "Product is excluded from updates".to_string(),
            });
        }

        match item {
            CatalogItem::Variable(parent) => self.update_variable(parent, dry_run),
            CatalogItem::Simple(p) => {
                self.update_priced(p.id, p.name, p.pricing, p.regular_price, dry_run, false)
            }
            CatalogItem::Variation(v) => {
                self.update_priced(v.id, v.name, v.pricing, v.regular_price, dry_run, true)
            }
        }
    }

    /// Resolve a scanned variation ref. Exclusions do not apply at this
    /// level: only top-level product ids participate in the exclusion set.
    pub fn update_variation(
        &self,
        id: ProductId,
        dry_run: bool,
    ) -> Result<ItemOutcome, PriceUpdateError> {
        match self.catalog.get(id)? {
            Some(CatalogItem::Variation(v)) => {
                self.update_priced(v.id, v.name, v.pricing, v.regular_price, dry_run, true)
            }
            _ => Ok(ItemOutcome::Failed {
                product_id: id,
                product_name: None,
                message: "Variation not found".to_string(),
            }),
        }
    }

    /// Shared resolution for anything that carries its own pricing fields.
    fn update_priced(
        &self,
        id: ProductId,
        name: String,
        pricing: PricingFields,
        old_price: Option<Decimal>,
        dry_run: bool,
        is_variation: bool,
    ) -> Result<ItemOutcome, PriceUpdateError> {
        let (Some(base_price), Some(code)) = (pricing.base_price, pricing.currency_code) else {
            return Ok(ItemOutcome::Skipped {
                product_id: id,
                product_name: Some(name),
                message: "No base price or currency set".to_string(),
            });
        };

        let Some(currency) = self.currencies.find_by_code(&code)? else {
            return Ok(ItemOutcome::Failed {
                product_id: id,
                product_name: Some(name),
                message: format!("Currency {code} not found"),
            });
        };

        let new_price = convert(base_price, currency.exchange_rate);
        if !dry_run {
            self.catalog.set_regular_price(id, new_price)?;
        }

        Ok(ItemOutcome::Updated {
            product_id: id,
            product_name: name,
            old_price,
            new_price,
            base_price,
            currency: code,
            exchange_rate: currency.exchange_rate,
            dry_run,
            is_variation,
        })
    }

    /// Fan out over a variable product's variations. Variations that are
    /// missing, unconfigured, or priced in an unknown currency are passed
    /// over without a per-variation record, as long as at least one
    /// variation qualifies.
    fn update_variable(
        &self,
        parent: VariableProduct,
        dry_run: bool,
    ) -> Result<ItemOutcome, PriceUpdateError> {
        if parent.variation_ids.is_empty() {
            return Ok(ItemOutcome::Skipped {
                product_id: parent.id,
                product_name: Some(parent.name),
                message: "No variations found".to_string(),
            });
        }

        let mut variations = Vec::new();
        for vid in &parent.variation_ids {
            let Some(CatalogItem::Variation(v)) = self.catalog.get(*vid)? else {
                continue;
            };
            let (Some(base_price), Some(code)) = (v.pricing.base_price, v.pricing.currency_code)
            else {
                continue;
            };
            let Some(currency) = self.currencies.find_by_code(&code)? else {
                continue;
            };

            let new_price = convert(base_price, currency.exchange_rate);
            if !dry_run {
                self.catalog.set_regular_price(v.id, new_price)?;
            }
            variations.push(VariationUpdate {
                variation_id: v.id,
                variation_name: v.name,
                old_price: v.regular_price,
                new_price,
                base_price,
                currency: code,
                exchange_rate: currency.exchange_rate,
            });
        }

        if variations.is_empty() {
            return Ok(ItemOutcome::Skipped {
                product_id: parent.id,
                product_name: Some(parent.name),
                message: "No variations with base price set".to_string(),
            });
        }

        Ok(ItemOutcome::VariableUpdated {
            product_id: parent.id,
            product_name: parent.name,
            variations,
            dry_run,
        })
    }
}

/// One log line per item outcome, as surfaced in the operator's run log.
fn log_outcome(outcome: &ItemOutcome) {
    match outcome {
        ItemOutcome::Updated {
            product_id,
            new_price,
            dry_run,
            ..
        } => {
            tracing::info!(product_id = %product_id, new_price = %new_price, dry_run, "regular price updated");
        }
        ItemOutcome::VariableUpdated {
            product_id,
            variations,
            dry_run,
            ..
        } => {
            tracing::info!(
                product_id = %product_id,
                variations = variations.len(),
                dry_run,
                "variable product updated"
            );
        }
        ItemOutcome::Excluded { product_id, .. } => {
            tracing::debug!(product_id = %product_id, "product excluded from updates");
        }
        ItemOutcome::Skipped {
            product_id,
            message,
            ..
        } => {
            tracing::debug!(product_id = %product_id, %message, "item skipped");
        }
        ItemOutcome::Failed {
            product_id,
            message,
            ..
        } => {
            tracing::warn!(product_id = %product_id, %message, "item update failed");
        }
    }
}
