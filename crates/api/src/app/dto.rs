use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use fxsync_catalog::CatalogItem;
use fxsync_pricing::{BatchOutcome, CatalogStore, CatalogStoreError, ItemOutcome};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct BatchStepRequest {
    pub offset: u64,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddExclusionRequest {
    pub product_id: u64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Map a per-item outcome onto the established wire shape: a `success` flag
/// plus `excluded`/`skipped`/`is_variable`/`is_variation` markers where they
/// apply, prices as strings.
pub fn outcome_to_json(outcome: &ItemOutcome) -> serde_json::Value {
    match outcome {
        ItemOutcome::Updated {
            product_id,
            product_name,
            old_price,
            new_price,
            base_price,
            currency,
            exchange_rate,
            dry_run,
            is_variation,
        } => {
            let mut obj = json!({
                "success": true,
                "product_id": product_id.get(),
                "product_name": product_name,
                "old_price": old_price.map(|p| p.to_string()),
                "new_price": new_price.to_string(),
                "base_price": base_price.to_string(),
                "currency": currency.as_str(),
                "exchange_rate": exchange_rate.to_string(),
                "dry_run": dry_run,
            });
            if *is_variation {
                obj["is_variation"] = json!(true);
            }
            obj
        }
        ItemOutcome::VariableUpdated {
            product_id,
            product_name,
            variations,
            dry_run,
        } => json!({
            "success": true,
            "product_id": product_id.get(),
            "product_name": product_name,
            "is_variable": true,
            "variations": variations
                .iter()
                .map(|v| json!({
                    "variation_id": v.variation_id.get(),
                    "variation_name": v.variation_name,
                    "old_price": v.old_price.map(|p| p.to_string()),
                    "new_price": v.new_price.to_string(),
                    "base_price": v.base_price.to_string(),
                    "currency": v.currency.as_str(),
                    "exchange_rate": v.exchange_rate.to_string(),
                }))
                .collect::<Vec<_>>(),
            "dry_run": dry_run,
        }),
        ItemOutcome::Excluded {
            product_id,
            product_name,
            message,
        } => json!({
            "success": false,
            "excluded": true,
            "message": message,
            "product_id": product_id.get(),
            "product_name": product_name,
        }),
        ItemOutcome::Skipped {
            product_id,
            product_name,
            message,
        } => json!({
            "success": false,
            "skipped": true,
            "message": message,
            "product_id": product_id.get(),
            "product_name": product_name,
        }),
        ItemOutcome::Failed {
            product_id,
            product_name,
            message,
        } => json!({
            "success": false,
            "message": message,
            "product_id": product_id.get(),
            "product_name": product_name,
        }),
    }
}

pub fn batch_to_json(outcome: &BatchOutcome, total: usize, dry_run: bool) -> serde_json::Value {
    json!({
        "offset": outcome.offset,
        "limit": outcome.limit,
        "processed": outcome.processed,
        "results": outcome.results.iter().map(outcome_to_json).collect::<Vec<_>>(),
        "has_more": outcome.has_more,
        "total": total,
        "dry_run": dry_run,
    })
}

pub fn search_hit_to_json(
    item: &CatalogItem,
    price: Option<String>,
    price_html: String,
    is_excluded: bool,
) -> serde_json::Value {
    json!({
        "id": item.id().get(),
        "name": item.name(),
        "sku": item.sku().unwrap_or(""),
        "type": item.type_name(),
        "price": price,
        "price_html": price_html,
        "is_excluded": is_excluded,
    })
}

/// Displayable price for a top-level item: a variable product renders as the
/// min-max range over its variations' current prices.
pub fn display_price(
    catalog: &dyn CatalogStore,
    item: &CatalogItem,
) -> Result<(Option<String>, String), CatalogStoreError> {
    match item {
        CatalogItem::Simple(p) => Ok(price_pair(p.regular_price)),
        CatalogItem::Variation(v) => Ok(price_pair(v.regular_price)),
        CatalogItem::Variable(p) => {
            let mut prices: Vec<Decimal> = Vec::new();
            for vid in &p.variation_ids {
                if let Some(CatalogItem::Variation(v)) = catalog.get(*vid)? {
                    if let Some(price) = v.regular_price {
                        prices.push(price);
                    }
                }
            }
            match (prices.iter().min(), prices.iter().max()) {
                (Some(min), Some(max)) if min != max => {
                    Ok((Some(min.to_string()), format!("{min} - {max}")))
                }
                (Some(min), _) => Ok((Some(min.to_string()), min.to_string())),
                _ => Ok((None, String::new())),
            }
        }
    }
}

fn price_pair(price: Option<Decimal>) -> (Option<String>, String) {
    match price {
        Some(p) => (Some(p.to_string()), p.to_string()),
        None => (None, String::new()),
    }
}
