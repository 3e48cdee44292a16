//! End-to-end engine scenarios over the in-memory stores.

use std::sync::Arc;

use rust_decimal::Decimal;

use fxsync_catalog::{
    CatalogItem, CurrencyCode, CurrencySpec, ItemStatus, PricingFields, SimpleProduct,
    VariableProduct, Variation,
};
use fxsync_core::ProductId;

use crate::engine::PriceUpdater;
use crate::memory::{InMemoryCatalog, InMemoryCurrencyStore, InMemoryExclusionStore};
use crate::stores::{CatalogStore, CurrencyStore, ExclusionStore};
use crate::types::{ItemOutcome, ItemRef};

const BATCH: usize = 10;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

struct World {
    catalog: Arc<InMemoryCatalog>,
    currencies: Arc<InMemoryCurrencyStore>,
    exclusions: Arc<InMemoryExclusionStore>,
    updater: PriceUpdater,
}

fn world() -> World {
    let catalog = Arc::new(InMemoryCatalog::new());
    let currencies = Arc::new(InMemoryCurrencyStore::new());
    let exclusions = Arc::new(InMemoryExclusionStore::new());
    currencies
        .insert(CurrencySpec::new(code("USD"), "US Dollar", dec("1.000000"), true).unwrap())
        .unwrap();
    currencies
        .insert(CurrencySpec::new(code("EUR"), "Euro", dec("0.92"), false).unwrap())
        .unwrap();

    let updater = PriceUpdater::new(
        Arc::clone(&catalog) as Arc<dyn CatalogStore>,
        Arc::clone(&currencies) as Arc<dyn CurrencyStore>,
        Arc::clone(&exclusions) as Arc<dyn ExclusionStore>,
    );
    World {
        catalog,
        currencies,
        exclusions,
        updater,
    }
}

fn seed_simple(w: &World, id: u64, base: &str, currency: &str) {
    w.catalog
        .upsert(CatalogItem::Simple(SimpleProduct {
            id: ProductId::new(id),
            name: format!("Product #{id}"),
            sku: format!("SKU-{id}"),
            status: ItemStatus::Published,
            pricing: PricingFields::new(Some(dec(base)), Some(code(currency))),
            regular_price: None,
        }))
        .unwrap();
}

fn seed_variable(w: &World, id: u64, variations: &[(u64, Option<(&str, &str)>)]) {
    w.catalog
        .upsert(CatalogItem::Variable(VariableProduct {
            id: ProductId::new(id),
            name: format!("Variable #{id}"),
            sku: format!("VAR-{id}"),
            status: ItemStatus::Published,
            variation_ids: variations.iter().map(|(vid, _)| ProductId::new(*vid)).collect(),
        }))
        .unwrap();
    for (vid, pricing) in variations {
        w.catalog
            .upsert(CatalogItem::Variation(Variation {
                id: ProductId::new(*vid),
                parent_id: ProductId::new(id),
                name: format!("Variable #{id} - #{vid}"),
                status: ItemStatus::Published,
                pricing: match pricing {
                    Some((base, currency)) => {
                        PricingFields::new(Some(dec(base)), Some(code(currency)))
                    }
                    None => PricingFields::default(),
                },
                regular_price: None,
            }))
            .unwrap();
    }
}

/// Drive a full run the way a polling client does: step until `has_more`
/// goes false, collecting every per-item result.
fn drive_run(w: &World, dry_run: bool) -> Vec<ItemOutcome> {
    let run = w.updater.begin_run().unwrap();
    let mut results = Vec::new();
    let mut offset = 0;
    loop {
        let step = w.updater.run_batch(&run, offset, BATCH, dry_run).unwrap();
        results.extend(step.results);
        if !step.has_more {
            break;
        }
        offset += BATCH;
    }
    results
}

#[test]
fn pagination_covers_every_item_exactly_once() {
    let w = world();
    for id in 1..=23 {
        seed_simple(&w, id, "10.00", "USD");
    }

    let run = w.updater.begin_run().unwrap();
    assert_eq!(run.total(), 23);

    let mut seen: Vec<ProductId> = Vec::new();
    let mut offset = 0;
    loop {
        let step = w.updater.run_batch(&run, offset, BATCH, false).unwrap();
        seen.extend(step.results.iter().map(ItemOutcome::product_id));
        if !step.has_more {
            break;
        }
        offset += BATCH;
    }

    let expected: Vec<ProductId> = (1..=23).map(ProductId::new).collect();
    assert_eq!(seen, expected);
}

#[test]
fn exact_multiple_costs_one_extra_empty_step() {
    let w = world();
    for id in 1..=20 {
        seed_simple(&w, id, "10.00", "USD");
    }

    let run = w.updater.begin_run().unwrap();
    let step = w.updater.run_batch(&run, 10, BATCH, false).unwrap();
    assert_eq!(step.processed, 10);
    assert!(step.has_more, "full final page still reports more");

    let extra = w.updater.run_batch(&run, 20, BATCH, false).unwrap();
    assert_eq!(extra.processed, 0);
    assert!(extra.results.is_empty());
    assert!(!extra.has_more);
}

#[test]
fn run_snapshot_ignores_mid_run_edits() {
    let w = world();
    for id in 1..=5 {
        seed_simple(&w, id, "10.00", "USD");
    }

    let run = w.updater.begin_run().unwrap();
    // A product configured after the run begins is not picked up until the
    // next run.
    seed_simple(&w, 99, "10.00", "USD");
    assert_eq!(run.total(), 5);

    let step = w.updater.run_batch(&run, 0, BATCH, false).unwrap();
    assert_eq!(step.processed, 5);

    let next_run = w.updater.begin_run().unwrap();
    assert_eq!(next_run.total(), 6);
}

#[test]
fn dry_run_previews_without_writing() {
    let w = world();
    seed_simple(&w, 1, "100.00", "USD");
    seed_variable(&w, 2, &[(3, Some(("50.00", "EUR")))]);

    // The scanner lists the simple product and the variation; the variable
    // parent itself carries no pricing fields and is never scanned.
    let results = drive_run(&w, true);
    assert_eq!(results.len(), 2);

    for outcome in &results {
        match outcome {
            ItemOutcome::Updated {
                new_price, dry_run, ..
            } => {
                assert!(*dry_run);
                assert!(*new_price > Decimal::ZERO);
            }
            other => panic!("expected Updated outcomes, got {other:?}"),
        }
    }

    assert_eq!(
        w.catalog.get(ProductId::new(1)).unwrap().unwrap().regular_price(),
        None
    );
    assert_eq!(
        w.catalog.get(ProductId::new(3)).unwrap().unwrap().regular_price(),
        None
    );
}

#[test]
fn update_one_is_idempotent() {
    let w = world();
    seed_simple(&w, 1, "50.00", "EUR");

    let first = w.updater.update_one(ProductId::new(1)).unwrap();
    let second = w.updater.update_one(ProductId::new(1)).unwrap();

    let (first_old, first_new) = match first {
        ItemOutcome::Updated {
            old_price,
            new_price,
            ..
        } => (old_price, new_price),
        other => panic!("expected Updated, got {other:?}"),
    };
    let (second_old, second_new) = match second {
        ItemOutcome::Updated {
            old_price,
            new_price,
            ..
        } => (old_price, new_price),
        other => panic!("expected Updated, got {other:?}"),
    };

    assert_eq!(first_old, None);
    assert_eq!(first_new, dec("46.00"));
    assert_eq!(second_old, Some(first_new));
    assert_eq!(second_new, first_new);
}

#[test]
fn excluded_products_are_reported_not_repriced() {
    let w = world();
    seed_simple(&w, 1, "100.00", "USD");
    seed_simple(&w, 2, "100.00", "USD");
    w.exclusions.add(ProductId::new(1)).unwrap();

    let results = drive_run(&w, false);
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], ItemOutcome::Excluded { .. }));
    assert!(matches!(results[1], ItemOutcome::Updated { .. }));

    assert_eq!(
        w.catalog.get(ProductId::new(1)).unwrap().unwrap().regular_price(),
        None
    );
    assert_eq!(
        w.catalog.get(ProductId::new(2)).unwrap().unwrap().regular_price(),
        Some(dec("100.00"))
    );
}

#[test]
fn variable_fan_out_covers_only_configured_variations() {
    let w = world();
    seed_variable(
        &w,
        1,
        &[
            (2, Some(("20.00", "USD"))),
            (3, None),
            (4, Some(("30.00", "EUR"))),
        ],
    );

    let outcome = w.updater.update_one(ProductId::new(1)).unwrap();
    match outcome {
        ItemOutcome::VariableUpdated { variations, .. } => {
            assert_eq!(variations.len(), 2);
            assert_eq!(variations[0].variation_id, ProductId::new(2));
            assert_eq!(variations[0].new_price, dec("20.00"));
            assert_eq!(variations[1].variation_id, ProductId::new(4));
            assert_eq!(variations[1].new_price, dec("27.60"));
        }
        other => panic!("expected VariableUpdated, got {other:?}"),
    }

    // The unconfigured variation keeps its (absent) price.
    assert_eq!(
        w.catalog.get(ProductId::new(3)).unwrap().unwrap().regular_price(),
        None
    );
}

#[test]
fn variable_with_no_qualifying_variations_is_skipped() {
    let w = world();
    seed_variable(&w, 1, &[(2, None), (3, None)]);

    let outcome = w.updater.update_one(ProductId::new(1)).unwrap();
    match outcome {
        ItemOutcome::Skipped { message, .. } => {
            assert_eq!(message, "No variations with base price set");
        }
        other => panic!("expected Skipped, got {other:?}"),
    }

    let empty = world();
    empty
        .catalog
        .upsert(CatalogItem::Variable(VariableProduct {
            id: ProductId::new(9),
            name: "Childless".to_string(),
            sku: "NONE".to_string(),
            status: ItemStatus::Published,
            variation_ids: vec![],
        }))
        .unwrap();
    let outcome = empty.updater.update_one(ProductId::new(9)).unwrap();
    match outcome {
        ItemOutcome::Skipped { message, .. } => assert_eq!(message, "No variations found"),
        other => panic!("expected Skipped, got {other:?}"),
    }
}

#[test]
fn one_bad_item_never_stops_the_batch() {
    let w = world();
    seed_simple(&w, 1, "10.00", "USD");
    seed_simple(&w, 2, "10.00", "XYZ"); // unknown currency
    seed_simple(&w, 3, "10.00", "USD");

    let results = drive_run(&w, false);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_success());
    assert!(matches!(
        &results[1],
        ItemOutcome::Failed { message, .. } if message == "Currency XYZ not found"
    ));
    assert!(results[2].is_success());

    assert_eq!(
        w.catalog.get(ProductId::new(2)).unwrap().unwrap().regular_price(),
        None
    );
}

#[test]
fn concrete_conversion_scenarios() {
    let w = world();
    // USD at 1.000000 (default): 100.00 stays 100.00.
    seed_simple(&w, 1, "100.00", "USD");
    // EUR at 0.92 on a variation: 50.00 becomes 46.00.
    seed_variable(&w, 2, &[(3, Some(("50.00", "EUR")))]);

    drive_run(&w, false);

    assert_eq!(
        w.catalog.get(ProductId::new(1)).unwrap().unwrap().regular_price(),
        Some(dec("100.00"))
    );
    assert_eq!(
        w.catalog.get(ProductId::new(3)).unwrap().unwrap().regular_price(),
        Some(dec("46.00"))
    );
}

#[test]
fn scan_order_interleaves_products_before_variations() {
    let w = world();
    seed_variable(&w, 1, &[(5, Some(("10.00", "USD")))]);
    seed_simple(&w, 8, "10.00", "USD");
    seed_simple(&w, 2, "10.00", "USD");

    let run = w.updater.begin_run().unwrap();
    let refs: Vec<ItemRef> = run.slice(0, BATCH).to_vec();
    assert_eq!(
        refs,
        vec![
            ItemRef::product(ProductId::new(2)),
            ItemRef::product(ProductId::new(8)),
            ItemRef::variation(ProductId::new(5)),
        ]
    );
}

#[test]
fn rate_change_between_runs_is_picked_up() {
    let w = world();
    seed_simple(&w, 1, "100.00", "EUR");

    drive_run(&w, false);
    assert_eq!(
        w.catalog.get(ProductId::new(1)).unwrap().unwrap().regular_price(),
        Some(dec("92.00"))
    );

    let eur = w.currencies.find_by_code(&code("EUR")).unwrap().unwrap();
    w.currencies
        .update(
            eur.id,
            CurrencySpec::new(code("EUR"), "Euro", dec("0.95"), false).unwrap(),
        )
        .unwrap();

    drive_run(&w, false);
    assert_eq!(
        w.catalog.get(ProductId::new(1)).unwrap().unwrap().regular_price(),
        Some(dec("95.00"))
    );
}
