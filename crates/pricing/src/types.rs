//! Core batch-update types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fxsync_catalog::CurrencyCode;
use fxsync_core::ProductId;

/// Which resolution path a scanned item takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Top-level product (simple or variable); checked against exclusions.
    Product,
    /// Product variation; exclusions do not apply at this level.
    Variation,
}

/// Reference to one priceable catalog entry, as produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: ProductId,
}

impl ItemRef {
    pub fn product(id: ProductId) -> Self {
        Self {
            kind: ItemKind::Product,
            id,
        }
    }

    pub fn variation(id: ProductId) -> Self {
        Self {
            kind: ItemKind::Variation,
            id,
        }
    }
}

/// Price change applied (or previewed) for one variation of a variable product.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationUpdate {
    pub variation_id: ProductId,
    pub variation_name: String,
    pub old_price: Option<Decimal>,
    pub new_price: Decimal,
    pub base_price: Decimal,
    pub currency: CurrencyCode,
    pub exchange_rate: Decimal,
}

/// Outcome of resolving a single catalog item.
///
/// Per-item problems are data, not errors: a bad item never aborts the batch
/// it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// A simple product or single variation was repriced.
    Updated {
        product_id: ProductId,
        product_name: String,
        old_price: Option<Decimal>,
        new_price: Decimal,
        base_price: Decimal,
        currency: CurrencyCode,
        exchange_rate: Decimal,
        dry_run: bool,
        is_variation: bool,
    },
    /// A variable product was repriced through its qualifying variations.
    VariableUpdated {
        product_id: ProductId,
        product_name: String,
        variations: Vec<VariationUpdate>,
        dry_run: bool,
    },
    /// The product is on the exclusion list.
    Excluded {
        product_id: ProductId,
        product_name: String,
        message: String,
    },
    /// The item is not configured for repricing (missing base price/currency,
    /// or a variable product with no qualifying variations).
    Skipped {
        product_id: ProductId,
        product_name: Option<String>,
        message: String,
    },
    /// The item could not be resolved (unknown id, unknown currency).
    Failed {
        product_id: ProductId,
        product_name: Option<String>,
        message: String,
    },
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ItemOutcome::Updated { .. } | ItemOutcome::VariableUpdated { .. }
        )
    }

    pub fn product_id(&self) -> ProductId {
        match self {
            ItemOutcome::Updated { product_id, .. }
            | ItemOutcome::VariableUpdated { product_id, .. }
            | ItemOutcome::Excluded { product_id, .. }
            | ItemOutcome::Skipped { product_id, .. }
            | ItemOutcome::Failed { product_id, .. } => *product_id,
        }
    }
}

/// Result of one batch step.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub offset: usize,
    pub limit: usize,
    pub processed: usize,
    pub results: Vec<ItemOutcome>,
    /// Size heuristic: true when the slice was full. A catalog whose
    /// eligible count is an exact multiple of the limit costs the caller one
    /// extra, empty step.
    pub has_more: bool,
}
