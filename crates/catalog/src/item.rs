use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fxsync_core::ProductId;

use crate::currency::CurrencyCode;

/// Publication status of a catalog item. Only published items are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Published,
    Draft,
}

/// Optional per-item pricing attributes.
///
/// Both fields must be present for an item to participate in price
/// recalculation; an item with only one of the two is skipped, not failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingFields {
    pub base_price: Option<Decimal>,
    pub currency_code: Option<CurrencyCode>,
}

impl PricingFields {
    pub fn new(base_price: Option<Decimal>, currency_code: Option<CurrencyCode>) -> Self {
        Self {
            base_price,
            currency_code,
        }
    }

    /// Both base price and currency code are set.
    pub fn is_eligible(&self) -> bool {
        self.base_price.is_some() && self.currency_code.is_some()
    }
}

/// A product with no sub-variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleProduct {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub status: ItemStatus,
    pub pricing: PricingFields,
    pub regular_price: Option<Decimal>,
}

/// A product composed of independently priced variations.
///
/// The parent carries no pricing fields of its own; its variations are
/// evaluated one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableProduct {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub status: ItemStatus,
    pub variation_ids: Vec<ProductId>,
}

/// A single variation of a variable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: ProductId,
    pub parent_id: ProductId,
    pub name: String,
    pub status: ItemStatus,
    pub pricing: PricingFields,
    pub regular_price: Option<Decimal>,
}

/// A catalog entry, polymorphic over the three item shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogItem {
    Simple(SimpleProduct),
    Variable(VariableProduct),
    Variation(Variation),
}

impl CatalogItem {
    pub fn id(&self) -> ProductId {
        match self {
            CatalogItem::Simple(p) => p.id,
            CatalogItem::Variable(p) => p.id,
            CatalogItem::Variation(v) => v.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogItem::Simple(p) => &p.name,
            CatalogItem::Variable(p) => &p.name,
            CatalogItem::Variation(v) => &v.name,
        }
    }

    pub fn status(&self) -> ItemStatus {
        match self {
            CatalogItem::Simple(p) => p.status,
            CatalogItem::Variable(p) => p.status,
            CatalogItem::Variation(v) => v.status,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status() == ItemStatus::Published
    }

    /// Stable type tag as exposed on the wire ("simple"/"variable"/"variation").
    pub fn type_name(&self) -> &'static str {
        match self {
            CatalogItem::Simple(_) => "simple",
            CatalogItem::Variable(_) => "variable",
            CatalogItem::Variation(_) => "variation",
        }
    }

    /// SKU, where the shape carries one (variations do not).
    pub fn sku(&self) -> Option<&str> {
        match self {
            CatalogItem::Simple(p) => Some(&p.sku),
            CatalogItem::Variable(p) => Some(&p.sku),
            CatalogItem::Variation(_) => None,
        }
    }

    /// Pricing fields for shapes that can be priced directly.
    ///
    /// Variable parents return `None`: they are never themselves eligible.
    pub fn pricing(&self) -> Option<&PricingFields> {
        match self {
            CatalogItem::Simple(p) => Some(&p.pricing),
            CatalogItem::Variable(_) => None,
            CatalogItem::Variation(v) => Some(&v.pricing),
        }
    }

    pub fn regular_price(&self) -> Option<Decimal> {
        match self {
            CatalogItem::Simple(p) => p.regular_price,
            CatalogItem::Variable(_) => None,
            CatalogItem::Variation(v) => v.regular_price,
        }
    }
}
