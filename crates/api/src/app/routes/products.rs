use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use fxsync_core::ProductId;
use fxsync_pricing::{CatalogStore, ExclusionStore};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Maximum hits returned by a product search.
const SEARCH_LIMIT: usize = 20;

pub fn router() -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/:id/update", post(manual_update))
}

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SearchQuery>,
) -> axum::response::Response {
    let Some(term) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_search_term",
            "a search term is required",
        );
    };

    let hits = match services.catalog.search(term, SEARCH_LIMIT) {
        Ok(hits) => hits,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let mut products = Vec::with_capacity(hits.len());
    for item in &hits {
        let is_excluded = match services.exclusions.contains(item.id()) {
            Ok(v) => v,
            Err(e) => return errors::exclusion_error_to_response(e),
        };
        let (price, price_html) = match dto::display_price(services.catalog.as_ref(), item) {
            Ok(pair) => pair,
            Err(e) => return errors::catalog_error_to_response(e),
        };
        products.push(dto::search_hit_to_json(item, price, price_html, is_excluded));
    }

    (StatusCode::OK, Json(serde_json::json!({ "products": products }))).into_response()
}

/// Manual single-product correction; never a dry run.
pub async fn manual_update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    let outcome = match services.updater.update_one(id) {
        Ok(outcome) => outcome,
        Err(e) => return errors::update_error_to_response(e),
    };

    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(dto::outcome_to_json(&outcome))).into_response()
}
