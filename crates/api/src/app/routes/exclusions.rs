use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

use fxsync_core::ProductId;
use fxsync_pricing::{CatalogStore, ExclusionStore};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(add))
        .route("/:id", delete(remove))
}

/// Excluded products with catalog details where the id still resolves; ids
/// whose product has since been deleted are listed bare.
pub async fn list(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let ids = match services.exclusions.list() {
        Ok(ids) => ids,
        Err(e) => return errors::exclusion_error_to_response(e),
    };

    let mut items = Vec::with_capacity(ids.len());
    for id in ids {
        let item = match services.catalog.get(id) {
            Ok(item) => item,
            Err(e) => return errors::catalog_error_to_response(e),
        };
        match item {
            Some(item) => {
                let (price, _) = match dto::display_price(services.catalog.as_ref(), &item) {
                    Ok(pair) => pair,
                    Err(e) => return errors::catalog_error_to_response(e),
                };
                items.push(serde_json::json!({
                    "id": id.get(),
                    "name": item.name(),
                    "sku": item.sku().unwrap_or(""),
                    "type": item.type_name(),
                    "price": price,
                }));
            }
            None => items.push(serde_json::json!({ "id": id.get() })),
        }
    }

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn add(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddExclusionRequest>,
) -> axum::response::Response {
    if body.product_id == 0 {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
    }

    match services.exclusions.add(ProductId::new(body.product_id)) {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "product added to exclusions"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::CONFLICT,
            "already_excluded",
            "product is already excluded",
        ),
        Err(e) => errors::exclusion_error_to_response(e),
    }
}

pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    match services.exclusions.remove(id) {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "product removed from exclusions"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "product not found in exclusions",
        ),
        Err(e) => errors::exclusion_error_to_response(e),
    }
}
