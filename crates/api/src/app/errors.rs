use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fxsync_pricing::{CatalogStoreError, ExclusionStoreError, PriceUpdateError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Store-level failures surface as whole-request errors; per-item problems
/// never reach this path (they are structured results).
pub fn update_error_to_response(err: PriceUpdateError) -> axum::response::Response {
    match err {
        PriceUpdateError::Catalog(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog_store_error", e.to_string())
        }
        PriceUpdateError::Currency(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "currency_store_error", e.to_string())
        }
        PriceUpdateError::Exclusion(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "exclusion_store_error", e.to_string())
        }
    }
}

pub fn catalog_error_to_response(err: CatalogStoreError) -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "catalog_store_error",
        err.to_string(),
    )
}

pub fn exclusion_error_to_response(err: ExclusionStoreError) -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "exclusion_store_error",
        err.to_string(),
    )
}
