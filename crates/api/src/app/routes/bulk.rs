use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Items resolved per step. Fixed server-side; the wire format carries no
/// limit field from the client.
pub const BATCH_SIZE: usize = 10;

pub fn router() -> Router {
    Router::new().route("/step", post(step))
}

/// One step of the client-driven bulk update loop.
///
/// `offset == 0` starts a fresh run (the catalog is re-scanned and the
/// snapshot cached); later offsets reuse the registry's current run, so
/// slices within one run are stable and non-overlapping. A process restart
/// mid-run simply starts a fresh scan on the next step. Callers keep
/// stepping while `has_more` is true and may retry a failed step with the
/// same offset.
pub async fn step(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BatchStepRequest>,
) -> axum::response::Response {
    let offset = body.offset as usize;

    let run = if offset == 0 {
        match services.updater.begin_run() {
            Ok(run) => services.runs.begin(run),
            Err(e) => return errors::update_error_to_response(e),
        }
    } else {
        match services.runs.current() {
            Some(run) => run,
            None => match services.updater.begin_run() {
                Ok(run) => services.runs.begin(run),
                Err(e) => return errors::update_error_to_response(e),
            },
        }
    };

    let outcome = match services.updater.run_batch(&run, offset, BATCH_SIZE, body.dry_run) {
        Ok(outcome) => outcome,
        Err(e) => return errors::update_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(dto::batch_to_json(&outcome, run.total(), body.dry_run)),
    )
        .into_response()
}
