use axum::Router;

pub mod bulk;
pub mod exclusions;
pub mod products;
pub mod system;

/// Router for all service endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/bulk-update", bulk::router())
        .nest("/products", products::router())
        .nest("/exclusions", exclusions::router())
}
