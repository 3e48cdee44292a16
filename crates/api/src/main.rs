use std::sync::Arc;

#[tokio::main]
async fn main() {
    fxsync_observability::init();

    let bind = std::env::var("FXSYNC_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let services = Arc::new(fxsync_api::app::services::build_services());
    let app = fxsync_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
