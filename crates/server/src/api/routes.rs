use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, images, middleware::metrics_middleware};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config().server.static_dir.clone();

    // API routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/images", get(images::list_images))
        .with_state(state);

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics));

    // Serve the front-end with SPA fallback
    if let Some(dir) = static_dir {
        let index_path = dir.join("index.html");
        let serve_dir = ServeDir::new(&dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
    }

    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
