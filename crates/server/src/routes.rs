pub mod products;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health::ok(state.products.len().await))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Build the full application router.
///
/// Methods not registered on a path answer 405 with an `Allow` header.
/// `/products/` is routed explicitly since the wildcard needs a non-empty
/// suffix; its empty id then misses in the store like any unknown id.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/",
            get(products::get_product)
                .put(products::replace_product)
                .delete(products::delete_product),
        )
        .route(
            "/products/*id",
            get(products::get_product)
                .put(products::replace_product)
                .delete(products::delete_product),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
