use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{StatusCode, Uri},
    Json,
};
use service::catalog::{Product, ProductInput};
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::state::ServerState;

const PRODUCT_PREFIX: &str = "/products/";

/// Everything after `/products/`, verbatim: no percent-decoding, slashes kept.
fn product_id(uri: &Uri) -> &str {
    uri.path().strip_prefix(PRODUCT_PREFIX).unwrap_or_default()
}

fn decode_input(body: &[u8]) -> Result<ProductInput, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "malformed product body");
        ApiError::InvalidBody
    })
}

/// List every product, order unspecified.
pub async fn list_products(State(state): State<ServerState>) -> Json<Vec<Product>> {
    let list = state.products.list().await;
    debug!(count = list.len(), "list products");
    Json(list)
}

/// Create a product; any client-sent `id` is discarded.
pub async fn create_product(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let input = decode_input(&body)?;
    let product = state.products.create(input).await?;
    info!(id = %product.id, name = %product.name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.get(product_id(&uri)).await?;
    Ok(Json(product))
}

/// Replace every field of an existing product; `id` stays the path id.
///
/// Existence is checked before the body is decoded, so an unknown id answers
/// 404 even when the body is malformed.
pub async fn replace_product(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let id = product_id(&uri);
    state.products.get(id).await?;
    let input = decode_input(&body)?;
    let product = state.products.replace(id, input).await?;
    info!(%id, "product replaced");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
) -> Result<StatusCode, ApiError> {
    let id = product_id(&uri);
    state.products.delete(id).await?;
    info!(%id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
