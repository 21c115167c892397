use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_product::{Product, ProductDto};
use serde_json::json;

use crate::domain::a001_product;

/// GET /api/product
pub async fn list_all() -> Result<Json<Vec<Product>>, StatusCode> {
    match a001_product::service::list_all().await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            tracing::error!("Failed to list products: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/product/:sku
pub async fn get_by_sku(Path(sku): Path<String>) -> Result<Json<Product>, StatusCode> {
    match a001_product::service::get_by_sku(&sku).await {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get product {}: {}", sku, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/product
pub async fn upsert(
    Json(dto): Json<ProductDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    if let Err(message) = dto.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "error": message }))));
    }

    match a001_product::service::upsert(dto).await {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(e) => {
            tracing::error!("Failed to save product: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}
