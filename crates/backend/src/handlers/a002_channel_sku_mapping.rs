use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::domain::a002_channel_sku_mapping::csv::{template_csv, TEMPLATE_FILE_NAME};
use contracts::domain::a002_channel_sku_mapping::ChannelSkuMappingListResponse;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a002_channel_sku_mapping::{csv_export::EXPORT_FILE_NAME, service};

#[derive(Debug, Deserialize)]
pub struct ChannelFilter {
    pub channel_name: Option<String>,
}

/// GET /api/channel_sku_mapping
pub async fn list_all(
    Query(filter): Query<ChannelFilter>,
) -> Result<Json<ChannelSkuMappingListResponse>, StatusCode> {
    match service::list(filter.channel_name.as_deref()).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to list channel SKU mappings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/channel_sku_mapping/:id
pub async fn delete(Path(id): Path<i64>) -> StatusCode {
    match service::delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT,
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            tracing::error!("Failed to delete channel SKU mapping {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// DELETE /api/channel_sku_mapping?channel_name=X
pub async fn delete_by_channel(
    Query(filter): Query<ChannelFilter>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let Some(channel_name) = filter.channel_name.filter(|c| !c.trim().is_empty()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "channel_name is required" })),
        ));
    };

    match service::delete_by_channel(&channel_name).await {
        Ok(deleted) => Ok(Json(json!({ "deleted": deleted }))),
        Err(e) => {
            tracing::error!("Failed to delete mappings for '{}': {}", channel_name, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

/// GET /api/channel_sku_mapping/template
pub async fn template() -> impl IntoResponse {
    csv_attachment(TEMPLATE_FILE_NAME, template_csv())
}

/// GET /api/channel_sku_mapping/export
pub async fn export() -> Result<impl IntoResponse, StatusCode> {
    match service::export_csv().await {
        Ok(body) => Ok(csv_attachment(EXPORT_FILE_NAME, body)),
        Err(e) => {
            tracing::error!("Failed to export channel SKU mappings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn csv_attachment(file_name: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
}
