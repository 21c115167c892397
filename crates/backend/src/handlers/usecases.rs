use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_channel_sku_mapping::csv::build_preview;
use contracts::domain::a002_channel_sku_mapping::CsvPreview;
use contracts::usecases::u501_import_channel_sku_mappings::{
    ImportProgress, ImportRequest, ImportResponse, PreviewRequest,
};
use once_cell::sync::Lazy;
use serde_json::json;
use std::sync::Arc;

use crate::domain::a002_channel_sku_mapping::store::SeaOrmMappingStore;
use crate::shared::config::import_config;
use crate::shared::data::db::get_connection;
use crate::usecases::u501_import_channel_sku_mappings::{
    pipeline::check_input, ImportExecutor, ProgressTracker,
};

// ============================================================================
// UseCase u501: Import channel SKU mappings
// ============================================================================

static IMPORT_EXECUTOR: Lazy<Arc<ImportExecutor>> = Lazy::new(|| {
    let tracker = Arc::new(ProgressTracker::new());
    let store = Arc::new(SeaOrmMappingStore::new(get_connection().clone()));
    Arc::new(ImportExecutor::new(tracker, store, import_config()))
});

/// POST /api/u501/import/start
pub async fn u501_start_import(
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, StatusCode> {
    match IMPORT_EXECUTOR.start_import(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to start channel SKU mapping import: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/u501/import/:session_id/progress
pub async fn u501_get_progress(
    Path(session_id): Path<String>,
) -> Result<Json<ImportProgress>, StatusCode> {
    match IMPORT_EXECUTOR.get_progress(&session_id) {
        Some(progress) => Ok(Json(progress)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /api/u501/preview
pub async fn u501_preview(
    Json(request): Json<PreviewRequest>,
) -> Result<Json<CsvPreview>, (StatusCode, Json<serde_json::Value>)> {
    let bad_request = |message: String| (StatusCode::BAD_REQUEST, Json(json!({ "error": message })));

    check_input(&request.file_name, &request.csv_text).map_err(bad_request)?;
    build_preview(&request.csv_text, import_config().preview_rows)
        .map(Json)
        .map_err(|e| bad_request(e.to_string()))
}
