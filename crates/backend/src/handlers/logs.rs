use axum::{extract::Query, http::StatusCode, Json};
use contracts::shared::logger::{CreateLogRequest, LogEntry};
use serde::Deserialize;

use crate::shared::data::db::get_connection;
use crate::shared::logger::repository;

#[derive(Debug, Deserialize)]
pub struct LogFilter {
    pub category: Option<String>,
}

/// GET /api/logs
pub async fn list_all(Query(filter): Query<LogFilter>) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    match repository::list_logs(get_connection(), filter.category.as_deref()).await {
        Ok(logs) => Ok(Json(logs)),
        Err(e) => {
            tracing::error!("Failed to list logs: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/logs
pub async fn create(Json(req): Json<CreateLogRequest>) -> StatusCode {
    match repository::log_event(get_connection(), &req.source, &req.category, &req.message).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// DELETE /api/logs
pub async fn clear_all() -> StatusCode {
    match repository::clear_all_logs(get_connection()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
