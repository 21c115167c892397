use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // UseCase u501: Import channel SKU mappings
        .route(
            "/api/u501/import/start",
            post(handlers::usecases::u501_start_import),
        )
        .route(
            "/api/u501/import/:session_id/progress",
            get(handlers::usecases::u501_get_progress),
        )
        .route("/api/u501/preview", post(handlers::usecases::u501_preview))
        // A002 Channel SKU mapping handlers
        .route(
            "/api/channel_sku_mapping",
            get(handlers::a002_channel_sku_mapping::list_all)
                .delete(handlers::a002_channel_sku_mapping::delete_by_channel),
        )
        .route(
            "/api/channel_sku_mapping/template",
            get(handlers::a002_channel_sku_mapping::template),
        )
        .route(
            "/api/channel_sku_mapping/export",
            get(handlers::a002_channel_sku_mapping::export),
        )
        .route(
            "/api/channel_sku_mapping/:id",
            delete(handlers::a002_channel_sku_mapping::delete),
        )
        // A001 Product handlers
        .route(
            "/api/product",
            get(handlers::a001_product::list_all).post(handlers::a001_product::upsert),
        )
        .route("/api/product/:sku", get(handlers::a001_product::get_by_sku))
        // Logs handlers
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
}
