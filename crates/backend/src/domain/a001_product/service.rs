use super::repository;
use contracts::domain::a001_product::{Product, ProductDto};

use crate::shared::data::db::get_connection;

/// Список товаров каталога (master SKU)
pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all(get_connection()).await
}

pub async fn get_by_sku(sku: &str) -> anyhow::Result<Option<Product>> {
    repository::get_by_sku(get_connection(), sku).await
}

/// Создание или обновление товара по SKU
pub async fn upsert(dto: ProductDto) -> anyhow::Result<()> {
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    repository::upsert(get_connection(), &dto).await
}
