use async_trait::async_trait;
use contracts::domain::a002_channel_sku_mapping::MappingRecord;
use sea_orm::DatabaseConnection;
use std::collections::HashSet;

use super::repository;
use crate::domain::a001_product;
use crate::shared::data::StoreError;

/// Хранилище, с которым работает конвейер загрузки сопоставлений
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Какие из переданных master SKU есть в каталоге товаров
    async fn find_existing_master_skus(
        &self,
        skus: &[String],
    ) -> Result<HashSet<String>, StoreError>;

    /// Upsert пакета по ключу (channel_sku, channel_name).
    /// Возвращает число записанных записей.
    async fn upsert_mappings(&self, records: &[MappingRecord]) -> Result<usize, StoreError>;
}

/// Реализация поверх SQLite (sea-orm)
#[derive(Clone)]
pub struct SeaOrmMappingStore {
    db: DatabaseConnection,
}

impl SeaOrmMappingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MappingStore for SeaOrmMappingStore {
    async fn find_existing_master_skus(
        &self,
        skus: &[String],
    ) -> Result<HashSet<String>, StoreError> {
        a001_product::repository::find_existing_skus(&self.db, skus)
            .await
            .map_err(StoreError::from)
    }

    async fn upsert_mappings(&self, records: &[MappingRecord]) -> Result<usize, StoreError> {
        repository::upsert_many(&self.db, records)
            .await
            .map_err(StoreError::from)?;
        Ok(records.len())
    }
}
