use super::{csv_export, repository};
use contracts::domain::a002_channel_sku_mapping::{
    ChannelSkuMapping, ChannelSkuMappingListResponse,
};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::shared::data::db::get_connection;

/// Ревизия списка сопоставлений: растет после каждой загрузки/удаления
static MAPPINGS_REVISION: AtomicU64 = AtomicU64::new(0);

pub fn current_revision() -> u64 {
    MAPPINGS_REVISION.load(Ordering::SeqCst)
}

/// Сигнал открытым представлениям: список нужно перечитать
pub fn bump_revision() -> u64 {
    MAPPINGS_REVISION.fetch_add(1, Ordering::SeqCst) + 1
}

/// Список сопоставлений (опционально по каналу)
pub async fn list(channel_name: Option<&str>) -> anyhow::Result<ChannelSkuMappingListResponse> {
    let revision = current_revision();
    let items = repository::list_all(get_connection(), channel_name).await?;
    Ok(ChannelSkuMappingListResponse { revision, items })
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    let deleted = repository::delete_by_id(get_connection(), id).await?;
    if deleted {
        bump_revision();
    }
    Ok(deleted)
}

/// Удалить все сопоставления канала
pub async fn delete_by_channel(channel_name: &str) -> anyhow::Result<u64> {
    let deleted = repository::delete_by_channel(get_connection(), channel_name).await?;
    tracing::info!(
        "Deleted {} channel SKU mappings for channel '{}'",
        deleted,
        channel_name
    );
    if deleted > 0 {
        bump_revision();
    }
    Ok(deleted)
}

/// Текущий список в виде CSV
pub async fn export_csv() -> anyhow::Result<String> {
    let items: Vec<ChannelSkuMapping> = repository::list_all(get_connection(), None).await?;
    csv_export::export_csv(&items)
}
