use contracts::domain::a002_channel_sku_mapping::MappingRecord;
use std::collections::HashSet;

use crate::domain::a002_channel_sku_mapping::store::MappingStore;
use crate::shared::data::StoreErrorKind;

/// Результат проверки master SKU по каталогу товаров
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterSkuCheck {
    /// Проверка отключена запросом
    Skipped,
    /// Все master SKU найдены
    Passed { checked: usize },
    /// Таблица товаров отсутствует: проверка пропущена, загрузка продолжается
    Unavailable { reason: String },
    /// Ненайденные master SKU (в порядке первого появления)
    Missing(Vec<String>),
    /// Поиск не удался по другой причине: загрузка останавливается
    LookupFailed(String),
}

/// Сообщение об отсутствующем master SKU
pub fn missing_sku_message(sku: &str) -> String {
    format!("Master SKU \"{}\" not found in products table", sku)
}

/// Уникальные master SKU в порядке первого появления
pub fn collect_master_skus(records: &[MappingRecord]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|record| seen.insert(record.master_sku.as_str()))
        .map(|record| record.master_sku.clone())
        .collect()
}

/// Проверить, что все master SKU есть в каталоге.
///
/// Один запрос на все уникальные значения.
pub async fn check_master_skus(
    store: &dyn MappingStore,
    records: &[MappingRecord],
    skip: bool,
) -> MasterSkuCheck {
    if skip {
        tracing::info!("Master SKU validation skipped by request");
        return MasterSkuCheck::Skipped;
    }

    let skus = collect_master_skus(records);
    if skus.is_empty() {
        return MasterSkuCheck::Passed { checked: 0 };
    }

    match store.find_existing_master_skus(&skus).await {
        Ok(existing) => {
            let missing: Vec<String> = skus
                .iter()
                .filter(|sku| !existing.contains(*sku))
                .cloned()
                .collect();
            if missing.is_empty() {
                MasterSkuCheck::Passed { checked: skus.len() }
            } else {
                tracing::warn!("{} master SKUs not found in products table", missing.len());
                MasterSkuCheck::Missing(missing)
            }
        }
        Err(e) if e.kind == StoreErrorKind::TableNotFound => {
            tracing::warn!("Products table not available, skipping master SKU validation: {}", e);
            MasterSkuCheck::Unavailable { reason: e.message }
        }
        Err(e) => {
            tracing::error!("Master SKU lookup failed: {}", e);
            MasterSkuCheck::LookupFailed(e.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::StoreError;
    use crate::usecases::u501_import_channel_sku_mappings::test_support::InMemoryMappingStore;
    use contracts::domain::a002_channel_sku_mapping::MappingStatus;

    fn record(channel_sku: &str, master_sku: &str) -> MappingRecord {
        MappingRecord::new(channel_sku, "Amazon", master_sku, MappingStatus::Active)
    }

    #[test]
    fn test_collect_master_skus_first_seen_order() {
        let records = vec![
            record("A", "SKU-2"),
            record("B", "SKU-1"),
            record("C", "SKU-2"),
            record("D", "SKU-3"),
        ];
        assert_eq!(collect_master_skus(&records), vec!["SKU-2", "SKU-1", "SKU-3"]);
    }

    #[tokio::test]
    async fn test_missing_skus_reported_in_order() {
        let store = InMemoryMappingStore::with_products(&["SKU-1"]);
        let records = vec![record("A", "SKU-9"), record("B", "SKU-1"), record("C", "SKU-7")];

        let check = check_master_skus(&store, &records, false).await;

        assert_eq!(
            check,
            MasterSkuCheck::Missing(vec!["SKU-9".to_string(), "SKU-7".to_string()])
        );
        assert_eq!(store.lookup_calls(), 1);
    }

    #[tokio::test]
    async fn test_single_lookup_for_distinct_values() {
        let store = InMemoryMappingStore::with_products(&["SKU-1", "SKU-2"]);
        let records: Vec<_> = (0..50)
            .map(|i| record(&format!("CH-{}", i), if i % 2 == 0 { "SKU-1" } else { "SKU-2" }))
            .collect();

        let check = check_master_skus(&store, &records, false).await;

        assert_eq!(check, MasterSkuCheck::Passed { checked: 2 });
        assert_eq!(store.lookup_calls(), 1);
        assert_eq!(store.looked_up_skus(), vec![vec!["SKU-1".to_string(), "SKU-2".to_string()]]);
    }

    #[tokio::test]
    async fn test_skip_does_not_touch_store() {
        let store = InMemoryMappingStore::with_products(&[]);
        let check = check_master_skus(&store, &[record("A", "SKU-1")], true).await;
        assert_eq!(check, MasterSkuCheck::Skipped);
        assert_eq!(store.lookup_calls(), 0);
    }

    #[tokio::test]
    async fn test_table_not_found_allows_writes() {
        let store = InMemoryMappingStore::with_products(&[]).fail_lookup(StoreError::new(
            StoreErrorKind::TableNotFound,
            "no such table: a001_product",
        ));
        let check = check_master_skus(&store, &[record("A", "SKU-1")], false).await;
        assert_eq!(
            check,
            MasterSkuCheck::Unavailable {
                reason: "no such table: a001_product".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_other_lookup_error_blocks_writes() {
        let store = InMemoryMappingStore::with_products(&[])
            .fail_lookup(StoreError::new(StoreErrorKind::Other, "database is locked"));
        let check = check_master_skus(&store, &[record("A", "SKU-1")], false).await;
        assert_eq!(check, MasterSkuCheck::LookupFailed("database is locked".to_string()));
    }
}
