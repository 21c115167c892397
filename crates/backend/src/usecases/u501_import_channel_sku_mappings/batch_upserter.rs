use contracts::domain::a002_channel_sku_mapping::MappingRecord;
use serde::Serialize;

use super::dedup::dedup_last_wins;
use super::observer::UploadObserver;
use crate::domain::a002_channel_sku_mapping::store::MappingStore;
use crate::shared::data::{StoreError, StoreErrorKind};

/// Прогресс после очередного пакета
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// Номер пакета, с 1
    pub batch_index: usize,
    pub total_batches: usize,
    /// Записано на текущий момент (накопительно)
    pub processed: usize,
    pub total_records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchUpsertReport {
    pub processed: usize,
    pub errors: Vec<String>,
    pub batches: usize,
}

pub fn batch_count(total_records: usize, batch_size: usize) -> usize {
    total_records.div_ceil(batch_size.max(1))
}

/// Пакетная запись сопоставлений.
///
/// Пакеты идут последовательно. Ошибка пакета не останавливает следующие:
/// она превращается в строку диагностики, а успехи продолжают суммироваться.
pub struct BatchUpserter<'a> {
    store: &'a dyn MappingStore,
    batch_size: usize,
}

impl<'a> BatchUpserter<'a> {
    pub fn new(store: &'a dyn MappingStore, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    pub async fn run(
        &self,
        records: &[MappingRecord],
        observer: &dyn UploadObserver,
    ) -> BatchUpsertReport {
        let total_batches = batch_count(records.len(), self.batch_size);
        let mut report = BatchUpsertReport {
            batches: total_batches,
            ..Default::default()
        };

        for (index, chunk) in records.chunks(self.batch_size).enumerate() {
            let batch_number = index + 1;
            let batch = dedup_last_wins(chunk.to_vec());
            if batch.collapsed > 0 {
                tracing::warn!(
                    "Batch {}: {} duplicate keys collapsed before upsert",
                    batch_number,
                    batch.collapsed
                );
            }

            match self.store.upsert_mappings(&batch.records).await {
                Ok(written) => {
                    tracing::debug!("Batch {}/{}: {} records written", batch_number, total_batches, written);
                    report.processed += written;
                }
                Err(e) if e.is_unique_conflict() => {
                    tracing::warn!(
                        "Batch {}: conflict on upsert, retrying record by record: {}",
                        batch_number,
                        e
                    );
                    self.upsert_one_by_one(&batch.records, &mut report).await;
                }
                Err(e) => {
                    tracing::error!(
                        "Batch {} failed ({:?}, code {}): {}",
                        batch_number,
                        e.kind,
                        e.code.as_deref().unwrap_or("-"),
                        e
                    );
                    report
                        .errors
                        .push(format!("Batch {}: {}", batch_number, describe_store_error(&e)));
                }
            }

            observer.on_batch_completed(&BatchProgress {
                batch_index: batch_number,
                total_batches,
                processed: report.processed,
                total_records: records.len(),
            });
        }

        if total_batches > 0 {
            observer.on_mappings_changed();
        }

        report
    }

    async fn upsert_one_by_one(&self, records: &[MappingRecord], report: &mut BatchUpsertReport) {
        for record in records {
            match self.store.upsert_mappings(std::slice::from_ref(record)).await {
                Ok(written) => report.processed += written,
                Err(e) => {
                    tracing::warn!(
                        "Record {} / {} failed: {}",
                        record.channel_sku,
                        record.channel_name,
                        e
                    );
                    report.errors.push(format!(
                        "Row {} / {}: {}",
                        record.channel_sku,
                        record.channel_name,
                        describe_store_error(&e)
                    ));
                }
            }
        }
    }
}

/// Понятное пользователю описание ошибки хранилища
pub fn describe_store_error(error: &StoreError) -> String {
    match error.kind {
        StoreErrorKind::ForeignKeyViolation => {
            "One or more Master SKUs do not exist in products table".to_string()
        }
        StoreErrorKind::CheckViolation => {
            "Invalid status value. Status must be 'Active' or 'Inactive'".to_string()
        }
        StoreErrorKind::MalformedValue => {
            "Invalid data format. Please check your CSV file".to_string()
        }
        StoreErrorKind::UniqueConflict
        | StoreErrorKind::TableNotFound
        | StoreErrorKind::Other => error.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_import_channel_sku_mappings::test_support::{
        InMemoryMappingStore, NoopObserver,
    };
    use contracts::domain::a002_channel_sku_mapping::MappingStatus;

    fn records(count: usize) -> Vec<MappingRecord> {
        (0..count)
            .map(|i| MappingRecord::new(format!("CH-{}", i), "Amazon", "SKU-1", MappingStatus::Active))
            .collect()
    }

    #[test]
    fn test_batch_count() {
        assert_eq!(batch_count(0, 1000), 0);
        assert_eq!(batch_count(1, 1000), 1);
        assert_eq!(batch_count(1000, 1000), 1);
        assert_eq!(batch_count(1001, 1000), 2);
        assert_eq!(batch_count(2500, 1000), 3);
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_stop_later_batches() {
        let store = InMemoryMappingStore::with_products(&["SKU-1"]).fail_upsert_call(
            1,
            StoreError::new(StoreErrorKind::Other, "database is locked"),
        );
        let input = records(25);

        let report = BatchUpserter::new(&store, 10).run(&input, &NoopObserver).await;

        assert_eq!(store.upsert_call_sizes(), vec![10, 10, 5]);
        assert_eq!(report.processed, 15);
        assert_eq!(report.errors, vec!["Batch 2: database is locked".to_string()]);
        assert_eq!(report.batches, 3);
        assert!(store.row("CH-24", "Amazon").is_some());
        assert!(store.row("CH-12", "Amazon").is_none());
    }

    #[tokio::test]
    async fn test_unique_conflict_falls_back_to_single_records() {
        let store = InMemoryMappingStore::with_products(&["SKU-1"])
            .enforce_foreign_keys()
            .fail_upsert_call(
                0,
                StoreError::classify(
                    None,
                    "UNIQUE constraint failed: a002_channel_sku_mapping.channel_sku",
                ),
            );
        let mut input = records(3);
        input[1].master_sku = "SKU-404".to_string();

        let report = BatchUpserter::new(&store, 1000).run(&input, &NoopObserver).await;

        assert_eq!(store.upsert_call_sizes(), vec![3, 1, 1, 1]);
        assert_eq!(report.processed, 2);
        assert_eq!(
            report.errors,
            vec!["Row CH-1 / Amazon: One or more Master SKUs do not exist in products table".to_string()]
        );
    }

    #[tokio::test]
    async fn test_constraint_errors_are_translated() {
        let store = InMemoryMappingStore::with_products(&[])
            .fail_upsert_call(0, StoreError::classify(Some("23503"), "fk"))
            .fail_upsert_call(1, StoreError::classify(Some("23514"), "check"))
            .fail_upsert_call(2, StoreError::classify(Some("22P02"), "bad input"));

        let report = BatchUpserter::new(&store, 1).run(&records(3), &NoopObserver).await;

        assert_eq!(report.processed, 0);
        assert_eq!(
            report.errors,
            vec![
                "Batch 1: One or more Master SKUs do not exist in products table".to_string(),
                "Batch 2: Invalid status value. Status must be 'Active' or 'Inactive'".to_string(),
                "Batch 3: Invalid data format. Please check your CSV file".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicates_inside_batch_are_collapsed() {
        let store = InMemoryMappingStore::with_products(&[]);
        let input = vec![
            MappingRecord::new("A", "Amazon", "SKU-1", MappingStatus::Active),
            MappingRecord::new("A", "Amazon", "SKU-2", MappingStatus::Inactive),
        ];

        let report = BatchUpserter::new(&store, 1000).run(&input, &NoopObserver).await;

        assert!(report.errors.is_empty());
        assert_eq!(store.upsert_call_sizes(), vec![1]);
        assert_eq!(store.row("A", "Amazon").unwrap().master_sku, "SKU-2");
    }
}
