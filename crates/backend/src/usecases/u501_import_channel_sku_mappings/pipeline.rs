//! Конвейер загрузки сопоставлений: разбор, валидация, проверка master SKU,
//! дедупликация и пакетная запись.
//!
//! Все ошибки остаются внутри конвейера и возвращаются в `UploadOutcome`.
//! Любая невалидная строка или отсутствующий master SKU останавливают
//! загрузку до первой записи в хранилище.

use contracts::domain::a002_channel_sku_mapping::csv::{parse_csv, validate_row};
use contracts::domain::a002_channel_sku_mapping::MappingRecord;
use contracts::usecases::u501_import_channel_sku_mappings::progress::ImportStage;
use contracts::usecases::u501_import_channel_sku_mappings::response::UploadOutcome;

use super::batch_upserter::BatchUpserter;
use super::dedup::dedup_last_wins;
use super::master_sku_check::{check_master_skus, missing_sku_message, MasterSkuCheck};
use super::observer::UploadObserver;
use crate::domain::a002_channel_sku_mapping::store::MappingStore;

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub skip_master_sku_validation: bool,
    pub batch_size: usize,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            skip_master_sku_validation: false,
            batch_size: 1000,
        }
    }
}

/// Проверка входа до запуска конвейера
pub fn check_input(file_name: &str, csv_text: &str) -> Result<(), String> {
    if !file_name.trim().to_lowercase().ends_with(".csv") {
        return Err("Please select a CSV file".to_string());
    }
    if csv_text.trim_start_matches('\u{FEFF}').trim().is_empty() {
        return Err("CSV file is empty".to_string());
    }
    Ok(())
}

/// Выполнить загрузку целиком
pub async fn run_upload(
    csv_text: &str,
    options: &UploadOptions,
    store: &dyn MappingStore,
    observer: &dyn UploadObserver,
) -> UploadOutcome {
    observer.on_stage(ImportStage::Parsing);
    let parsed = match parse_csv(csv_text) {
        Ok(parsed) => parsed,
        Err(e) => return finish(observer, UploadOutcome::failed(e.to_string(), Vec::new())),
    };
    tracing::info!("Parsed {} data rows", parsed.rows.len());

    observer.on_stage(ImportStage::Validating);
    let mut records: Vec<MappingRecord> = Vec::with_capacity(parsed.rows.len());
    let mut row_errors = Vec::new();
    for row in &parsed.rows {
        match validate_row(&row.fields) {
            Ok(record) => records.push(record),
            Err(e) => row_errors.push(format!("Row {}: {}", row.line_number, e)),
        }
    }
    if !row_errors.is_empty() {
        let message = format!("Validation failed: {} invalid rows", row_errors.len());
        return finish(observer, UploadOutcome::failed(message, row_errors));
    }

    if !options.skip_master_sku_validation {
        observer.on_stage(ImportStage::KeyChecking);
    }
    match check_master_skus(store, &records, options.skip_master_sku_validation).await {
        MasterSkuCheck::Missing(missing) => {
            let message = format!(
                "Master SKU validation failed: {} master SKUs not found",
                missing.len()
            );
            let errors = missing.iter().map(|sku| missing_sku_message(sku)).collect();
            return finish(observer, UploadOutcome::failed(message, errors));
        }
        MasterSkuCheck::LookupFailed(reason) => {
            let message = format!("Master SKU validation failed: {}", reason);
            return finish(observer, UploadOutcome::failed(message, vec![reason]));
        }
        MasterSkuCheck::Passed { checked } => {
            tracing::info!("All {} master SKUs found in products table", checked);
        }
        MasterSkuCheck::Unavailable { reason } => {
            tracing::debug!("Upload continues without master SKU validation ({})", reason);
        }
        MasterSkuCheck::Skipped => {}
    }

    observer.on_stage(ImportStage::Deduplicating);
    let deduped = dedup_last_wins(records);
    if deduped.collapsed > 0 {
        tracing::info!(
            "{} duplicate rows collapsed, {} unique mappings remain",
            deduped.collapsed,
            deduped.records.len()
        );
    }

    observer.on_stage(ImportStage::Batching);
    let total = deduped.records.len();
    let report = BatchUpserter::new(store, options.batch_size)
        .run(&deduped.records, observer)
        .await;

    tracing::info!(
        "{} batches done: {} of {} mappings written, {} errors",
        report.batches,
        report.processed,
        total,
        report.errors.len()
    );

    let outcome = if report.errors.is_empty() {
        UploadOutcome::succeeded(report.processed)
    } else {
        UploadOutcome::partial(report.processed, total, report.errors)
    };
    finish(observer, outcome)
}

fn finish(observer: &dyn UploadObserver, outcome: UploadOutcome) -> UploadOutcome {
    observer.on_stage(ImportStage::Done);
    outcome
}
