use super::pipeline::{check_input, run_upload, UploadOptions};
use super::progress_tracker::ProgressTracker;
use crate::domain::a002_channel_sku_mapping::store::MappingStore;
use crate::shared::config::ImportConfig;
use crate::shared::logger;
use anyhow::Result;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_channel_sku_mappings::{
    ImportChannelSkuMappings, ImportProgress, ImportRequest, ImportResponse, ImportStartStatus,
    UploadStatus,
};
use std::sync::Arc;
use uuid::Uuid;

/// Сколько часов хранить завершенные сессии в трекере
const SESSION_RETENTION_HOURS: i64 = 24;

/// Executor для UseCase загрузки сопоставлений SKU каналов
#[derive(Clone)]
pub struct ImportExecutor {
    progress_tracker: Arc<ProgressTracker>,
    store: Arc<dyn MappingStore>,
    config: ImportConfig,
}

impl ImportExecutor {
    pub fn new(
        progress_tracker: Arc<ProgressTracker>,
        store: Arc<dyn MappingStore>,
        config: ImportConfig,
    ) -> Self {
        Self {
            progress_tracker,
            store,
            config,
        }
    }

    /// Запустить загрузку (создает async task и возвращает session_id)
    pub async fn start_import(&self, request: ImportRequest) -> Result<ImportResponse> {
        tracing::info!(
            "Starting channel SKU mapping import from '{}' ({} bytes)",
            request.file_name,
            request.csv_text.len()
        );

        if let Err(message) = check_input(&request.file_name, &request.csv_text) {
            tracing::warn!("Import rejected: {}", message);
            return Ok(ImportResponse {
                session_id: String::new(),
                status: ImportStartStatus::Failed,
                message,
            });
        }

        self.progress_tracker.cleanup_old_sessions(SESSION_RETENTION_HOURS);

        let session_id = Uuid::new_v4().to_string();
        self.progress_tracker
            .create_session(session_id.clone(), request.file_name.clone());

        let self_clone = self.clone();
        let session_id_clone = session_id.clone();
        tokio::spawn(async move {
            self_clone.run_session(&session_id_clone, &request).await;
        });

        Ok(ImportResponse {
            session_id,
            status: ImportStartStatus::Started,
            message: "Загрузка запущена".to_string(),
        })
    }

    pub fn get_progress(&self, session_id: &str) -> Option<ImportProgress> {
        self.progress_tracker.get_progress(session_id)
    }

    fn options_for(&self, request: &ImportRequest) -> UploadOptions {
        let skip = request
            .skip_master_sku_validation
            .unwrap_or(!self.config.validate_master_sku);
        UploadOptions {
            skip_master_sku_validation: skip,
            batch_size: self.config.batch_size,
        }
    }

    /// Выполнить загрузку в рамках сессии
    async fn run_session(&self, session_id: &str, request: &ImportRequest) {
        let started = std::time::Instant::now();
        let options = self.options_for(request);
        let observer = self.progress_tracker.observer(session_id);

        let outcome = run_upload(&request.csv_text, &options, self.store.as_ref(), &observer).await;

        tracing::info!(
            "Import {} finished in {}ms: {:?}, {} processed, {} errors",
            session_id,
            started.elapsed().as_millis(),
            outcome.status,
            outcome.processed_count,
            outcome.errors.len()
        );

        let category = ImportChannelSkuMappings::log_category();
        match outcome.status {
            UploadStatus::Success => logger::log(
                category,
                &format!("{}: {}", request.file_name, outcome.message),
            ),
            UploadStatus::Partial | UploadStatus::Failed => logger::log_errors(
                category,
                &format!("{}: {}", request.file_name, outcome.message),
                outcome.errors.clone(),
            ),
        }

        self.progress_tracker.complete_session(session_id, outcome);
    }
}
