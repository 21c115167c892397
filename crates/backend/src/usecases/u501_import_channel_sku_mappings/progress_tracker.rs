use contracts::usecases::u501_import_channel_sku_mappings::progress::{ImportProgress, ImportStage};
use contracts::usecases::u501_import_channel_sku_mappings::response::UploadOutcome;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::batch_upserter::BatchProgress;
use super::observer::UploadObserver;
use crate::domain::a002_channel_sku_mapping::service::bump_revision;

/// Трекер прогресса загрузок (in-memory, для опроса из UI)
#[derive(Clone)]
pub struct ProgressTracker {
    sessions: Arc<RwLock<HashMap<String, ImportProgress>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Создать новую сессию загрузки
    pub fn create_session(&self, session_id: String, file_name: String) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(
            session_id.clone(),
            ImportProgress {
                session_id,
                file_name,
                stage: ImportStage::Idle,
                current_batch: 0,
                total_batches: 0,
                processed: 0,
                total_records: 0,
                outcome: None,
                summary: None,
                started_at: chrono::Utc::now(),
                completed_at: None,
            },
        );
    }

    pub fn get_progress(&self, session_id: &str) -> Option<ImportProgress> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).cloned()
    }

    pub fn set_stage(&self, session_id: &str, stage: ImportStage) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.stage = stage;
        }
    }

    /// Обновить прогресс после пакета
    pub fn update_batch(&self, session_id: &str, batch: &BatchProgress) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.current_batch = batch.batch_index;
            progress.total_batches = batch.total_batches;
            progress.processed = batch.processed;
            progress.total_records = batch.total_records;
        }
    }

    /// Завершить сессию с итогом
    pub fn complete_session(&self, session_id: &str, outcome: UploadOutcome) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.stage = ImportStage::Done;
            progress.processed = outcome.processed_count;
            progress.summary = Some(outcome.summary());
            progress.outcome = Some(outcome);
            progress.completed_at = Some(chrono::Utc::now());
        }
    }

    /// Удалить старые сессии (для очистки памяти)
    pub fn cleanup_old_sessions(&self, max_age_hours: i64) {
        let mut sessions = self.sessions.write().unwrap();
        let now = chrono::Utc::now();
        sessions.retain(|_, progress| match progress.completed_at {
            Some(completed_at) => (now - completed_at).num_hours() < max_age_hours,
            None => true,
        });
    }

    /// Наблюдатель, пишущий ход одной сессии в трекер
    pub fn observer<'a>(&'a self, session_id: &'a str) -> SessionObserver<'a> {
        SessionObserver {
            tracker: self,
            session_id,
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SessionObserver<'a> {
    tracker: &'a ProgressTracker,
    session_id: &'a str,
}

impl UploadObserver for SessionObserver<'_> {
    fn on_stage(&self, stage: ImportStage) {
        tracing::debug!("Import {}: stage {:?}", self.session_id, stage);
        self.tracker.set_stage(self.session_id, stage);
    }

    fn on_batch_completed(&self, progress: &BatchProgress) {
        tracing::info!(
            "Import {}: batch {}/{} done, {} of {} processed",
            self.session_id,
            progress.batch_index,
            progress.total_batches,
            progress.processed,
            progress.total_records
        );
        self.tracker.update_batch(self.session_id, progress);
    }

    fn on_mappings_changed(&self) {
        bump_revision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let tracker = ProgressTracker::new();
        tracker.create_session("s1".into(), "mappings.csv".into());

        let observer = tracker.observer("s1");
        observer.on_stage(ImportStage::Batching);
        observer.on_batch_completed(&BatchProgress {
            batch_index: 1,
            total_batches: 2,
            processed: 1000,
            total_records: 1500,
        });

        let progress = tracker.get_progress("s1").unwrap();
        assert_eq!(progress.stage, ImportStage::Batching);
        assert_eq!(progress.current_batch, 1);
        assert_eq!(progress.processed, 1000);
        assert!(progress.outcome.is_none());

        tracker.complete_session("s1", UploadOutcome::succeeded(1500));
        let progress = tracker.get_progress("s1").unwrap();
        assert_eq!(progress.stage, ImportStage::Done);
        assert_eq!(progress.processed, 1500);
        assert!(progress.completed_at.is_some());
        assert_eq!(progress.summary.as_deref(), Some("Successfully processed 1500 mappings"));
        assert!(progress.outcome.unwrap().success);
    }

    #[test]
    fn test_cleanup_keeps_running_sessions() {
        let tracker = ProgressTracker::new();
        tracker.create_session("running".into(), "a.csv".into());
        tracker.create_session("done".into(), "b.csv".into());
        tracker.complete_session("done", UploadOutcome::succeeded(0));

        tracker.cleanup_old_sessions(0);

        assert!(tracker.get_progress("running").is_some());
        assert!(tracker.get_progress("done").is_none());
    }

    #[test]
    fn test_unknown_session() {
        let tracker = ProgressTracker::new();
        tracker.set_stage("missing", ImportStage::Parsing);
        assert!(tracker.get_progress("missing").is_none());
    }
}
