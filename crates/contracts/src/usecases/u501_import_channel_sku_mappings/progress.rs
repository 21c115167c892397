use serde::{Deserialize, Serialize};

use super::response::UploadOutcome;

/// Этап конвейера загрузки
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImportStage {
    Idle,
    Parsing,
    Validating,
    KeyChecking,
    Deduplicating,
    Batching,
    Done,
}

/// Прогресс загрузки (in-memory, для опроса из UI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProgress {
    #[serde(rename = "sessionId")]
    pub session_id: String,

    #[serde(rename = "fileName")]
    pub file_name: String,

    pub stage: ImportStage,

    /// Номер последнего завершенного пакета (с 1)
    #[serde(rename = "currentBatch")]
    pub current_batch: usize,

    #[serde(rename = "totalBatches")]
    pub total_batches: usize,

    /// Успешно записано на текущий момент
    pub processed: usize,

    /// Уникальных записей к загрузке (после дедупликации)
    #[serde(rename = "totalRecords")]
    pub total_records: usize,

    /// Итог - заполняется на этапе Done
    pub outcome: Option<UploadOutcome>,

    /// Текст для пользователя (`UploadOutcome::summary`), заполняется вместе с `outcome`
    pub summary: Option<String>,

    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,

    #[serde(rename = "completedAt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}
