use serde::{Deserialize, Serialize};

/// Сколько ошибок показывать пользователю целиком
pub const MAX_DISPLAYED_ERRORS: usize = 3;

/// Итоговое состояние загрузки
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadStatus {
    /// Все записи сохранены
    Success,
    /// Часть пакетов/записей не сохранилась
    Partial,
    /// Валидация или проверка master SKU не пройдена, записи не выполнялись
    Failed,
}

/// Итог одной загрузки.
///
/// `success == true` только при пустом `errors`, и тогда `processed_count`
/// равен числу уникальных валидных записей.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub success: bool,
    pub status: UploadStatus,
    pub message: String,
    pub errors: Vec<String>,

    #[serde(rename = "processedCount")]
    pub processed_count: usize,
}

impl UploadOutcome {
    pub fn succeeded(processed_count: usize) -> Self {
        Self {
            success: true,
            status: UploadStatus::Success,
            message: format!("Successfully processed {} mappings", processed_count),
            errors: Vec::new(),
            processed_count,
        }
    }

    pub fn partial(processed_count: usize, total: usize, errors: Vec<String>) -> Self {
        Self {
            success: false,
            status: UploadStatus::Partial,
            message: format!(
                "Processed {} of {} mappings, {} errors",
                processed_count,
                total,
                errors.len()
            ),
            errors,
            processed_count,
        }
    }

    /// Отказ до записи в хранилище
    pub fn failed(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            status: UploadStatus::Failed,
            message: message.into(),
            errors,
            processed_count: 0,
        }
    }

    /// Текст для пользователя: сообщение и до трех ошибок, остальные - числом
    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return self.message.clone();
        }

        let mut lines = vec![self.message.clone()];
        lines.extend(self.errors.iter().take(MAX_DISPLAYED_ERRORS).cloned());
        if self.errors.len() > MAX_DISPLAYED_ERRORS {
            lines.push(format!(
                "... and {} more errors",
                self.errors.len() - MAX_DISPLAYED_ERRORS
            ));
        }
        lines.join("\n")
    }
}

/// Ответ на запуск загрузки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,

    pub status: ImportStartStatus,

    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImportStartStatus {
    Started,
    Failed,
}
