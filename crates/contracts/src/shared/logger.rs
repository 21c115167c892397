use serde::{Deserialize, Serialize};

/// Источник записи журнала
pub const SOURCE_SERVER: &str = "server";
pub const SOURCE_CLIENT: &str = "client";

/// Запись системного журнала (диагностический канал: полный список ошибок
/// загрузки пишется сюда, даже если пользователю показана только сводка)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub category: String,
    pub message: String,
}

/// DTO для создания новой записи лога (из клиента)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogRequest {
    #[serde(default = "default_source")]
    pub source: String,
    pub category: String,
    pub message: String,
}

fn default_source() -> String {
    SOURCE_CLIENT.to_string()
}
