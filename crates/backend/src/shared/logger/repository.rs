use chrono::Utc;
use contracts::shared::logger::LogEntry;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::try_get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub category: String,
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogEntry {
    fn from(m: Model) -> Self {
        LogEntry {
            id: m.id,
            timestamp: m.timestamp,
            source: m.source,
            category: m.category,
            message: m.message,
        }
    }
}

/// Добавить запись в лог без ожидания (внутренняя функция)
pub fn log_event_internal(source: &str, category: &str, message: &str) {
    let Some(db) = try_get_connection() else {
        tracing::debug!("[{}] {}", category, message);
        return;
    };
    let source = source.to_string();
    let category = category.to_string();
    let message = message.to_string();

    tokio::spawn(async move {
        if let Err(e) = log_event(db, &source, &category, &message).await {
            tracing::warn!("Failed to log event: {}", e);
        }
    });
}

/// Несколько записей одной задачей, строго по порядку
pub fn log_events_internal(source: &str, category: &str, messages: Vec<String>) {
    let Some(db) = try_get_connection() else {
        for message in &messages {
            tracing::debug!("[{}] {}", category, message);
        }
        return;
    };
    let source = source.to_string();
    let category = category.to_string();

    tokio::spawn(async move {
        if let Err(e) = log_events(db, &source, &category, &messages).await {
            tracing::warn!("Failed to log events: {}", e);
        }
    });
}

/// Записать сообщения последовательно: id растут в порядке списка
pub async fn log_events(
    db: &DatabaseConnection,
    source: &str,
    category: &str,
    messages: &[String],
) -> anyhow::Result<()> {
    for message in messages {
        log_event(db, source, category, message).await?;
    }
    Ok(())
}

/// Добавить запись в лог
pub async fn log_event(
    db: &DatabaseConnection,
    source: &str,
    category: &str,
    message: &str,
) -> anyhow::Result<()> {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        timestamp: Set(now),
        source: Set(source.to_string()),
        category: Set(category.to_string()),
        message: Set(message.to_string()),
    };

    active.insert(db).await?;
    Ok(())
}

/// Получить записи лога (новые сверху), опционально по категории
pub async fn list_logs(
    db: &DatabaseConnection,
    category: Option<&str>,
) -> anyhow::Result<Vec<LogEntry>> {
    let mut query = Entity::find().order_by_desc(Column::Id);
    if let Some(category) = category {
        query = query.filter(Column::Category.eq(category));
    }
    let logs = query.all(db).await?.into_iter().map(Into::into).collect();
    Ok(logs)
}

/// Очистить все записи лога
pub async fn clear_all_logs(db: &DatabaseConnection) -> anyhow::Result<u64> {
    let result = Entity::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_log_and_filter_by_category() {
        let db = connect_in_memory().await;
        log_event(&db, "server", "u501", "Batch 1: ok").await.unwrap();
        log_event(&db, "server", "startup", "started").await.unwrap();
        log_event(&db, "client", "u501", "Batch 2: failed").await.unwrap();

        let all = list_logs(&db, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].message, "Batch 2: failed");

        let import_logs = list_logs(&db, Some("u501")).await.unwrap();
        assert_eq!(import_logs.len(), 2);

        assert_eq!(clear_all_logs(&db).await.unwrap(), 3);
        assert!(list_logs(&db, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_events_preserve_order() {
        let db = connect_in_memory().await;
        let messages: Vec<String> = (1..=50).map(|i| format!("[{}/50] error {}", i, i)).collect();

        log_events(&db, "server", "u501", &messages).await.unwrap();

        let logged: Vec<String> = list_logs(&db, Some("u501"))
            .await
            .unwrap()
            .into_iter()
            .rev()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(logged, messages);
    }
}
