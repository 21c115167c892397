//! Ошибки хранилища записей с классификацией по типу нарушения.
//!
//! Классификация идет по кодам SQLSTATE (если драйвер их отдает) и по тексту
//! сообщений SQLite, чтобы логика повторов не зависела от одного поставщика.

use thiserror::Error;

/// Тип ошибки хранилища
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Нарушение уникальности или повтор ключа внутри одной команды upsert
    UniqueConflict,
    ForeignKeyViolation,
    CheckViolation,
    MalformedValue,
    /// Таблица (или связанная таблица) отсутствует
    TableNotFound,
    Other,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub code: Option<String>,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Определить тип ошибки по коду и тексту
    pub fn classify(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = code
            .and_then(kind_from_code)
            .unwrap_or_else(|| kind_from_message(&message));

        let mut error = Self::new(kind, message);
        error.code = code.map(str::to_string);
        error
    }

    pub fn is_unique_conflict(&self) -> bool {
        self.kind == StoreErrorKind::UniqueConflict
    }
}

fn kind_from_code(code: &str) -> Option<StoreErrorKind> {
    match code {
        "23505" | "21000" => Some(StoreErrorKind::UniqueConflict),
        "23503" => Some(StoreErrorKind::ForeignKeyViolation),
        "23514" => Some(StoreErrorKind::CheckViolation),
        "22P02" | "22001" | "22007" | "22008" => Some(StoreErrorKind::MalformedValue),
        "42P01" | "PGRST205" => Some(StoreErrorKind::TableNotFound),
        _ => None,
    }
}

fn kind_from_message(message: &str) -> StoreErrorKind {
    let lower = message.to_lowercase();

    if lower.contains("unique constraint")
        || lower.contains("duplicate key")
        || lower.contains("cannot affect row a second time")
    {
        StoreErrorKind::UniqueConflict
    } else if lower.contains("foreign key") {
        StoreErrorKind::ForeignKeyViolation
    } else if lower.contains("check constraint") {
        StoreErrorKind::CheckViolation
    } else if lower.contains("datatype mismatch")
        || lower.contains("invalid input syntax")
        || lower.contains("malformed")
    {
        StoreErrorKind::MalformedValue
    } else if lower.contains("no such table")
        || (lower.contains("relation") && lower.contains("does not exist"))
    {
        StoreErrorKind::TableNotFound
    } else {
        StoreErrorKind::Other
    }
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::classify(None, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sqlite_messages() {
        let cases = [
            (
                "UNIQUE constraint failed: a002_channel_sku_mapping.channel_sku, a002_channel_sku_mapping.channel_name",
                StoreErrorKind::UniqueConflict,
            ),
            ("FOREIGN KEY constraint failed", StoreErrorKind::ForeignKeyViolation),
            (
                "CHECK constraint failed: status IN ('Active', 'Inactive')",
                StoreErrorKind::CheckViolation,
            ),
            ("datatype mismatch", StoreErrorKind::MalformedValue),
            ("no such table: a001_product", StoreErrorKind::TableNotFound),
            ("database is locked", StoreErrorKind::Other),
        ];

        for (message, expected) in cases {
            assert_eq!(StoreError::classify(None, message).kind, expected, "{}", message);
        }
    }

    #[test]
    fn test_classify_postgres_codes() {
        assert_eq!(
            StoreError::classify(
                Some("21000"),
                "ON CONFLICT DO UPDATE command cannot affect row a second time"
            )
            .kind,
            StoreErrorKind::UniqueConflict
        );
        assert_eq!(
            StoreError::classify(Some("23503"), "insert violates fk").kind,
            StoreErrorKind::ForeignKeyViolation
        );
        assert_eq!(
            StoreError::classify(Some("42P01"), "relation \"products\" does not exist").kind,
            StoreErrorKind::TableNotFound
        );
    }

    #[test]
    fn test_unknown_code_falls_back_to_message() {
        let err = StoreError::classify(Some("XX000"), "CHECK constraint failed");
        assert_eq!(err.kind, StoreErrorKind::CheckViolation);
        assert_eq!(err.code.as_deref(), Some("XX000"));
    }
}
