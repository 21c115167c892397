pub mod repository;

use contracts::shared::logger::SOURCE_SERVER;
use repository::{log_event_internal, log_events_internal};

/// Логирование события на сервере (в таблицу system_log, асинхронно)
///
/// # Примеры
/// ```ignore
/// logger::log("startup", "Сервер запущен");
/// logger::log("u501", "Batch 2: FOREIGN KEY constraint failed");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal(SOURCE_SERVER, category, message);
}

/// Записать заголовок и полный список ошибок одной операции.
/// Пользователь видит только сводку, здесь остается все.
/// Записи идут одной задачей и в исходном порядке.
pub fn log_errors(category: &str, header: &str, errors: Vec<String>) {
    log_events_internal(SOURCE_SERVER, category, error_lines(header, errors));
}

fn error_lines(header: &str, errors: Vec<String>) -> Vec<String> {
    let total = errors.len();
    std::iter::once(header.to_string())
        .chain(
            errors
                .into_iter()
                .enumerate()
                .map(|(idx, error)| format!("[{}/{}] {}", idx + 1, total, error)),
        )
        .collect()
}
