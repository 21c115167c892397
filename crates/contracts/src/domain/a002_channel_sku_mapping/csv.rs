//! Разбор и валидация CSV файла сопоставлений SKU каналов.
//!
//! Формат: `channel_sku, channel_name, master_sku, status?`, первая непустая
//! строка - заголовок. Поля разделяются запятой без поддержки кавычек вокруг
//! запятых и переносов строк внутри значений: кавычки только срезаются с краев.

use super::aggregate::{MappingRecord, MappingStatus, ParsedRow};

/// Заголовок шаблона и экспорта
pub const CSV_HEADERS: [&str; 4] = ["Channel_SKU", "Channel_Name", "Master_SKU", "Status"];

/// Имя файла шаблона для скачивания
pub const TEMPLATE_FILE_NAME: &str = "channel_sku_mappings_template.csv";

/// Сколько строк данных показывать в предпросмотре
pub const DEFAULT_PREVIEW_ROWS: usize = 30;

/// Минимальное число колонок: channel_sku, channel_name, master_sku
pub const MIN_COLUMNS: usize = 3;

const TEMPLATE_ROWS: [[&str; 4]; 3] = [
    ["AMZ-12345", "Amazon", "PROD-001", "Active"],
    ["WB-98765", "Wildberries", "PROD-002", "Active"],
    ["OZ-55501", "Ozon", "PROD-001", "Inactive"],
];

// ============================================================================
// Errors
// ============================================================================

/// Ошибка разбора файла целиком
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvParseError {
    /// Меньше двух непустых строк (нет заголовка или данных)
    EmptyFile,
}

impl std::fmt::Display for CsvParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvParseError::EmptyFile => write!(
                f,
                "CSV file must contain a header row and at least one data row"
            ),
        }
    }
}

impl std::error::Error for CsvParseError {}

/// Ошибка валидации одной строки
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValidationError {
    InsufficientColumns,
    MissingRequiredFields,
    InvalidStatus(String),
}

impl std::fmt::Display for RowValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowValidationError::InsufficientColumns => write!(f, "Insufficient columns"),
            RowValidationError::MissingRequiredFields => write!(f, "Missing required fields"),
            RowValidationError::InvalidStatus(value) => write!(
                f,
                "Invalid status \"{}\" (must be Active or Inactive)",
                value
            ),
        }
    }
}

impl std::error::Error for RowValidationError {}

// ============================================================================
// Parser
// ============================================================================

/// Строка данных CSV вместе с номером строки в исходном файле (с 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line_number: usize,
    pub fields: Vec<String>,
}

/// Результат разбора файла
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    pub header: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// Разбирает текст CSV в упорядоченный список строк.
///
/// Пустые (после trim) строки отбрасываются, первая оставшаяся считается
/// заголовком. Число колонок здесь не проверяется - это делает валидатор.
pub fn parse_csv(text: &str) -> Result<ParsedCsv, CsvParseError> {
    let text = text.trim_start_matches('\u{FEFF}');

    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(CsvParseError::EmptyFile)?;
    let header = split_fields(header_line);

    let rows: Vec<CsvRow> = lines
        .map(|(idx, line)| CsvRow {
            line_number: idx + 1,
            fields: split_fields(line),
        })
        .collect();

    if rows.is_empty() {
        return Err(CsvParseError::EmptyFile);
    }

    Ok(ParsedCsv { header, rows })
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(clean_field).collect()
}

fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

// ============================================================================
// Validator
// ============================================================================

/// Проверяет одну строку и строит из нее запись.
///
/// Порядок проверок: число колонок, обязательные поля, статус.
/// Пустая или отсутствующая 4-я колонка означает `Active`.
pub fn validate_row(fields: &[String]) -> Result<MappingRecord, RowValidationError> {
    if fields.len() < MIN_COLUMNS {
        return Err(RowValidationError::InsufficientColumns);
    }

    let channel_sku = fields[0].trim();
    let channel_name = fields[1].trim();
    let master_sku = fields[2].trim();

    if channel_sku.is_empty() || channel_name.is_empty() || master_sku.is_empty() {
        return Err(RowValidationError::MissingRequiredFields);
    }

    let status = match fields.get(3).map(|s| s.trim()) {
        None | Some("") => MappingStatus::Active,
        Some(raw) => MappingStatus::parse(raw)
            .ok_or_else(|| RowValidationError::InvalidStatus(raw.to_string()))?,
    };

    Ok(MappingRecord::new(channel_sku, channel_name, master_sku, status))
}

/// Строка предпросмотра: поля как есть плюс признак валидности
pub fn preview_row(fields: &[String]) -> ParsedRow {
    let field = |idx: usize| fields.get(idx).cloned().unwrap_or_default();

    let (is_valid, error, status) = match validate_row(fields) {
        Ok(record) => (true, None, record.status.as_str().to_string()),
        Err(e) => {
            let raw_status = field(3);
            let status = if raw_status.trim().is_empty() {
                MappingStatus::Active.as_str().to_string()
            } else {
                raw_status
            };
            (false, Some(e.to_string()), status)
        }
    };

    ParsedRow {
        channel_sku: field(0),
        channel_name: field(1),
        master_sku: field(2),
        status,
        is_valid,
        error,
    }
}

/// Предпросмотр файла: первые `limit` строк данных
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CsvPreview {
    pub rows: Vec<ParsedRow>,

    #[serde(rename = "totalRows")]
    pub total_rows: usize,

    #[serde(rename = "invalidRows")]
    pub invalid_rows: usize,
}

pub fn build_preview(text: &str, limit: usize) -> Result<CsvPreview, CsvParseError> {
    let parsed = parse_csv(text)?;
    let rows: Vec<ParsedRow> = parsed
        .rows
        .iter()
        .take(limit)
        .map(|row| preview_row(&row.fields))
        .collect();
    let invalid_rows = rows.iter().filter(|r| !r.is_valid).count();

    Ok(CsvPreview {
        total_rows: parsed.rows.len(),
        invalid_rows,
        rows,
    })
}

/// Текст шаблона для скачивания: заголовок и три строки-примера
pub fn template_csv() -> String {
    let mut out = CSV_HEADERS.join(",");
    out.push('\n');
    for row in TEMPLATE_ROWS.iter() {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
