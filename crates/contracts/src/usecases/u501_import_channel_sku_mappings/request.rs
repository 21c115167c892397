use serde::{Deserialize, Serialize};

/// Запрос на загрузку CSV файла сопоставлений
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Имя выбранного файла (должно заканчиваться на .csv)
    #[serde(rename = "fileName")]
    pub file_name: String,

    /// Содержимое файла (UTF-8)
    #[serde(rename = "csvText")]
    pub csv_text: String,

    /// Пропустить проверку существования master SKU.
    /// Если не указано - берется значение из конфигурации.
    #[serde(rename = "skipMasterSkuValidation", default)]
    pub skip_master_sku_validation: Option<bool>,
}

/// Запрос предпросмотра (первые N строк)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,

    #[serde(rename = "csvText")]
    pub csv_text: String,
}
