use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

/// Статус сопоставления SKU канала
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MappingStatus {
    #[default]
    Active,
    Inactive,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingStatus::Active => "Active",
            MappingStatus::Inactive => "Inactive",
        }
    }

    /// Строгий разбор (с учетом регистра): только `Active` или `Inactive`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(MappingStatus::Active),
            "Inactive" => Some(MappingStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Record
// ============================================================================

/// Ключ идентичности сопоставления: (channel_sku, channel_name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    pub channel_sku: String,
    pub channel_name: String,
}

/// Единица работы импорта: одна строка сопоставления SKU канала с master SKU.
///
/// Создается из строки CSV и после этого не изменяется. При схлопывании
/// дубликатов запись заменяется целиком.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    #[serde(rename = "channelSku")]
    pub channel_sku: String,

    #[serde(rename = "channelName")]
    pub channel_name: String,

    #[serde(rename = "masterSku")]
    pub master_sku: String,

    #[serde(default)]
    pub status: MappingStatus,
}

impl MappingRecord {
    pub fn new(
        channel_sku: impl Into<String>,
        channel_name: impl Into<String>,
        master_sku: impl Into<String>,
        status: MappingStatus,
    ) -> Self {
        Self {
            channel_sku: channel_sku.into(),
            channel_name: channel_name.into(),
            master_sku: master_sku.into(),
            status,
        }
    }

    pub fn key(&self) -> MappingKey {
        MappingKey {
            channel_sku: self.channel_sku.clone(),
            channel_name: self.channel_name.clone(),
        }
    }
}

// ============================================================================
// Persisted view
// ============================================================================

/// Сохраненное сопоставление (как оно лежит в a002_channel_sku_mapping)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSkuMapping {
    pub id: i64,

    #[serde(rename = "channelSku")]
    pub channel_sku: String,

    #[serde(rename = "channelName")]
    pub channel_name: String,

    #[serde(rename = "masterSku")]
    pub master_sku: String,

    pub status: MappingStatus,

    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Ответ списка сопоставлений.
///
/// `revision` увеличивается после каждой загрузки, чтобы открытые представления
/// знали, что список нужно перечитать.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSkuMappingListResponse {
    pub revision: u64,
    pub items: Vec<ChannelSkuMapping>,
}

// ============================================================================
// Preview
// ============================================================================

/// Строка предпросмотра CSV (только для UI, не сохраняется)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRow {
    #[serde(rename = "channelSku")]
    pub channel_sku: String,

    #[serde(rename = "channelName")]
    pub channel_name: String,

    #[serde(rename = "masterSku")]
    pub master_sku: String,

    pub status: String,

    #[serde(rename = "isValid")]
    pub is_valid: bool,

    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_sensitive() {
        assert_eq!(MappingStatus::parse("Active"), Some(MappingStatus::Active));
        assert_eq!(MappingStatus::parse("Inactive"), Some(MappingStatus::Inactive));
        assert_eq!(MappingStatus::parse("active"), None);
        assert_eq!(MappingStatus::parse("Pending"), None);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = MappingRecord::new("AMZ-1", "Amazon", "SKU-1", MappingStatus::Inactive);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["channelSku"], "AMZ-1");
        assert_eq!(json["masterSku"], "SKU-1");
        assert_eq!(json["status"], "Inactive");
    }
}
