use serde::{Deserialize, Serialize};

/// Товар основного каталога. `sku` - master SKU, на который ссылаются
/// сопоставления каналов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,

    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// DTO для создания/обновления товара
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub sku: String,
    pub name: String,
}

impl ProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() {
            return Err("SKU не может быть пустым".into());
        }
        if self.name.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        Ok(())
    }
}
