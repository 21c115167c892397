use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Параметры загрузки сопоставлений SKU каналов
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Размер пакета для upsert
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Сколько строк данных отдавать в предпросмотр
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Проверять ли master SKU, если запрос не указал явно
    #[serde(default = "default_true")]
    pub validate_master_sku: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            preview_rows: default_preview_rows(),
            validate_master_sku: true,
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_batch_size() -> usize {
    1000
}

fn default_preview_rows() -> usize {
    contracts::domain::a002_channel_sku_mapping::csv::DEFAULT_PREVIEW_ROWS
}

fn default_true() -> bool {
    true
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000

[import]
batch_size = 1000
preview_rows = 30
validate_master_sku = true
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Сохранить загруженную конфигурацию для обработчиков
pub fn init(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration already initialized"))
}

/// Параметры импорта (значения по умолчанию, если конфигурация не загружена)
pub fn import_config() -> ImportConfig {
    CONFIG
        .get()
        .map(|config| config.import.clone())
        .unwrap_or_default()
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.import.batch_size == 0 {
        anyhow::bail!("import.batch_size must be greater than zero");
    }
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.import.batch_size, 1000);
        assert_eq!(config.import.preview_rows, 30);
        assert!(config.import.validate_master_sku);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.import.batch_size, 1000);
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let text = "[database]\npath = \"a.db\"\n[import]\nbatch_size = 0\n";
        assert!(parse_config(text).is_err());
    }
}
