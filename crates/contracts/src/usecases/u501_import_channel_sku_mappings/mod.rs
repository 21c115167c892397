pub mod progress;
pub mod request;
pub mod response;

pub use progress::{ImportProgress, ImportStage};
pub use request::{ImportRequest, PreviewRequest};
pub use response::{ImportResponse, ImportStartStatus, UploadOutcome, UploadStatus};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportChannelSkuMappings;

impl UseCaseMetadata for ImportChannelSkuMappings {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_channel_sku_mappings"
    }

    fn display_name() -> &'static str {
        "Импорт сопоставлений SKU каналов"
    }

    fn description() -> &'static str {
        "Массовая загрузка сопоставлений SKU маркетплейсов с master SKU из CSV файла"
    }
}
