use contracts::usecases::u501_import_channel_sku_mappings::progress::ImportStage;

use super::batch_upserter::BatchProgress;

/// Наблюдатель за ходом загрузки.
///
/// Все методы необязательные; конвейер вызывает их синхронно.
pub trait UploadObserver: Send + Sync {
    fn on_stage(&self, _stage: ImportStage) {}

    /// Вызывается после каждого пакета, успешного или нет
    fn on_batch_completed(&self, _progress: &BatchProgress) {}

    /// Данные в хранилище могли измениться, списки пора перечитать
    fn on_mappings_changed(&self) {}
}
