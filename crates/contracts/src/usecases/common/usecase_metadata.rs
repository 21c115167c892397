/// Метаданные UseCase: индекс, имя, описание для UI и журналов
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u501")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "import_channel_sku_mappings")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u501_import_channel_sku_mappings"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// Категория записей в системном журнале
    fn log_category() -> &'static str {
        Self::usecase_index()
    }
}
