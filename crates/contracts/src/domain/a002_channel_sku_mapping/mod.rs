pub mod aggregate;
pub mod csv;

pub use aggregate::{
    ChannelSkuMapping, ChannelSkuMappingListResponse, MappingKey, MappingRecord, MappingStatus,
    ParsedRow,
};
pub use csv::{CsvParseError, CsvPreview, RowValidationError};
