pub mod a001_product;
pub mod a002_channel_sku_mapping;
pub mod logs;
pub mod usecases;
