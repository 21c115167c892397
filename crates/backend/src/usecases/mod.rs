pub mod u501_import_channel_sku_mappings;
