use contracts::domain::a002_channel_sku_mapping::csv::CSV_HEADERS;
use contracts::domain::a002_channel_sku_mapping::ChannelSkuMapping;

pub const EXPORT_FILE_NAME: &str = "channel_sku_mappings_export.csv";

/// Выгрузка текущего списка в CSV: заголовок как в шаблоне, все значения в кавычках
pub fn export_csv(items: &[ChannelSkuMapping]) -> anyhow::Result<String> {
    let mut buffer = CSV_HEADERS.join(",").into_bytes();
    buffer.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buffer);

    for item in items {
        writer.write_record([
            item.channel_sku.as_str(),
            item.channel_name.as_str(),
            item.master_sku.as_str(),
            item.status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV export: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_channel_sku_mapping::csv::{parse_csv, validate_row};
    use contracts::domain::a002_channel_sku_mapping::MappingStatus;

    fn mapping(channel_sku: &str, master_sku: &str, status: MappingStatus) -> ChannelSkuMapping {
        ChannelSkuMapping {
            id: 1,
            channel_sku: channel_sku.to_string(),
            channel_name: "Amazon".to_string(),
            master_sku: master_sku.to_string(),
            status,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_export_quotes_values() {
        let text = export_csv(&[
            mapping("AMZ-1", "SKU-1", MappingStatus::Active),
            mapping("AMZ-\"2\"", "SKU-2", MappingStatus::Inactive),
        ])
        .unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Channel_SKU,Channel_Name,Master_SKU,Status");
        assert_eq!(lines[1], "\"AMZ-1\",\"Amazon\",\"SKU-1\",\"Active\"");
        assert_eq!(lines[2], "\"AMZ-\"\"2\"\"\",\"Amazon\",\"SKU-2\",\"Inactive\"");
    }

    #[test]
    fn test_export_can_be_uploaded_again() {
        let text = export_csv(&[mapping("AMZ-1", "SKU-1", MappingStatus::Inactive)]).unwrap();
        let parsed = parse_csv(&text).unwrap();
        let record = validate_row(&parsed.rows[0].fields).unwrap();
        assert_eq!(record.channel_sku, "AMZ-1");
        assert_eq!(record.status, MappingStatus::Inactive);
    }

    #[test]
    fn test_export_empty_list_has_header_only() {
        assert_eq!(export_csv(&[]).unwrap(), "Channel_SKU,Channel_Name,Master_SKU,Status\n");
    }
}
