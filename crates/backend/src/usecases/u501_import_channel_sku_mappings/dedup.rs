use contracts::domain::a002_channel_sku_mapping::{MappingKey, MappingRecord};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Результат дедупликации
#[derive(Debug, Clone, PartialEq)]
pub struct DedupResult {
    pub records: Vec<MappingRecord>,
    /// Сколько записей было заменено более поздними дубликатами
    pub collapsed: usize,
}

/// Оставляет одну запись на ключ (channel_sku, channel_name).
///
/// Побеждает последнее вхождение, но позиция в выходе - позиция первого
/// появления ключа. Дубликаты не ошибка: они только считаются и пишутся в лог.
pub fn dedup_last_wins(records: Vec<MappingRecord>) -> DedupResult {
    let mut positions: HashMap<MappingKey, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<MappingRecord> = Vec::with_capacity(records.len());
    let mut collapsed = 0;

    for record in records {
        match positions.entry(record.key()) {
            Entry::Occupied(slot) => {
                tracing::debug!(
                    "Duplicate mapping {} / {}: master_sku '{}' replaced by '{}'",
                    record.channel_sku,
                    record.channel_name,
                    unique[*slot.get()].master_sku,
                    record.master_sku
                );
                unique[*slot.get()] = record;
                collapsed += 1;
            }
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(record);
            }
        }
    }

    DedupResult {
        records: unique,
        collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_channel_sku_mapping::MappingStatus;

    fn record(channel_sku: &str, channel_name: &str, master_sku: &str) -> MappingRecord {
        MappingRecord::new(channel_sku, channel_name, master_sku, MappingStatus::Active)
    }

    #[test]
    fn test_last_occurrence_wins() {
        let result = dedup_last_wins(vec![
            record("AMZ-1", "Amazon", "SKU-1"),
            record("AMZ-1", "Amazon", "SKU-2"),
        ]);
        assert_eq!(result.records, vec![record("AMZ-1", "Amazon", "SKU-2")]);
        assert_eq!(result.collapsed, 1);
    }

    #[test]
    fn test_order_follows_first_seen_key() {
        let result = dedup_last_wins(vec![
            record("A", "Amazon", "1"),
            record("B", "Amazon", "2"),
            record("C", "Amazon", "3"),
            record("A", "Amazon", "4"),
            record("B", "Amazon", "5"),
            record("A", "Amazon", "6"),
        ]);
        assert_eq!(
            result.records,
            vec![
                record("A", "Amazon", "6"),
                record("B", "Amazon", "5"),
                record("C", "Amazon", "3"),
            ]
        );
        assert_eq!(result.collapsed, 3);
    }

    #[test]
    fn test_key_is_pair_not_channel_sku_alone() {
        let result = dedup_last_wins(vec![
            record("X-1", "Amazon", "SKU-1"),
            record("X-1", "eBay", "SKU-1"),
            record("x-1", "Amazon", "SKU-1"),
        ]);
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.collapsed, 0);
    }

    #[test]
    fn test_one_record_per_key_equal_to_last() {
        let mut input = Vec::new();
        for round in 0..5 {
            for key in 0..20 {
                input.push(record(
                    &format!("CH-{}", key % 7),
                    if key % 2 == 0 { "Amazon" } else { "Ozon" },
                    &format!("SKU-{}-{}", round, key),
                ));
            }
        }

        let result = dedup_last_wins(input.clone());

        let mut keys: Vec<_> = result.records.iter().map(|r| r.key()).collect();
        let total = keys.len();
        keys.sort_by(|a, b| (&a.channel_sku, &a.channel_name).cmp(&(&b.channel_sku, &b.channel_name)));
        keys.dedup();
        assert_eq!(keys.len(), total);

        for kept in &result.records {
            let last = input.iter().rev().find(|r| r.key() == kept.key()).unwrap();
            assert_eq!(kept, last);
        }
        assert_eq!(result.collapsed, input.len() - total);
    }

    #[test]
    fn test_empty_input() {
        let result = dedup_last_wins(Vec::new());
        assert!(result.records.is_empty());
        assert_eq!(result.collapsed, 0);
    }
}
