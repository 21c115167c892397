//! In-memory хранилище для тестов конвейера: ведет журнал вызовов и умеет
//! отдавать заранее заданные ошибки.

use async_trait::async_trait;
use contracts::domain::a002_channel_sku_mapping::MappingRecord;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use super::observer::UploadObserver;
use crate::domain::a002_channel_sku_mapping::store::MappingStore;
use crate::shared::data::{StoreError, StoreErrorKind};

/// Наблюдатель, который ничего не делает
pub struct NoopObserver;

impl UploadObserver for NoopObserver {}

#[derive(Default)]
struct State {
    products: HashSet<String>,
    rows: BTreeMap<(String, String), MappingRecord>,
    upsert_calls: Vec<usize>,
    lookups: Vec<Vec<String>>,
}

#[derive(Default)]
pub struct InMemoryMappingStore {
    state: Mutex<State>,
    lookup_error: Option<StoreError>,
    /// Ошибки по номеру вызова upsert (с 0)
    upsert_failures: HashMap<usize, StoreError>,
    enforce_foreign_keys: bool,
}

impl InMemoryMappingStore {
    pub fn with_products(skus: &[&str]) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().products = skus.iter().map(|s| s.to_string()).collect();
        store
    }

    pub fn fail_lookup(mut self, error: StoreError) -> Self {
        self.lookup_error = Some(error);
        self
    }

    pub fn fail_upsert_call(mut self, call_index: usize, error: StoreError) -> Self {
        self.upsert_failures.insert(call_index, error);
        self
    }

    /// Отклонять пакеты с master SKU вне каталога, как это делает внешний ключ
    pub fn enforce_foreign_keys(mut self) -> Self {
        self.enforce_foreign_keys = true;
        self
    }

    pub fn rows(&self) -> Vec<MappingRecord> {
        self.state.lock().unwrap().rows.values().cloned().collect()
    }

    pub fn row(&self, channel_sku: &str, channel_name: &str) -> Option<MappingRecord> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(&(channel_sku.to_string(), channel_name.to_string()))
            .cloned()
    }

    pub fn upsert_call_sizes(&self) -> Vec<usize> {
        self.state.lock().unwrap().upsert_calls.clone()
    }

    pub fn lookup_calls(&self) -> usize {
        self.state.lock().unwrap().lookups.len()
    }

    pub fn looked_up_skus(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().lookups.clone()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn find_existing_master_skus(
        &self,
        skus: &[String],
    ) -> Result<HashSet<String>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.lookups.push(skus.to_vec());
        if let Some(error) = &self.lookup_error {
            return Err(error.clone());
        }
        Ok(skus
            .iter()
            .filter(|sku| state.products.contains(*sku))
            .cloned()
            .collect())
    }

    async fn upsert_mappings(&self, records: &[MappingRecord]) -> Result<usize, StoreError> {
        let mut state = self.state.lock().unwrap();
        let call_index = state.upsert_calls.len();
        state.upsert_calls.push(records.len());

        if let Some(error) = self.upsert_failures.get(&call_index) {
            return Err(error.clone());
        }

        let mut keys = HashSet::new();
        if !records.iter().all(|r| keys.insert(r.key())) {
            return Err(StoreError::classify(
                Some("21000"),
                "ON CONFLICT DO UPDATE command cannot affect row a second time",
            ));
        }

        if self.enforce_foreign_keys
            && records.iter().any(|r| !state.products.contains(&r.master_sku))
        {
            return Err(StoreError::new(
                StoreErrorKind::ForeignKeyViolation,
                "FOREIGN KEY constraint failed",
            ));
        }

        for record in records {
            state.rows.insert(
                (record.channel_sku.clone(), record.channel_name.clone()),
                record.clone(),
            );
        }
        Ok(records.len())
    }
}
