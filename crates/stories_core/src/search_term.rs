use std::collections::BTreeMap;

use crate::StoreError;

/// Key under which the draft query is persisted.
pub const SEARCH_TERM_KEY: &str = "search";

/// Durable named string values.
pub trait ValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store; counts writes so callers can observe persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryValueStore {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ValueStore for MemoryValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// A string value mirrored into a [`ValueStore`] on every change.
///
/// Loading never writes; writing the value already held is not persisted again.
#[derive(Debug)]
pub struct SearchTermHolder<S> {
    store: S,
    key: String,
    value: String,
}

impl<S: ValueStore> SearchTermHolder<S> {
    pub fn load(store: S, key: impl Into<String>, default: &str) -> Self {
        let key = key.into();
        let value = store
            .get(&key)
            .filter(|stored| !stored.is_empty())
            .unwrap_or_else(|| default.to_string());
        Self { store, key, value }
    }

    pub fn read(&self) -> &str {
        &self.value
    }

    pub fn write(&mut self, value: impl Into<String>) -> Result<(), StoreError> {
        let value = value.into();
        if value == self.value {
            return Ok(());
        }
        self.value = value;
        self.store.set(&self.key, &self.value)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
