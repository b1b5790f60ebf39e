use std::collections::BTreeMap;

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

/// In-process store, optionally bounded by a byte quota over keys and values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that refuses writes once `limit` bytes would be exceeded.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(limit),
        }
    }

    /// Seeds a key directly, bypassing the quota. Useful for priming fixtures.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            let existing = self
                .entries
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let required = self.used_bytes() - existing + key.len() + value.len();
            if required > limit {
                return Err(LedgerError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
