#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use expense_tracker::{
    config::ConfigManager,
    core::{FixedClock, LedgerStore},
    storage::{JsonFileStore, KeyValueStore, MemoryStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap()
}

/// A store over `backend` whose clock is pinned to [`fixed_now`].
pub fn store_over(backend: Box<dyn KeyValueStore>) -> LedgerStore {
    let mut store = LedgerStore::with_clock(backend, Box::new(FixedClock(fixed_now())));
    store.initialize();
    store
}

pub fn memory_store() -> LedgerStore {
    store_over(Box::new(MemoryStore::new()))
}

/// Creates an isolated data directory with a file-backed store and config manager.
pub fn setup_test_env() -> (JsonFileStore, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let backend = JsonFileStore::new(base.join("store")).expect("create json store");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (backend, config_manager)
}
