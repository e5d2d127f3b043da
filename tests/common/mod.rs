#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budgetzen::{
    config::{Config, ConfigManager},
    core::{FinanceStore, SeedPolicy},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application home.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store and config manager backed by a fresh directory.
pub fn setup_test_env(seed: SeedPolicy) -> (FinanceStore<JsonFileStore>, ConfigManager, PathBuf) {
    let home = temp_home();
    let config_manager =
        ConfigManager::with_base_dir(home.clone()).expect("create config manager for temp dir");
    let port = JsonFileStore::new(home.join("data")).expect("create json store");
    let store = FinanceStore::load(port, seed).expect("load store");
    (store, config_manager, home)
}

pub fn default_config() -> Config {
    Config::default()
}
