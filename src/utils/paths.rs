use dirs::home_dir;
use std::{env, path::PathBuf};

use zen_config::Config;

pub const HOME_ENV: &str = "BUDGETZEN_HOME";
const DEFAULT_DIR_NAME: &str = ".budgetzen";
const DATA_DIR: &str = "data";

/// Returns the application home, defaulting to `~/.budgetzen`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the entity files.
///
/// An explicit `data_dir` in the config wins; otherwise an overridden home keeps
/// its data alongside the config, and the platform data directory is used last.
pub fn finance_data_dir(config: &Config) -> PathBuf {
    if config.data_dir.is_none() {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom).join(DATA_DIR);
        }
    }
    config.resolve_data_dir()
}
