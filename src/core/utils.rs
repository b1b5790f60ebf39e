use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";
const STORE_DIR: &str = "store";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.expense_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default directory for the key-value store files inside `base`.
pub fn store_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(STORE_DIR)
}

/// Location of the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
