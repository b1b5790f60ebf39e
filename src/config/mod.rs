use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::utils::{app_data_dir, config_file_in, store_dir_in};
use crate::errors::{LedgerError, Result};

const TMP_SUFFIX: &str = "tmp";

/// User preferences for the shell and the location of the ledger store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the key-value store. Defaults to `<data dir>/store`.
    pub storage_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Tracing filter used when `RUST_LOG` is unset, e.g. `expense_tracker=debug`.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            storage_root: None,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn resolve_storage_root(&self, base: &Path) -> PathBuf {
        self.storage_root
            .clone()
            .unwrap_or_else(|| store_dir_in(base))
    }
}

/// Loads and saves [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the application data directory.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        let path = config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored config, or defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{} is invalid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn storage_root(&self, config: &Config) -> PathBuf {
        config.resolve_storage_root(&self.base)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().expect("defaults");
        assert_eq!(config, Config::default());
        assert_eq!(manager.storage_root(&config), dir.path().join("store"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            currency_symbol: "$".into(),
            storage_root: Some(dir.path().join("elsewhere")),
            log_filter: Some("expense_tracker=debug".into()),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(manager.storage_root(&config), dir.path().join("elsewhere"));
    }

    #[test]
    fn save_replaces_file_without_leaving_temp() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        manager.save(&Config::default()).unwrap();
        let euro = Config {
            currency_symbol: "€".into(),
            ..Config::default()
        };
        manager.save(&euro).unwrap();

        assert_eq!(manager.load().unwrap(), euro);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        manager.save(&Config::default()).unwrap();
        fs::create_dir_all(tmp_path(manager.path())).unwrap();

        let euro = Config {
            currency_symbol: "€".into(),
            ..Config::default()
        };
        assert!(manager.save(&euro).is_err());
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{}").unwrap();
        assert_eq!(manager.load().unwrap().currency_symbol, "₹");
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "currency = yes").unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }
}
