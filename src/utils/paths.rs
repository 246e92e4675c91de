use dirs::home_dir;
use std::{env, path::PathBuf};

use crate::errors::Result;

pub const HOME_ENV: &str = "VACATION_BUDGET_HOME";

const DEFAULT_DIR_NAME: &str = ".vacation_budget";
const STORE_DIR: &str = "store";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.vacation_budget`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding one file per key of the local key-value store.
pub fn store_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(STORE_DIR)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &std::path::Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
