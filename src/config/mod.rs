use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::CurrencyCode,
    errors::{BudgetError, Result},
    utils::{
        fs::replace_file,
        paths::{app_data_dir, config_file_in, ensure_dir},
    },
};

pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// User preferences that shape summaries and defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// First day of the calendar week used by the "this week" total.
    pub week_start: Weekday,
    /// How many entries the recent-expenses list shows.
    pub recent_limit: usize,
    /// Currency assumed when none has been selected yet.
    pub default_currency: CurrencyCode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            recent_limit: DEFAULT_RECENT_LIMIT,
            default_currency: CurrencyCode::default(),
        }
    }
}

impl Config {
    /// Applies a `key value` pair as typed on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "week_start" | "week-start" => {
                self.week_start = value.trim().parse::<Weekday>().map_err(|_| {
                    BudgetError::Config(format!("`{value}` is not a weekday"))
                })?;
            }
            "recent_limit" | "recent-limit" => {
                self.recent_limit = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|limit| *limit > 0)
                    .ok_or_else(|| {
                        BudgetError::Config(format!("`{value}` is not a positive count"))
                    })?;
            }
            "default_currency" | "default-currency" => {
                let code = CurrencyCode::new(value.to_uppercase());
                if code.as_str().is_empty() {
                    return Err(BudgetError::Config("currency code cannot be empty".into()));
                }
                self.default_currency = code;
            }
            other => {
                return Err(BudgetError::Config(format!("unknown setting `{other}`")));
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.week_start, Weekday::Sun);
    }

    #[test]
    fn save_and_reload() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("week-start", "Mon").unwrap();
        config.set("recent_limit", "10").unwrap();
        config.set("default-currency", "eur").unwrap();
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.week_start, Weekday::Mon);
        assert_eq!(loaded.recent_limit, 10);
        assert_eq!(loaded.default_currency.as_str(), "EUR");
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"recent_limit": 3}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.recent_limit, 3);
        assert_eq!(loaded.week_start, Weekday::Sun);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("week_start", "someday").is_err());
        assert!(config.set("recent_limit", "0").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, Config::default());
    }
}
