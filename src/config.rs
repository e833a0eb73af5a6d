use std::{fs, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEZONE: &str = "Europe/Brussels";

/// Which URL layout the deployed booking API uses. Older deployments expose
/// `/events/`, newer ones `/api/bookings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    #[default]
    Events,
    ApiBookings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub path_style: PathStyle,
    pub timezone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            path_style: PathStyle::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            eprintln!("unknown timezone {:?}, falling back to UTC", self.timezone);
            chrono_tz::UTC
        })
    }
}

pub struct ConfigStore {
    path: PathBuf,
    data: Mutex<AppConfig>,
}

impl ConfigStore {
    pub fn load() -> Self {
        Self::at(utils::config_path())
    }

    pub fn at(path: PathBuf) -> Self {
        let data = match read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("config unreadable, using defaults: {err:#}");
                AppConfig::default()
            }
        };
        Self {
            path,
            data: Mutex::new(data),
        }
    }

    pub fn read(&self) -> AppConfig {
        self.data.lock().expect("config mutex poisoned").clone()
    }

    pub fn update<F>(&self, transform: F) -> Result<AppConfig>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self.data.lock().expect("config mutex poisoned");
        transform(&mut guard);
        write_config(&self.path, &guard)?;
        Ok(guard.clone())
    }
}

fn read_config(path: &PathBuf) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("unable to read config at {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid config at {:?}", path))
}

fn write_config(path: &PathBuf, config: &AppConfig) -> Result<()> {
    utils::ensure_parent(path);
    let contents = serde_json::to_string_pretty(config).context("config serialization")?;
    fs::write(path, contents).with_context(|| format!("unable to write config at {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_missing_fields() {
        let config: AppConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.path_style, PathStyle::Events);
        assert_eq!(config.timezone(), chrono_tz::Europe::Brussels);
    }

    #[test]
    fn path_style_uses_snake_case_names() {
        let config: AppConfig =
            serde_json::from_str(r#"{"path_style":"api_bookings"}"#).expect("path style");
        assert_eq!(config.path_style, PathStyle::ApiBookings);
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let config = AppConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.timezone(), chrono_tz::UTC);
    }

    #[test]
    fn store_round_trips_updates() {
        let path = std::env::temp_dir().join(format!(
            "gig-desk-test-{}-config.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let store = ConfigStore::at(path.clone());
        let updated = store
            .update(|config| config.api_base = "https://bookings.example.com".to_string())
            .expect("persist config");
        assert_eq!(updated.api_base, "https://bookings.example.com");

        let reloaded = ConfigStore::at(path.clone());
        assert_eq!(reloaded.read().api_base, "https://bookings.example.com");
        let _ = fs::remove_file(&path);
    }
}
