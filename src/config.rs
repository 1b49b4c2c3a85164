// SPDX-License-Identifier: MPL-2.0
//! User preferences for the dock controls, persisted to a `settings.toml`
//! file: the UI language and whether the mute dock hides itself immediately
//! on click instead of waiting for the model to confirm.

use crate::error::Result;
use crate::ui::mute::HidePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MuteDock";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    /// When true, a click hides the dock optimistically before the model
    /// confirms the mute change. Off by default; see [`HidePolicy`].
    #[serde(default)]
    pub hide_on_click: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            hide_on_click: Some(false),
        }
    }
}

impl Config {
    pub fn hide_policy(&self) -> HidePolicy {
        if self.hide_on_click.unwrap_or(false) {
            HidePolicy::OptimisticHide
        } else {
            HidePolicy::ModelDriven
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            language: Some("fr".to_string()),
            hide_on_click: Some(true),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.language, config.language);
        assert_eq!(loaded.hide_on_click, config.hide_on_click);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");
        let config = Config::default();

        save_to_path(&config, &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_uses_model_driven_policy() {
        let config = Config::default();
        assert_eq!(config.hide_policy(), HidePolicy::ModelDriven);
    }

    #[test]
    fn hide_on_click_maps_to_optimistic_policy() {
        let config = Config {
            language: None,
            hide_on_click: Some(true),
        };
        assert_eq!(config.hide_policy(), HidePolicy::OptimisticHide);
    }
}
