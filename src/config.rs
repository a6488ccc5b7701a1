use crate::icons::IconSet;
use crate::styles::ThemeType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// `dark`, `light` or `nocolor`
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Terminal icon set: `nerd`, `unicode`, `ascii` or `auto`
    #[serde(default = "default_icon_set")]
    pub icon_set: String,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default = "default_icon_page_size")]
    pub icon_page_size: usize,
    /// Probability that the demo contact transport fails
    #[serde(default = "default_failure_rate")]
    pub submit_failure_rate: f64,
    /// File holding persisted UI preferences
    #[serde(default = "default_preferences_file")]
    pub preferences_file: PathBuf,
}

/// Durations in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub notice: u64,
    pub auto_dismiss: u64,
    pub search_debounce: u64,
    pub copy_feedback: u64,
    pub submit_delay: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            notice: 3000,
            auto_dismiss: 5000,
            search_debounce: 300,
            copy_feedback: 2000,
            submit_delay: 2000,
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_icon_set() -> String {
    "auto".to_string()
}

fn default_icon_page_size() -> usize {
    48
}

fn default_failure_rate() -> f64 {
    0.1
}

fn default_preferences_file() -> PathBuf {
    crate::utils::get_config_dir().join("preferences.toml")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            icon_set: default_icon_set(),
            timings: Timings::default(),
            icon_page_size: default_icon_page_size(),
            submit_failure_rate: default_failure_rate(),
            preferences_file: default_preferences_file(),
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults if it does not exist
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            if config.icon_page_size == 0 {
                config.icon_page_size = default_icon_page_size();
            }
            config.submit_failure_rate = config.submit_failure_rate.clamp(0.0, 1.0);
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    pub fn theme_type(&self) -> ThemeType {
        self.theme.parse().unwrap_or_default()
    }

    /// Configured icon set; `None` means auto-detect
    pub fn get_icon_set(&self) -> Option<IconSet> {
        IconSet::parse(&self.icon_set)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.timings.notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.theme_type(), ThemeType::Dark);
        assert_eq!(config.get_icon_set(), None);
        assert_eq!(config.timings.submit_delay, 2000);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.theme = "light".to_string();
        config.timings.notice = 1500;
        config.save(&config_path).unwrap();

        let loaded = Config::load_or_create(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config = Config::load_or_create(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.icon_page_size, 48);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "icon_set = \"ascii\"\nsubmit_failure_rate = 3.0\n[timings]\nnotice = 100\n",
        )
        .unwrap();

        let config = Config::load_or_create(&config_path).unwrap();
        assert_eq!(config.get_icon_set(), Some(IconSet::Ascii));
        assert_eq!(config.submit_failure_rate, 1.0);
        assert_eq!(config.timings.notice, 100);
        assert_eq!(config.timings.copy_feedback, 2000);
        assert_eq!(config.theme, "dark");
    }
}
