use std::path::{Path, PathBuf};

/// Overrides the config directory (used by tests)
pub const CONFIG_DIR_ENV: &str = "COMPONENTRY_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Config directory: always ~/.config/componentry, regardless of OS
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    get_home_dir().join(".config").join("componentry")
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Directory for log files
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("componentry")
}

/// Show a path with `~` in place of the home directory
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}
