//! Where tagedit keeps its files
//!
//! ```text
//! <config dir>/
//! ├── config.yaml        indent and stylesheet settings
//! └── logs/
//!     └── tagedit.log.YYYY-MM-DD
//! ```
//!
//! `<config dir>` is `$TAGEDIT_CONFIG_DIR` when set, otherwise
//! `$XDG_CONFIG_HOME/tagedit` or `~/.config/tagedit` (`%APPDATA%\tagedit`
//! on Windows).

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "tagedit";
const CONFIG_FILE: &str = "config.yaml";
const LOG_PREFIX: &str = "tagedit.log";

/// Environment variable that overrides the whole config directory
pub const CONFIG_DIR_ENV: &str = "TAGEDIT_CONFIG_DIR";

fn platform_config_root() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return env::var_os("APPDATA").map(PathBuf::from);
    }
    env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// Base config directory for tagedit
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    platform_config_root().map(|root| root.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// File name prefix the daily log appender writes under
pub fn log_file_prefix() -> &'static str {
    LOG_PREFIX
}

/// Ensure the logs directory exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    std::fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        let dir = config_dir().unwrap();
        assert_eq!(config_file().unwrap(), dir.join("config.yaml"));
        assert_eq!(logs_dir().unwrap(), dir.join("logs"));
    }

    #[test]
    fn test_log_prefix_names_the_app() {
        assert!(log_file_prefix().starts_with(APP_DIR));
    }
}
