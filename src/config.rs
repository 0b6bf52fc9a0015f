//! Configuration persistence
//!
//! Stores user preferences in `~/.config/tagedit/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Whitespace used for one indent level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tabs,
}

/// Indentation applied when re-indenting committed fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentConfig {
    #[serde(default)]
    pub style: IndentStyle,
    /// Spaces per level (ignored for tabs)
    #[serde(default = "default_indent_width")]
    pub width: usize,
}

fn default_indent_width() -> usize {
    4
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            style: IndentStyle::Spaces,
            width: default_indent_width(),
        }
    }
}

impl IndentConfig {
    pub fn spaces(width: usize) -> Self {
        Self {
            style: IndentStyle::Spaces,
            width,
        }
    }

    pub fn tabs() -> Self {
        Self {
            style: IndentStyle::Tabs,
            width: 1,
        }
    }

    /// Leading whitespace for `level` indent levels
    pub fn indentation(&self, level: usize) -> String {
        match self.style {
            IndentStyle::Spaces => " ".repeat(level * self.width),
            IndentStyle::Tabs => "\t".repeat(level),
        }
    }
}

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TageditConfig {
    #[serde(default)]
    pub indent: IndentConfig,
    /// Extensions (without the dot) accepted as stylesheets for the editing surface
    #[serde(default = "default_stylesheet_extensions")]
    pub stylesheet_extensions: Vec<String>,
}

fn default_stylesheet_extensions() -> Vec<String> {
    vec!["css".to_string()]
}

impl Default for TageditConfig {
    fn default() -> Self {
        Self {
            indent: IndentConfig::default(),
            stylesheet_extensions: default_stylesheet_extensions(),
        }
    }
}

impl TageditConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_spaces_and_tabs() {
        assert_eq!(IndentConfig::spaces(2).indentation(3), "      ");
        assert_eq!(IndentConfig::tabs().indentation(2), "\t\t");
        assert_eq!(IndentConfig::default().indentation(0), "");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: TageditConfig = serde_yaml::from_str("indent:\n  width: 2\n").unwrap();
        assert_eq!(config.indent, IndentConfig::spaces(2));
        assert_eq!(config.stylesheet_extensions, vec!["css".to_string()]);
    }

    #[test]
    fn test_indent_style_lowercase_in_yaml() {
        let config: TageditConfig = serde_yaml::from_str("indent:\n  style: tabs\n").unwrap();
        assert_eq!(config.indent.style, IndentStyle::Tabs);
    }
}
