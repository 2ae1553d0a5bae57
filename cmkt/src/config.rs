//! Configuration module for the cmkt CLI.
//!
//! This module handles locating and loading configuration
//! settings for the cmkt application.

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use cmk_lang::Theme;

use crate::error::{CmktError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "cmkt.toml";

/// Application configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Keyword resource settings.
    #[serde(default)]
    pub keywords: KeywordsConfig,

    /// Terminal colors.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Which keyword resources to merge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordsConfig {
    /// Merge the bundled `commands.json`.
    #[serde(default = "default_true")]
    pub bundled: bool,

    /// Extra JSON resources merged after the bundled one.
    #[serde(default)]
    pub extra: Vec<PathBuf>,
}

/// SGR parameters per style class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    /// Comment style.
    #[serde(default = "default_comment")]
    pub comment: String,

    /// String style.
    #[serde(default = "default_string")]
    pub string: String,

    /// Keyword style.
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Variable style.
    #[serde(default = "default_variable")]
    pub variable: String,
}

fn default_true() -> bool {
    true
}

fn default_comment() -> String {
    Theme::default().comment
}

fn default_string() -> String {
    Theme::default().string
}

fn default_keyword() -> String {
    Theme::default().keyword
}

fn default_variable() -> String {
    Theme::default().variable
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            bundled: true,
            extra: Vec::new(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            comment: default_comment(),
            string: default_string(),
            keyword: default_keyword(),
            variable: default_variable(),
        }
    }
}

impl ThemeConfig {
    /// Converts to the renderer's theme, rejecting codes that are not SGR
    /// parameter lists.
    pub fn to_theme(&self) -> Result<Theme> {
        let theme = Theme {
            comment: self.comment.clone(),
            string: self.string.clone(),
            keyword: self.keyword.clone(),
            variable: self.variable.clone(),
        };
        for code in [&theme.comment, &theme.string, &theme.keyword, &theme.variable] {
            if !is_sgr(code) {
                return Err(CmktError::Config(format!("Invalid color code: {:?}", code)));
            }
        }
        Ok(theme)
    }
}

/// `1;35`-style parameter list.
fn is_sgr(code: &str) -> bool {
    !code.is_empty()
        && code
            .split(';')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. `~/.config/cmkt/`
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// Relative `keywords.extra` entries are resolved against the directory
    /// holding the file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CmktError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| CmktError::Config(format!("Failed to parse configuration: {}", e)))?;

        if let Some(base) = path.parent() {
            for extra in &mut config.keywords.extra {
                if extra.is_relative() {
                    *extra = base.join(&*extra);
                }
            }
        }

        Ok(config)
    }

    /// Check for config in current directory.
    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Check for config in home directory.
    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("cmkt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Check for config in system config directory.
    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("cmkt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Find the configuration file in standard locations.
    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.keywords.bundled);
        assert!(config.keywords.extra.is_empty());
        assert_eq!(config.theme.keyword, "1;35");
        assert_eq!(config.theme.to_theme().unwrap(), Theme::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cmkt.toml");

        let mut original = Config::default();
        original.keywords.bundled = false;
        original.keywords.extra = vec![temp_dir.path().join("extra.json")];
        original.theme.string = "33".to_string();
        std::fs::write(&config_path, toml::to_string_pretty(&original).unwrap()).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cmkt.toml");
        std::fs::write(&config_path, "[theme]\nkeyword = \"4\"\n").unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.theme.keyword, "4");
        assert_eq!(loaded.theme.comment, "2;37");
        assert!(loaded.keywords.bundled);
    }

    #[test]
    fn test_relative_extra_resolved_against_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cmkt.toml");
        std::fs::write(&config_path, "[keywords]\nextra = [\"mine.json\"]\n").unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.keywords.extra, vec![temp_dir.path().join("mine.json")]);
    }

    #[test]
    fn test_invalid_theme_code() {
        let mut theme = ThemeConfig::default();
        theme.variable = "blue".to_string();
        assert!(matches!(theme.to_theme(), Err(CmktError::Config(_))));
        theme.variable = "1;;2".to_string();
        assert!(theme.to_theme().is_err());
    }

    #[test]
    fn test_load_from_nonexistent_path() {
        let result = Config::load_from_path(Path::new("/nonexistent/path/cmkt.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cmkt.toml");
        std::fs::write(&config_path, "[keywords\nbundled = ").unwrap();
        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(CmktError::Config(_))
        ));
    }
}
