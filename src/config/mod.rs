use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_announce_ms() -> u64 {
    crate::page::ANNOUNCE_WINDOW.as_millis() as u64
}

/// Hex color overrides for the palette (e.g. "#FFC7EA")
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_soft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// How long a card stays highlighted after pressing pronounce
    #[serde(default = "default_announce_ms")]
    pub announce_ms: u64,

    /// Deck file to show instead of the built-in words
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_path: Option<PathBuf>,

    /// Where tracing output goes (the TUI owns stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default)]
    pub theme: ThemeOverrides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            announce_ms: default_announce_ms(),
            deck_path: None,
            log_file: None,
            theme: ThemeOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("tango");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the user's config directory, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => AppConfig::default(),
        }
    }

    /// Load config from `path`; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        AppConfig::default()
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Command-line values replace whatever config.toml set
    pub fn apply_overrides(
        &mut self,
        announce_ms: Option<u64>,
        deck_path: Option<PathBuf>,
        log_file: Option<PathBuf>,
    ) {
        if let Some(ms) = announce_ms {
            self.announce_ms = ms;
        }
        if let Some(path) = deck_path {
            self.deck_path = Some(path);
        }
        if let Some(path) = log_file {
            self.log_file = Some(path);
        }
    }

    /// Announce window, with zero clamped to one millisecond
    pub fn announce_window(&self) -> Duration {
        Duration::from_millis(self.announce_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            announce_ms: 750,
            deck_path: Some(PathBuf::from("/home/user/decks/n5.toml")),
            log_file: None,
            theme: ThemeOverrides {
                accent: Some("#FFC7EA".to_string()),
                ..Default::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.announce_window(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::parse("announce_ms = 0\n[theme]\nmint = \"#C7FFF1\"\n").unwrap();
        assert_eq!(config.announce_window(), Duration::from_millis(1));
        assert_eq!(config.theme.mint.as_deref(), Some("#C7FFF1"));
        assert!(config.deck_path.is_none());
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(AppConfig::parse("announce_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_load_from_bad_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "announce_ms = \"soon\"\n").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "announce_ms = 800\n").unwrap();

        assert_eq!(AppConfig::load_from(&path).announce_ms, 800);
        assert_eq!(AppConfig::load_from(&dir.path().join("missing.toml")), AppConfig::default());
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = AppConfig::parse(
            "announce_ms = 750\ndeck_path = \"/decks/n5.toml\"\nlog_file = \"/tmp/tango.log\"\n",
        )
        .unwrap();

        config.apply_overrides(Some(300), Some(PathBuf::from("/decks/n4.toml")), None);

        assert_eq!(config.announce_ms, 300);
        assert_eq!(config.deck_path, Some(PathBuf::from("/decks/n4.toml")));
        // Unset flags keep the config value
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tango.log")));

        config.apply_overrides(None, None, None);
        assert_eq!(config.announce_ms, 300);
    }
}
