use crate::api::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the MCQ service, including the `/api/v1` prefix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Identifier attached to quiz submissions
    #[serde(default)]
    pub user_id: Option<String>,
    /// Directory JSON exports are saved to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Per-request timeout in seconds (unset means wait indefinitely)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(crate::utils::get_home_dir)
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_id: None,
            export_dir: default_export_dir(),
            theme: default_theme(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            if config.api_base_url.trim().is_empty() {
                config.api_base_url = default_api_base_url();
            }
            if config.user_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
                config.user_id = None;
            }
            if let Some(dir) = config.export_dir.to_str() {
                config.export_dir = crate::utils::expand_path(dir);
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api/v1");
        assert!(config.user_id.is_none());
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.user_id = Some("student-7".to_string());
        config.request_timeout_secs = Some(30);
        config.save(&config_path).unwrap();

        let loaded = Config::load_or_create(&config_path).unwrap();
        assert_eq!(loaded.user_id.as_deref(), Some("student-7"));
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_or_create(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "api_base_url = \"\"\nuser_id = \"  \"\n").unwrap();

        let config = Config::load_or_create(&config_path).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert!(config.user_id.is_none());
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_export_dir_tilde_is_expanded() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "export_dir = \"~/mcq_exports\"\n").unwrap();

        let config = Config::load_or_create(&config_path).unwrap();
        assert_eq!(
            config.export_dir,
            crate::utils::get_home_dir().join("mcq_exports")
        );
        assert!(config.export_dir.is_absolute());
    }
}
