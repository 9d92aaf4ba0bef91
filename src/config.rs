//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend URL, the publishable API key, and the last
//! used username.
//!
//! Configuration is stored at `~/.config/canvass/config.json`. The backend
//! URL and API key can also come from the environment (`CANVASS_SUPABASE_URL`
//! and `CANVASS_SUPABASE_ANON_KEY`), which takes precedence over the file.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "canvass";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable for the backend base URL
const ENV_URL: &str = "CANVASS_SUPABASE_URL";

/// Environment variable for the publishable (anon) API key
const ENV_ANON_KEY: &str = "CANVASS_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub anon_key: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config: Config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        // Environment wins over the config file
        if let Ok(url) = std::env::var(ENV_URL) {
            if !url.is_empty() {
                config.backend_url = Some(url);
            }
        }
        if let Ok(key) = std::env::var(ENV_ANON_KEY) {
            if !key.is_empty() {
                config.anon_key = Some(key);
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Backend base URL with any trailing slash stripped.
    pub fn backend_url(&self) -> Result<String> {
        let url = self
            .backend_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No backend URL configured (set {})", ENV_URL))?;
        Ok(url.trim_end_matches('/').to_string())
    }

    pub fn anon_key(&self) -> Result<&str> {
        self.anon_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No API key configured (set {})", ENV_ANON_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_strips_trailing_slash() {
        let config = Config {
            backend_url: Some("https://example.supabase.co/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.backend_url().unwrap(), "https://example.supabase.co");
    }

    #[test]
    fn test_backend_url_missing() {
        let config = Config::default();
        assert!(config.backend_url().is_err());
    }
}
