//! Configuration structures and loading logic.

use crate::config::filter::MediaFilter;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Telegram application credentials and session identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Telegram API ID from my.telegram.org.
    #[serde(default)]
    pub api_id: i32,

    /// Telegram API hash from my.telegram.org.
    #[serde(default)]
    pub api_hash: String,

    /// Name of the session held by the gateway.
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

/// Channel targeting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Channel username, `@username`, t.me link or numeric id.
    #[serde(default)]
    pub channel_name: String,
}

/// Export options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base URL of the messaging gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Messages requested per page.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Seconds to wait between pages.
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u64,

    /// Suffix of the export root directory (`{channel}_{prefix}`).
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,

    /// Server-side media filter.
    #[serde(default)]
    pub media_type: MediaFilter,

    /// Base directory for exports.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Log file path; `None` disables file logging.
    #[serde(default = "default_log_file")]
    pub log_file: Option<PathBuf>,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            limit: default_limit(),
            delay_seconds: default_delay_seconds(),
            export_prefix: default_export_prefix(),
            media_type: MediaFilter::default(),
            download_directory: None,
            log_file: default_log_file(),
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            api_id: 0,
            api_hash: String::new(),
            session_name: default_session_name(),
        }
    }
}

fn default_session_name() -> String {
    "tg_media_export".to_string()
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_limit() -> u32 {
    200
}

fn default_delay_seconds() -> u64 {
    10
}

fn default_export_prefix() -> String {
    "export".to_string()
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from(".tg_media_export.log"))
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Pause between two page requests.
    pub fn page_delay(&self) -> Duration {
        Duration::from_secs(self.options.delay_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[account]
api_id = 123456
api_hash = "0123456789abcdef0123456789abcdef"
session_name = "my_session"

[target]
channel_name = "rustlang"

[options]
limit = 50
delay_seconds = 3
export_prefix = "media"
media_type = "video"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.account.api_id, 123456);
        assert_eq!(config.account.session_name, "my_session");
        assert_eq!(config.target.channel_name, "rustlang");
        assert_eq!(config.options.limit, 50);
        assert_eq!(config.page_delay(), Duration::from_secs(3));
        assert_eq!(config.options.export_prefix, "media");
        assert_eq!(config.options.media_type, MediaFilter::Video);
        assert_eq!(config.options.gateway_url, "http://127.0.0.1:8081");
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.options.limit, 200);
        assert_eq!(config.options.delay_seconds, 10);
        assert_eq!(config.options.export_prefix, "export");
        assert_eq!(config.options.media_type, MediaFilter::All);
        assert_eq!(config.account.session_name, "tg_media_export");
    }

    #[test]
    fn test_unknown_media_type_fails_to_load() {
        let result = toml::from_str::<Config>("[options]\nmedia_type = \"pictures\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
