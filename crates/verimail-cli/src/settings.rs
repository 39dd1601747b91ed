//! User configuration, persisted as TOML in the platform config directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use verimail_client::{APP_URL_ENV, ClientConfig};

/// Settings file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Session file name inside the data directory.
const SESSION_FILE_NAME: &str = "session.json";

/// Client settings.
///
/// Every key is optional; command-line flags and the environment take
/// precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the verification service.
    pub api_url: Option<String>,
    /// Whole-request timeout in seconds. Unset means no client-side limit.
    pub request_timeout_secs: Option<u64>,
    /// Directory holding the session file.
    pub data_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific path.
    ///
    /// A missing file yields defaults; an unreadable one is logged and
    /// yields defaults too.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read settings");
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid settings file");
            Self::default()
        })
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "verimail")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Where the session file lives.
    pub fn session_path(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join(SESSION_FILE_NAME),
            None => verimail_store::default_session_path()
                .unwrap_or_else(|| PathBuf::from(SESSION_FILE_NAME)),
        }
    }

    /// Client configuration with `--api-url`, then `APP_URL`, then this file.
    pub fn client_config(&self, api_url_flag: Option<&str>) -> ClientConfig {
        let environment = std::env::var(APP_URL_ENV).ok();
        self.client_config_with_env(api_url_flag, environment.as_deref())
    }

    fn client_config_with_env(
        &self,
        api_url_flag: Option<&str>,
        environment: Option<&str>,
    ) -> ClientConfig {
        ClientConfig::resolve(api_url_flag, environment, self.api_url.as_deref())
            .with_timeout(self.request_timeout_secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        assert_eq!(
            Settings::load_from(&dir.path().join("config.toml")),
            Settings::default()
        );
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let settings = Settings {
            api_url: Some("https://verify.example.com".to_string()),
            request_timeout_secs: Some(30),
            data_dir: Some(dir.path().to_path_buf()),
        };
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, toml::to_string_pretty(&settings).unwrap()).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_invalid_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = 5\n").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.request_timeout_secs, Some(5));
        assert_eq!(settings.api_url, None);
    }

    #[test]
    fn test_client_config_precedence() {
        let settings = Settings {
            api_url: Some("http://file".to_string()),
            request_timeout_secs: Some(10),
            data_dir: None,
        };
        let config = settings.client_config_with_env(None, Some("http://env"));
        assert_eq!(config.base_url, "http://env");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));

        let config = settings.client_config_with_env(Some("http://flag"), Some("http://env"));
        assert_eq!(config.base_url, "http://flag");

        let config = settings.client_config_with_env(None, None);
        assert_eq!(config.base_url, "http://file");
    }

    #[test]
    fn test_session_path_uses_data_dir() {
        let settings = Settings {
            data_dir: Some(PathBuf::from("/var/lib/verimail")),
            ..Settings::default()
        };
        assert_eq!(
            settings.session_path(),
            PathBuf::from("/var/lib/verimail/session.json")
        );
    }
}
