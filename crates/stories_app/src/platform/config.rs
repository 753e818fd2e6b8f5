use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stories_engine::{SearchSettings, DEFAULT_SEARCH_URL};
use stories_logging::LogDestination;
use thiserror::Error;

pub(crate) const CONFIG_FILENAME: &str = "hacker_stories.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub search_url: String,
    pub default_search_term: String,
    pub store_path: PathBuf,
    pub log_path: PathBuf,
    pub log_destination: LogDestination,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            default_search_term: "React".to_string(),
            store_path: PathBuf::from("./.hacker_stories_state.ron"),
            log_path: PathBuf::from("./hacker_stories.log"),
            log_destination: LogDestination::File,
            connect_timeout_ms: settings.connect_timeout.as_millis() as u64,
            request_timeout_ms: settings.request_timeout.as_millis() as u64,
            max_bytes: settings.max_bytes,
        }
    }
}

impl AppConfig {
    /// Reads the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        ron::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            search_url: self.search_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_search_term, "React");
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(default_search_term: "Rust", request_timeout_ms: 5000, log_destination: Both)"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.default_search_term, "Rust");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(
            config.search_settings().request_timeout,
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(default_search_term: 42").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
