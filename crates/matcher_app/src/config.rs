//! Layered configuration: built-in defaults, then an optional RON file, then
//! environment and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use matcher_engine::ServiceSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "matcher.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_base_address: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Directory holding the last-run state file.
    pub state_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_base_address: ServiceSettings::DEFAULT_BASE_ADDRESS.to_string(),
            connect_timeout_secs: ServiceSettings::DEFAULT_CONNECT_TIMEOUT.as_secs(),
            request_timeout_secs: ServiceSettings::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            state_dir: PathBuf::from("."),
            log_file: PathBuf::from("./matcher.log"),
        }
    }
}

impl AppConfig {
    /// Picks the config file to read: `explicit`, or `matcher.ron` in the
    /// working directory if it exists.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        }
    }

    /// Reads `path`, or returns the defaults when there is none. A named
    /// file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        ron::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn with_overrides(mut self, service_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = service_url {
            self.service_base_address = url;
        }
        if let Some(secs) = timeout_secs {
            self.request_timeout_secs = secs;
        }
        self
    }

    pub fn service_settings(&self) -> Result<ServiceSettings> {
        let mut settings = ServiceSettings::parse(&self.service_base_address)
            .with_context(|| format!("Invalid service address {:?}", self.service_base_address))?;
        ensure!(self.connect_timeout_secs > 0, "connect_timeout_secs must be at least 1");
        ensure!(self.request_timeout_secs > 0, "request_timeout_secs must be at least 1");
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn file_values_override_defaults_and_missing_fields_keep_them() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"(service_base_address: "http://jobs.internal:8080/api", request_timeout_secs: 5)"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.service_base_address, "http://jobs.internal:8080/api");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.state_dir, PathBuf::from("."));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = AppConfig {
            service_base_address: "http://from-file:1".to_string(),
            ..AppConfig::default()
        }
        .with_overrides(Some("http://from-flag:2".to_string()), Some(3));

        let settings = config.service_settings().unwrap();
        assert_eq!(settings.service_base_address.as_str(), "http://from-flag:2/");
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_overrides_leave_config_untouched() {
        let config = AppConfig::default().with_overrides(None, None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.ron"))).is_err());
    }

    #[test]
    fn explicit_path_is_used_even_when_absent() {
        let path = Path::new("elsewhere/custom.ron");
        assert_eq!(AppConfig::resolve_path(Some(path)), Some(path.to_path_buf()));
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let config = AppConfig::default().with_overrides(None, Some(0));
        let err = config.service_settings().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));

        let config = AppConfig {
            connect_timeout_secs: 0,
            ..AppConfig::default()
        };
        let err = config.service_settings().unwrap_err();
        assert!(err.to_string().contains("connect_timeout_secs"));

        assert!(AppConfig::default().service_settings().is_ok());
    }

    #[test]
    fn invalid_address_is_rejected() {
        let config = AppConfig::default().with_overrides(Some("nonsense".to_string()), None);
        assert!(config.service_settings().is_err());
    }
}
