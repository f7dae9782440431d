//! Configuration constants and profile loading for sheetline
//!
//! Executor settings live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! base_url = https://spreadsheets.google.com/
//! timeout = 30
//! connect_timeout = 5
//! user_agent = my-sheets-tool/1.0
//! ```

use std::path::Path;
use std::time::Duration;

use ini::{Ini, Properties};

use crate::error::ConfigError;
use crate::request::DEFAULT_BASE_URL;

/// Default profile file path for sheetline
pub const DEFAULT_PROFILE_PATH: &str = "~/.sheetline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "SHEETLINE_PROFILE_PATH";

/// Profile used when none is named
pub const DEFAULT_PROFILE_NAME: &str = "default";

const KEY_BASE_URL: &str = "base_url";
const KEY_TIMEOUT: &str = "timeout";
const KEY_CONNECT_TIMEOUT: &str = "connect_timeout";
const KEY_USER_AGENT: &str = "user_agent";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Settings for building a transport and resolving endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl ExecutorConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whole-request timeout. `None` waits indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn from_section(profile: &str, section: &Properties) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = section.get(KEY_BASE_URL) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(value) = section.get(KEY_TIMEOUT) {
            config.timeout = Some(parse_seconds(profile, KEY_TIMEOUT, value)?);
        }
        if let Some(value) = section.get(KEY_CONNECT_TIMEOUT) {
            config.connect_timeout = Some(parse_seconds(profile, KEY_CONNECT_TIMEOUT, value)?);
        }
        if let Some(user_agent) = section.get(KEY_USER_AGENT) {
            config.user_agent = user_agent.trim().to_string();
        }

        Ok(config)
    }
}

fn parse_seconds(profile: &str, key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| ConfigError::InvalidValue {
            profile: profile.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Named executor profiles backed by an INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    /// `path` may start with `~`; it is expanded on every lookup
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Load the named profile.
    ///
    /// Returns `Ok(None)` when the file or the section does not exist.
    pub fn get_profile(&self, name: &str) -> Result<Option<ExecutorConfig>, ConfigError> {
        let expanded = shellexpand::tilde(&self.path).to_string();

        if !Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' does not exist", expanded);
            return Ok(None);
        }

        let ini = Ini::load_from_file(&expanded).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: expanded.clone(),
                source,
            },
            ini::Error::Parse(e) => ConfigError::Parse {
                path: expanded.clone(),
                message: e.to_string(),
            },
        })?;

        match ini.section(Some(name)) {
            Some(section) => {
                tracing::debug!("Loaded profile '{}' from '{}'", name, expanded);
                ExecutorConfig::from_section(name, section).map(Some)
            }
            None => {
                tracing::debug!("Profile '{}' not found in '{}'", name, expanded);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn profile_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn store_for(file: &NamedTempFile) -> IniProfileStore {
        IniProfileStore::new(file.path().to_string_lossy().to_string())
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.sheetline/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "SHEETLINE_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_default_and_override() {
        // Both cases in one test: the variable is process-global
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        match original {
            Some(val) => std::env::set_var(PROFILE_PATH_ENV_VAR, val),
            None => std::env::remove_var(PROFILE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn default_config_should_have_no_timeouts() {
        let config = ExecutorConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.connect_timeout(), None);
        assert!(config.user_agent().starts_with("sheetline/"));
    }

    #[test]
    fn store_should_load_profile_values() {
        let file = profile_file(
            "[default]\n\
             base_url = http://localhost:9000/\n\
             timeout = 30\n\
             connect_timeout = 2.5\n\
             user_agent = sheets-sync/2.0\n",
        );

        let config = store_for(&file).get_profile("default").unwrap().unwrap();

        assert_eq!(config.base_url(), "http://localhost:9000/");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.user_agent(), "sheets-sync/2.0");
    }

    #[test]
    fn store_should_fill_missing_keys_with_defaults() {
        let file = profile_file("[staging]\ntimeout = 10\n");

        let config = store_for(&file).get_profile("staging").unwrap().unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.connect_timeout(), None);
    }

    #[test]
    fn store_should_return_none_for_unknown_profile() {
        let file = profile_file("[default]\ntimeout = 10\n");
        assert!(store_for(&file).get_profile("prod").unwrap().is_none());
    }

    #[test]
    fn store_should_return_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");
        let store = IniProfileStore::new(path.to_string_lossy().to_string());

        assert!(store.get_profile("default").unwrap().is_none());
    }

    #[test]
    fn store_should_reject_invalid_timeout() {
        let file = profile_file("[default]\ntimeout = soon\n");

        let err = store_for(&file).get_profile("default").unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "timeout"
        ));
    }

    #[test]
    fn store_should_reject_overflowing_timeout() {
        let file = profile_file("[default]\ntimeout = 1e30\n");

        let err = store_for(&file).get_profile("default").unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref value, .. } if value == "1e30"
        ));
    }

    #[test]
    fn store_should_reject_non_positive_timeout() {
        let file = profile_file("[default]\nconnect_timeout = 0\n");
        assert!(store_for(&file).get_profile("default").is_err());
    }
}
