//! Configuration management for actctl

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Name of the session file kept beside the config file
const SESSION_FILE: &str = "session.json";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the admin API, e.g. `https://api.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout_secs: default_request_timeout(),
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.actctl/config.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".actctl").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Path of the session file that belongs to a config file
    pub fn session_path(config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .map(|dir| dir.join(SESSION_FILE))
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE))
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default_at(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Resolve the API base URL, preferring a runtime override over the file.
    ///
    /// Trailing slashes are trimmed so endpoints can be appended directly.
    pub fn api_url(&self, override_url: Option<&str>) -> Result<String> {
        let url = override_url
            .map(str::to_string)
            .or_else(|| self.api_url.clone())
            .ok_or(ConfigError::MissingApiUrl)?;

        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "API URL must start with http:// or https://, got '{}'",
                trimmed
            ))
            .into());
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.preferences.format.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            api_url: Some("https://api.example.com".to_string()),
            request_timeout_secs: 10,
            preferences: Preferences {
                format: Some("json".to_string()),
            },
        };
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(loaded.request_timeout_secs, 10);
        assert_eq!(loaded.preferences.format.as_deref(), Some("json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_config_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        Config::default().save_to(path.clone()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = Config::load_from(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::NotFound)
        ));
    }

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let config = Config::load_or_default_at(path.to_str()).unwrap();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_missing_timeout_uses_default() {
        let config: Config = serde_yaml::from_str("api_url: http://localhost:3000\n").unwrap();
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_session_path_is_beside_config() {
        let path = Config::session_path(Path::new("/tmp/actctl/config.yaml"));
        assert_eq!(path, PathBuf::from("/tmp/actctl/session.json"));
    }

    #[test]
    fn test_api_url_override_wins_and_is_trimmed() {
        let config = Config {
            api_url: Some("https://file.example.com".to_string()),
            ..Config::default()
        };

        assert_eq!(
            config.api_url(Some("http://localhost:3000/")).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(config.api_url(None).unwrap(), "https://file.example.com");
    }

    #[test]
    fn test_api_url_missing() {
        let err = Config::default().api_url(None).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingApiUrl)
        ));
    }

    #[test]
    fn test_api_url_requires_scheme() {
        let err = Config::default().api_url(Some("example.com")).unwrap_err();
        assert!(err.to_string().contains("http://"));
    }
}
