//! Configuration management for the admin console

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base endpoint every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Subscriptions shown per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Session persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file; the platform data directory is used when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_page_size() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SessionConfig {
    /// Configured session file, or `session.json` in the platform data directory
    #[must_use]
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("dev", "gtw", "gtw-admin").map_or_else(
                || PathBuf::from(".gtw-admin").join("session.json"),
                |dirs| dirs.data_dir().join("session.json"),
            )
        })
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AdminConfig {
    /// Load configuration from an optional file and `GTW_ADMIN_*` environment
    /// variables, `__` separating nested keys (`GTW_ADMIN_API__BASE_URL`)
    ///
    /// Without an explicit path an optional `gtw-admin.{toml,json,yaml}` in
    /// the working directory is read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a source cannot be read or parsed,
    /// or the resulting values fail [`AdminConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.map_or_else(
            || config::File::with_name("gtw-admin").required(false),
            |path| config::File::from(path).required(true),
        );

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("GTW_ADMIN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that would only fail later at request time
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unusable base URL or a zero
    /// page size or timeout.
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(Error::Configuration {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        let url = Url::parse(base).map_err(|e| Error::Configuration {
            message: format!("api.base_url '{base}' is not a valid URL: {e}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration {
                message: format!("api.base_url must use http or https, got '{}'", url.scheme()),
            });
        }
        if self.api.page_size == 0 {
            return Err(Error::Configuration {
                message: "api.page_size must be at least 1".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Configuration {
                message: "api.timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = AdminConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.api.page_size, 20);
        assert!(config.session.store_path.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = AdminConfig::default();
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "ftp://gtw.dev/api".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = AdminConfig::default();
        config.api.page_size = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_load_from_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://api.gtw.dev/api\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = AdminConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://api.gtw.dev/api");
        assert_eq!(config.api.page_size, 20);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AdminConfig::load(Some(Path::new("/nonexistent/gtw-admin.toml")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_explicit_store_path_wins() {
        let session = SessionConfig {
            store_path: Some(PathBuf::from("/tmp/s.json")),
        };
        assert_eq!(session.resolved_store_path(), PathBuf::from("/tmp/s.json"));
        assert!(
            SessionConfig::default()
                .resolved_store_path()
                .ends_with("session.json")
        );
    }
}
