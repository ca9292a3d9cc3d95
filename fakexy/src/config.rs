//! Configuration loading using Figment.
//!
//! Sources are merged in precedence order, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `~/.fakexy/config.{toml,yaml,yml,json}`
//! 3. `./.fakexy/config.{toml,yaml,yml,json}`
//! 4. An explicit config file (`--config`)
//! 5. `FAKEXY_*` environment variables
//! 6. Command line overrides
//!
//! Configuration is read once at startup; the field order it yields stays
//! fixed for the rest of the process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::api::DEFAULT_API_BASE;
use crate::order::PreferredOrder;

/// Directory name searched for config files.
pub const CONFIG_DIR_NAME: &str = ".fakexy";

/// Config file stem searched inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_STEM: &str = "config";

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "FAKEXY_";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration file extension is not toml, yaml, yml or json
    #[error("Unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    /// Configuration validation failed
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Parse(Box::new(error))
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakexyConfig {
    /// API base URL, without a trailing `/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
    /// Display priority for known fields
    pub field_order: PreferredOrder,
}

impl Default for FakexyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("fakexy/{}", env!("CARGO_PKG_VERSION")),
            field_order: PreferredOrder::default(),
        }
    }
}

impl FakexyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check values that would otherwise fail later, at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".to_string(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                message: format!("unsupported scheme: {}", url.scheme()),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.field_order.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "field_order".to_string(),
                message: "must list at least one field".to_string(),
            });
        }
        Ok(())
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Loads [`FakexyConfig`] from defaults, files, environment and overrides.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    search_dirs: Vec<PathBuf>,
    explicit_file: Option<PathBuf>,
    overrides: ConfigOverrides,
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider {
    /// Provider that searches the home directory, then the current directory.
    pub fn new() -> Self {
        let mut search_dirs = Vec::new();
        if let Some(home) = dirs::home_dir() {
            search_dirs.push(home);
        }
        if let Ok(cwd) = std::env::current_dir() {
            if !search_dirs.contains(&cwd) {
                search_dirs.push(cwd);
            }
        }
        Self {
            search_dirs,
            explicit_file: None,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Provider that searches only the given directories, lowest priority first.
    pub fn with_search_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            explicit_file: None,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Merge all sources, extract and validate.
    pub fn load(&self) -> Result<FakexyConfig, ConfigError> {
        let config: FakexyConfig = self.build_figment()?.extract()?;
        config.validate()?;
        debug!(
            "Loaded configuration: base_url={} timeout={}s fields={}",
            config.base_url,
            config.timeout_secs,
            config.field_order.len()
        );
        Ok(config)
    }

    fn build_figment(&self) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(FakexyConfig::default()));

        for dir in &self.search_dirs {
            for path in discover_config_files(dir) {
                trace!("Loading config file: {}", path.display());
                figment = figment.merge(file_provider(&path)?);
            }
        }

        if let Some(path) = &self.explicit_file {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            trace!("Loading explicit config file: {}", path.display());
            figment = figment.merge(file_provider(path)?);
        }

        // field_order is a list and cannot be expressed as a flat env value
        figment = figment
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().to_lowercase().into())
                    .ignore(&["field_order"]),
            )
            .merge(Serialized::defaults(&self.overrides));

        Ok(figment)
    }
}

/// Config files present in `<dir>/.fakexy/`, in merge order.
fn discover_config_files(dir: &Path) -> Vec<PathBuf> {
    let config_dir = dir.join(CONFIG_DIR_NAME);
    ["toml", "yaml", "yml", "json"]
        .iter()
        .map(|ext| config_dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
        .filter(|path| path.is_file())
        .collect()
}

fn file_provider(path: &Path) -> Result<Figment, ConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
        let config_dir = dir.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir).unwrap();
        let path = config_dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        let config = ConfigProvider::with_search_dirs(vec![]).load().unwrap();
        assert_eq!(config, FakexyConfig::default());
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_project_file_overrides_global_file() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_config(global.path(), "config.toml", "base_url = \"http://global:1\"\ntimeout_secs = 5\n");
        write_config(project.path(), "config.yaml", "base_url: http://project:2\n");

        let config = ConfigProvider::with_search_dirs(vec![
            global.path().to_path_buf(),
            project.path().to_path_buf(),
        ])
        .load()
        .unwrap();

        assert_eq!(config.base_url, "http://project:2");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    #[serial]
    fn test_field_order_from_json_file() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "config.json", r#"{"field_order": ["Full Name", "Street"]}"#);

        let config = ConfigProvider::with_search_dirs(vec![dir.path().to_path_buf()])
            .load()
            .unwrap();

        assert_eq!(config.field_order, PreferredOrder::new(["Full Name", "Street"]));
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "config.toml", "base_url = \"http://file:1\"\n");
        std::env::set_var("FAKEXY_BASE_URL", "http://env:2");
        std::env::set_var("FAKEXY_TIMEOUT_SECS", "7");

        let result = ConfigProvider::with_search_dirs(vec![dir.path().to_path_buf()]).load();

        std::env::remove_var("FAKEXY_BASE_URL");
        std::env::remove_var("FAKEXY_TIMEOUT_SECS");

        let config = result.unwrap();
        assert_eq!(config.base_url, "http://env:2");
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    #[serial]
    fn test_cli_overrides_env() {
        std::env::set_var("FAKEXY_BASE_URL", "http://env:2");

        let result = ConfigProvider::with_search_dirs(vec![])
            .with_overrides(ConfigOverrides {
                base_url: Some("http://cli:3".to_string()),
                timeout_secs: None,
            })
            .load();

        std::env::remove_var("FAKEXY_BASE_URL");

        let config = result.unwrap();
        assert_eq!(config.base_url, "http://cli:3");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yml");
        fs::write(&path, "timeout_secs: 12\n").unwrap();

        let config = ConfigProvider::with_search_dirs(vec![])
            .with_file(&path)
            .load()
            .unwrap();
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file() {
        let err = ConfigProvider::with_search_dirs(vec![])
            .with_file("/definitely/not/here.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_unsupported_explicit_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "base_url=http://x\n").unwrap();

        let err = ConfigProvider::with_search_dirs(vec![])
            .with_file(&path)
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "config.toml", "timeout_secs = \"soon\"\n");

        let err = ConfigProvider::with_search_dirs(vec![dir.path().to_path_buf()])
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_scheme = FakexyConfig {
            base_url: "ftp://example.com".to_string(),
            ..FakexyConfig::default()
        };
        assert!(matches!(
            bad_scheme.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "base_url"
        ));

        let zero_timeout = FakexyConfig {
            timeout_secs: 0,
            ..FakexyConfig::default()
        };
        assert!(zero_timeout.validate().is_err());

        let no_fields = FakexyConfig {
            field_order: PreferredOrder::new(Vec::<String>::new()),
            ..FakexyConfig::default()
        };
        assert!(no_fields.validate().is_err());

        assert!(FakexyConfig::default().validate().is_ok());
    }
}
