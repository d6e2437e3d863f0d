use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use frontdesk_core::rules::debounce::{
    DEFAULT_EMAIL_DEBOUNCE_MS, DEFAULT_PHONE_DEBOUNCE_MS, MAX_DEBOUNCE_MS,
};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "frontdesk";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_API_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub lookup: LookupConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub token_env: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupConfig {
    pub email_debounce_ms: u64,
    pub phone_debounce_ms: u64,
}

impl LookupConfig {
    pub fn email_debounce(&self) -> Duration {
        Duration::from_millis(self.email_debounce_ms)
    }

    pub fn phone_debounce(&self) -> Duration {
        Duration::from_millis(self.phone_debounce_ms)
    }
}

#[derive(Debug, Clone)]
pub struct NotificationsConfig {
    pub enabled: bool,
    pub backend: NotificationBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationBackend {
    Stdout,
    Desktop,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: None,
                token_env: None,
                timeout_seconds: DEFAULT_API_TIMEOUT_SECONDS,
            },
            lookup: LookupConfig {
                email_debounce_ms: DEFAULT_EMAIL_DEBOUNCE_MS,
                phone_debounce_ms: DEFAULT_PHONE_DEBOUNCE_MS,
            },
            notifications: NotificationsConfig {
                enabled: false,
                backend: NotificationBackend::Stdout,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid api.{field} value: {message}")]
    InvalidApiField {
        field: &'static str,
        message: String,
    },
    #[error("invalid lookup.{field} value: {value}")]
    InvalidDebounce { field: &'static str, value: u64 },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api: Option<ApiFile>,
    lookup: Option<LookupFile>,
    notifications: Option<NotificationsFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiFile {
    base_url: Option<String>,
    token_env: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LookupFile {
    email_debounce_ms: Option<u64>,
    phone_debounce_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotificationsFile {
    enabled: Option<bool>,
    backend: Option<NotificationBackend>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(api) = parsed.api {
        if let Some(base_url) = api.base_url {
            let trimmed = base_url.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidApiField {
                    field: "base_url",
                    message: "cannot be empty".to_string(),
                });
            }
            config.api.base_url = Some(trimmed.trim_end_matches('/').to_string());
        }
        if let Some(token_env) = api.token_env {
            let trimmed = token_env.trim();
            if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
                return Err(ConfigError::InvalidApiField {
                    field: "token_env",
                    message: format!("{token_env:?} is not an environment variable name"),
                });
            }
            config.api.token_env = Some(trimmed.to_string());
        }
        if let Some(timeout) = api.timeout_seconds {
            if timeout == 0 {
                return Err(ConfigError::InvalidApiField {
                    field: "timeout_seconds",
                    message: "must be greater than zero".to_string(),
                });
            }
            config.api.timeout_seconds = timeout;
        }
    }

    if let Some(lookup) = parsed.lookup {
        if let Some(value) = lookup.email_debounce_ms {
            config.lookup.email_debounce_ms = validate_debounce("email_debounce_ms", value)?;
        }
        if let Some(value) = lookup.phone_debounce_ms {
            config.lookup.phone_debounce_ms = validate_debounce("phone_debounce_ms", value)?;
        }
    }

    if let Some(notifications) = parsed.notifications {
        if let Some(enabled) = notifications.enabled {
            config.notifications.enabled = enabled;
        }
        if let Some(backend) = notifications.backend {
            config.notifications.backend = backend;
        }
    }

    Ok(config)
}

fn validate_debounce(field: &'static str, value: u64) -> Result<u64> {
    if value > MAX_DEBOUNCE_MS {
        return Err(ConfigError::InvalidDebounce { field, value });
    }
    Ok(value)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
