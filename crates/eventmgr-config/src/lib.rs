use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const CONFIG_FILENAME: &str = "event_manager.toml";

pub const DEFAULT_INPUT: &str = "event_attendees.csv";
pub const DEFAULT_TEMPLATE: &str = "form_letter.html.erb";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_SECRET_KEY: &str = "secret.key";
pub const DEFAULT_CIVIC_BASE_URL: &str = "https://www.googleapis.com/civicinfo/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "event-manager";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub secret_key: PathBuf,
    pub civic: CivicSettings,
}

#[derive(Debug, Clone)]
pub struct CivicSettings {
    pub base_url: Url,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            secret_key: PathBuf::from(DEFAULT_SECRET_KEY),
            civic: CivicSettings::default(),
        }
    }
}

impl Default for CivicSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_CIVIC_BASE_URL).expect("default civic url is valid"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Credential for the civic information service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid {field} path: must not be empty")]
    EmptyPath { field: &'static str },
    #[error("invalid civic.timeout_secs value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid civic.user_agent value")]
    InvalidUserAgent,
    #[error("invalid civic.base_url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api key file {0} is empty")]
    EmptyKeyFile(PathBuf),
    #[error("api key is empty")]
    EmptyApiKey,
    #[error("failed to read {path}: {source}")]
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
    input: Option<PathBuf>,
    template: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    secret_key: Option<PathBuf>,
    civic: Option<CivicFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CivicFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// Loads the config named on the command line, or `event_manager.toml` in
/// the working directory when present. Defaults apply otherwise.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = resolve_config_path(config_path)?;
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
        None => Ok(PathBuf::from(CONFIG_FILENAME)),
    }
}

/// Reads the civic API key, trimming surrounding whitespace.
pub fn load_api_key(path: &Path) -> Result<ApiKey> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ApiKey::new(contents).map_err(|_| ConfigError::EmptyKeyFile(path.to_path_buf()))
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

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

    if let Some(input) = parsed.input {
        config.input = non_empty_path(input, "input")?;
    }
    if let Some(template) = parsed.template {
        config.template = non_empty_path(template, "template")?;
    }
    if let Some(output_dir) = parsed.output_dir {
        config.output_dir = non_empty_path(output_dir, "output_dir")?;
    }
    if let Some(secret_key) = parsed.secret_key {
        config.secret_key = non_empty_path(secret_key, "secret_key")?;
    }

    if let Some(civic) = parsed.civic {
        if let Some(base_url) = civic.base_url {
            config.civic.base_url =
                Url::parse(base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
                    value: base_url.clone(),
                    source,
                })?;
        }
        if let Some(timeout) = civic.timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
            config.civic.timeout_secs = timeout;
        }
        if let Some(user_agent) = civic.user_agent {
            let trimmed = user_agent.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidUserAgent);
            }
            config.civic.user_agent = trimmed.to_string();
        }
    }

    Ok(config)
}

fn non_empty_path(path: PathBuf, field: &'static str) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath { field });
    }
    Ok(path)
}
