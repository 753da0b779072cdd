use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sift_core::time::offset_from_seconds;
use thiserror::Error;

const APP_DIR: &str = "sift";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_MAX_QUERY_LENGTH: usize = 1000;
pub const DEFAULT_MAX_TERM_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Seconds east of UTC used when a command gets no `--tz-offset`.
    pub time_zone_offset: i32,
    pub limits: LimitsConfig,
}

/// Checks applied to a query before and after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    pub max_query_length: usize,
    pub max_term_length: usize,
    pub require_terms: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            time_zone_offset: 0,
            limits: LimitsConfig {
                max_query_length: DEFAULT_MAX_QUERY_LENGTH,
                max_term_length: DEFAULT_MAX_TERM_LENGTH,
                require_terms: false,
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
    #[error("invalid time_zone_offset value: {0}")]
    InvalidTimeZoneOffset(i32),
    #[error("invalid limits.{field} value: must be greater than zero")]
    InvalidLimit { field: &'static str },
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
    time_zone_offset: Option<i32>,
    limits: Option<LimitsFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsFile {
    max_query_length: Option<usize>,
    max_term_length: Option<usize>,
    require_terms: Option<bool>,
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

    if let Some(offset) = parsed.time_zone_offset {
        offset_from_seconds(offset).map_err(|_| ConfigError::InvalidTimeZoneOffset(offset))?;
        config.time_zone_offset = offset;
    }

    if let Some(limits) = parsed.limits {
        if let Some(max) = limits.max_query_length {
            config.limits.max_query_length = positive(max, "max_query_length")?;
        }
        if let Some(max) = limits.max_term_length {
            config.limits.max_term_length = positive(max, "max_term_length")?;
        }
        if let Some(require) = limits.require_terms {
            config.limits.require_terms = require;
        }
    }

    Ok(config)
}

fn positive(value: usize, field: &'static str) -> Result<usize> {
    if value == 0 {
        return Err(ConfigError::InvalidLimit { field });
    }
    Ok(value)
}
