use crate::constants::{DEFAULT_API_BASE, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL};
use crate::errors::{RetailChatError, RetailChatResult};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

pub const ENV_API_BASE: &str = "RETAIL_CHAT_API_BASE";
pub const ENV_LOG_LEVEL: &str = "RETAIL_CHAT_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "RETAIL_CHAT_LOG_FILE";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub log_level: String,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

/// Builds the runtime config: defaults, then the user's config file if one
/// exists, then `.env` and process environment overrides.
pub fn initialize_config() -> RetailChatResult<Config> {
    dotenv::dotenv().ok();

    let mut config = match get_config_path() {
        Some(path) if path.exists() => load_config_file(&path)?,
        _ => Config::default(),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    finalize_config(config)
}

fn get_config_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".config").join("retail_chat").join("config.json"))
}

pub fn load_config_file(path: &Path) -> RetailChatResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| RetailChatError::config_error(format!("Failed to read config file: {}", e)))?;

    serde_json::from_str(&config_str)
        .map_err(|e| RetailChatError::config_error(format!("Failed to parse config: {}", e)))
}

pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_base) = lookup(ENV_API_BASE) {
        config.api_base = api_base;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.log_level = level;
    }
    if let Some(file) = lookup(ENV_LOG_FILE) {
        config.log_file = file;
    }
}

/// Normalizes the base URL and log level, then validates the result.
pub fn finalize_config(mut config: Config) -> RetailChatResult<Config> {
    config.api_base = config.api_base.trim().trim_end_matches('/').to_string();
    config.log_level = config.log_level.trim().to_lowercase();
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> RetailChatResult<()> {
    if config.api_base.is_empty() {
        return Err(RetailChatError::config_error("api_base is required"));
    }

    if !config.api_base.starts_with("http://") && !config.api_base.starts_with("https://") {
        return Err(RetailChatError::config_error(format!(
            "api_base must be an http(s) URL, got '{}'",
            config.api_base
        )));
    }

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(RetailChatError::config_error(format!(
            "log_level must be one of {}",
            LOG_LEVELS.join("|")
        )));
    }

    if config.log_file.trim().is_empty() {
        return Err(RetailChatError::config_error("log_file is required"));
    }

    Ok(())
}
