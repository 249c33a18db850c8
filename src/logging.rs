// src/logging.rs

use crate::config::Config;
use crate::errors::{RetailChatError, RetailChatResult};
use crate::models::ApiCallLog;
use std::fs::OpenOptions;

/// Routes the `log` facade into the configured log file. The terminal UI
/// owns stdout, so nothing is written to the console.
pub fn init_logging(config: &Config) -> RetailChatResult<()> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&config.log_file)?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| RetailChatError::config_error(format!("Failed to initialize logger: {}", e)))
}

pub fn format_api_call(log: &ApiCallLog) -> String {
    let status = log
        .response_status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "[{}] {} {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.method,
        log.endpoint,
        status,
        log.response_time_ms
    )
}

/// Records one API call through the logger.
pub fn log_api_call(log: &ApiCallLog) {
    log::info!(target: "retail_chat::api", "{}", format_api_call(log));
}
