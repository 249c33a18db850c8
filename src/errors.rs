// src/errors.rs

use thiserror::Error;

/// Everything that can go wrong between a typed command and its summary line.
#[derive(Debug, Error)]
pub enum RetailChatError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RetailChatError {
    pub fn network_error(msg: impl Into<String>) -> Self {
        RetailChatError::Network(msg.into())
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        RetailChatError::Parse(msg.into())
    }

    pub fn shape_error(msg: impl Into<String>) -> Self {
        RetailChatError::Shape(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        RetailChatError::Config(msg.into())
    }
}

pub type RetailChatResult<T> = Result<T, RetailChatError>;
