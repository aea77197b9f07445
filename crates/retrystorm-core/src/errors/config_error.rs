//! Configuration and topology errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while loading settings or a service topology.
///
/// All of these are fatal: analysis never starts on an invalid topology.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Invalid duration {value:?} for {field}: {message}")]
    InvalidDuration {
        field: String,
        value: String,
        message: String,
    },

    #[error("Service '{caller}' calls undeclared service '{callee}'")]
    UndeclaredService { caller: String, callee: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }

    fn exit_code(&self) -> i32 {
        error_code::CONFIG_EXIT_CODE
    }
}
