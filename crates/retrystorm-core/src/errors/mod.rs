//! Error handling for RetryStorm.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
