//! ErrorCode trait: structured codes and process exit classes.

use crate::constants::EXIT_CONFIG_ERROR;

/// Every error enum implements this to expose a stable code string and the
/// exit code class the CLI reports for it.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the process exit code for this error class.
    fn exit_code(&self) -> i32;

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn diagnostic(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Exit class for configuration and topology load failures.
pub const CONFIG_EXIT_CODE: i32 = EXIT_CONFIG_ERROR;
