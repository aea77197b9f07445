//! Shared constants for the RetryStorm analysis engine.

/// RetryStorm version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name reported in SARIF output and the CLI banner.
pub const TOOL_NAME: &str = "retrystorm";

/// Project config file looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "retrystorm.toml";

/// Default cumulative retry amplification threshold. Factors strictly greater fail.
pub const DEFAULT_AMPLIFICATION_THRESHOLD: u64 = 10;

/// Default service timeout when a topology omits `timeout`, in milliseconds.
pub const DEFAULT_SERVICE_TIMEOUT_MS: u64 = 30_000;

/// Default retry attempts when a topology omits `retry` (1 = no retry).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Default strict-mode flag.
pub const DEFAULT_STRICT: bool = false;

/// Fallback log filter when `RETRYSTORM_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "retrystorm=warn";

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "RETRYSTORM_LOG";

/// Exit code: no finding fails the gate.
pub const EXIT_PASSED: i32 = 0;

/// Exit code: findings fail the gate.
pub const EXIT_FAILED: i32 = 1;

/// Exit code: configuration or topology could not be loaded.
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code: the report could not be rendered.
pub const EXIT_REPORT_ERROR: i32 = 3;
