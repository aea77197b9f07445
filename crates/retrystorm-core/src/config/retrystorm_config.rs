//! Top-level RetryStorm configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, GateConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RETRYSTORM_*`)
/// 3. Project config (`retrystorm.toml` in the project root, or an explicit file)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetryStormConfig {
    pub analysis: AnalysisConfig,
    pub gate: GateConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub amplification_threshold: Option<u64>,
    pub max_paths: Option<usize>,
    pub max_path_length: Option<usize>,
    pub strict: Option<bool>,
}

impl RetryStormConfig {
    /// Load configuration, looking for `retrystorm.toml` in `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let file = project_config_path
            .exists()
            .then_some(project_config_path.as_path());
        Self::resolve(file, cli_overrides)
    }

    /// Load configuration from an explicit file. A missing file is an error here,
    /// unlike the implicit project lookup in [`RetryStormConfig::load`].
    pub fn load_file(
        path: &Path,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        Self::resolve(Some(path), cli_overrides)
    }

    fn resolve(file: Option<&Path>, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = file {
            Self::merge_toml_file(&mut config, path)?;
            tracing::debug!(path = %path.display(), "merged project config");
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RetryStormConfig) -> Result<(), ConfigError> {
        if config.analysis.amplification_threshold == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.amplification_threshold".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if config.analysis.max_paths == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_paths".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.analysis.max_path_length == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_path_length".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RetryStormConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RetryStormConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values in `other` win.
    fn merge(base: &mut RetryStormConfig, other: &RetryStormConfig) {
        if other.analysis.amplification_threshold.is_some() {
            base.analysis.amplification_threshold = other.analysis.amplification_threshold;
        }
        if other.analysis.max_paths.is_some() {
            base.analysis.max_paths = other.analysis.max_paths;
        }
        if other.analysis.max_path_length.is_some() {
            base.analysis.max_path_length = other.analysis.max_path_length;
        }
        if other.gate.strict.is_some() {
            base.gate.strict = other.gate.strict;
        }
    }

    /// Apply environment variable overrides.
    ///
    /// A set but unparsable variable is a validation error rather than being
    /// skipped, so a typo never silently falls back to a default.
    fn apply_env_overrides(config: &mut RetryStormConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_value::<u64>("RETRYSTORM_AMPLIFICATION_THRESHOLD")? {
            config.analysis.amplification_threshold = Some(v);
        }
        if let Some(v) = env_value::<usize>("RETRYSTORM_MAX_PATHS")? {
            config.analysis.max_paths = Some(v);
        }
        if let Some(v) = env_value::<usize>("RETRYSTORM_MAX_PATH_LENGTH")? {
            config.analysis.max_path_length = Some(v);
        }
        if let Some(v) = env_value::<bool>("RETRYSTORM_STRICT")? {
            config.gate.strict = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RetryStormConfig, cli: &CliOverrides) {
        if let Some(v) = cli.amplification_threshold {
            config.analysis.amplification_threshold = Some(v);
        }
        if let Some(v) = cli.max_paths {
            config.analysis.max_paths = Some(v);
        }
        if let Some(v) = cli.max_path_length {
            config.analysis.max_path_length = Some(v);
        }
        if let Some(v) = cli.strict {
            config.gate.strict = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("cannot parse {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}
