//! YAML topology loader. Produces a fully validated [`Topology`] or a
//! [`ConfigError`]; analysis never sees malformed input.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use retrystorm_core::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SERVICE_TIMEOUT_MS};
use retrystorm_core::errors::ConfigError;
use serde::Deserialize;
use serde_yaml::Value;

use super::duration::{duration_from_millis, parse_duration};
use super::types::{CircuitBreaker, RetryPolicy, Service, Topology};

#[derive(Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    services: Option<BTreeMap<String, Option<RawService>>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawService {
    timeout: Option<RawDuration>,
    retry: Option<RawRetry>,
    /// Any shape; only presence matters for gap detection.
    circuit_breaker: Option<Value>,
    calls: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Millis(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRetry {
    Attempts(i64),
    Policy { max_attempts: Option<i64> },
}


/// Load and validate a topology from a YAML file.
pub fn load_topology_file(path: &Path) -> Result<Topology, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        },
    })?;
    load_topology(&content, &path.display().to_string())
}

/// Load and validate a topology from a YAML string.
pub fn load_topology_str(yaml: &str) -> Result<Topology, ConfigError> {
    load_topology(yaml, "<string>")
}

fn load_topology(yaml: &str, origin: &str) -> Result<Topology, ConfigError> {
    let raw: RawTopology = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
        path: origin.to_string(),
        message: e.to_string(),
    })?;

    let mut topology = Topology::new();
    for (name, raw_service) in raw.services.unwrap_or_default() {
        let service = convert_service(name, raw_service.unwrap_or_default())?;
        topology.insert(service);
    }

    topology.validate()?;
    tracing::debug!(origin, services = topology.len(), "topology loaded");
    Ok(topology)
}

fn convert_service(name: String, raw: RawService) -> Result<Service, ConfigError> {
    let timeout = match raw.timeout {
        None => Duration::from_millis(DEFAULT_SERVICE_TIMEOUT_MS),
        Some(raw_timeout) => {
            let (value, parsed) = match raw_timeout {
                RawDuration::Millis(ms) => (ms.to_string(), duration_from_millis(ms)),
                RawDuration::Text(text) => {
                    let parsed = parse_duration(&text);
                    (text, parsed)
                }
            };
            parsed.map_err(|e| ConfigError::InvalidDuration {
                field: format!("services.{name}.timeout"),
                value,
                message: e.to_string(),
            })?
        }
    };

    let attempts = match raw.retry {
        None => i64::from(DEFAULT_MAX_ATTEMPTS),
        Some(RawRetry::Attempts(n)) => n,
        Some(RawRetry::Policy { max_attempts }) => {
            max_attempts.unwrap_or(i64::from(DEFAULT_MAX_ATTEMPTS))
        }
    };
    let max_attempts = u32::try_from(attempts)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| ConfigError::InvalidValue {
            field: format!("services.{name}.retry.max_attempts"),
            message: format!("must be a positive integer, got {attempts}"),
        })?;

    let circuit_breaker = raw.circuit_breaker.as_ref().and_then(convert_breaker);

    Ok(Service {
        name,
        timeout,
        retry: RetryPolicy { max_attempts },
        circuit_breaker,
        calls: raw.calls.unwrap_or_default(),
    })
}

/// Any non-null, non-`false` value declares a breaker. `threshold` is kept
/// only when it is a non-negative integer; other shapes are ignored.
fn convert_breaker(value: &Value) -> Option<CircuitBreaker> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Mapping(settings) => Some(CircuitBreaker {
            threshold: settings
                .get("threshold")
                .and_then(Value::as_u64)
                .and_then(|t| u32::try_from(t).ok()),
        }),
        _ => Some(CircuitBreaker::default()),
    }
}
