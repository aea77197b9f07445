//! Topology types: services, retry policies, breaker declarations.

use std::collections::BTreeMap;
use std::time::Duration;

use retrystorm_core::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SERVICE_TIMEOUT_MS};
use retrystorm_core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Retry policy of a service. `max_attempts` counts the first try, so 1 means no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A declared circuit breaker. Its presence alone marks the service as protected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreaker {
    /// Failure threshold, if declared. Not needed for gap detection.
    pub threshold: Option<u32>,
}

/// A single service in the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub circuit_breaker: Option<CircuitBreaker>,
    /// Outbound calls, in declared order.
    pub calls: Vec<String>,
}

impl Service {
    /// A service with default timeout and retry policy, no breaker, no calls.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout: Duration::from_millis(DEFAULT_SERVICE_TIMEOUT_MS),
            retry: RetryPolicy::default(),
            circuit_breaker: None,
            calls: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry = RetryPolicy { max_attempts };
        self
    }

    pub fn with_circuit_breaker(mut self) -> Self {
        self.circuit_breaker = Some(CircuitBreaker::default());
        self
    }

    pub fn calling<S: AsRef<str>>(mut self, callees: &[S]) -> Self {
        self.calls = callees.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn has_circuit_breaker(&self) -> bool {
        self.circuit_breaker.is_some()
    }
}

/// The whole declared topology, keyed by service name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    services: BTreeMap<String, Service>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a topology from services. A later service with a duplicate name replaces the earlier one.
    pub fn from_services(services: impl IntoIterator<Item = Service>) -> Self {
        Self {
            services: services
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        }
    }

    pub fn insert(&mut self, service: Service) {
        self.services.insert(service.name.clone(), service);
    }

    pub fn get(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Services in name order.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Referential and value integrity: every call target is declared and
    /// every retry policy allows at least one attempt.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for service in self.services.values() {
            if service.retry.max_attempts == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("services.{}.retry.max_attempts", service.name),
                    message: "must be a positive integer".to_string(),
                });
            }
            if let Some(callee) = service.calls.iter().find(|c| !self.contains(c)) {
                return Err(ConfigError::UndeclaredService {
                    caller: service.name.clone(),
                    callee: callee.clone(),
                });
            }
        }
        Ok(())
    }
}
