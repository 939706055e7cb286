use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigurationError;
use crate::constants::error_types;

/// Crate-level error for operations that can fail outside an agent run
#[derive(Debug, thiserror::Error)]
pub enum BlogSuiteError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Orchestration error: {0}")]
    Orchestration(#[from] OrchestrationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, BlogSuiteError>;

/// Failures raised while an agent runner executes one attempt
///
/// These never escape [`AgentRunner::run`](crate::agent::AgentRunner::run); the
/// runner folds the final one into an error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Dependencies not met for {agent}: missing {}", missing.join(", "))]
    Dependency { agent: String, missing: Vec<String> },

    #[error(transparent)]
    Execution(#[from] anyhow::Error),

    #[error("{agent} timed out after {after:?}")]
    Timeout { agent: String, after: Duration },

    #[error("execution of {agent} was cancelled")]
    Cancelled { agent: String },
}

impl AgentError {
    pub fn kind(&self) -> AgentErrorKind {
        match self {
            AgentError::Dependency { .. } => AgentErrorKind::Dependency,
            AgentError::Execution(_) => AgentErrorKind::Execution,
            AgentError::Timeout { .. } => AgentErrorKind::Timeout,
            AgentError::Cancelled { .. } => AgentErrorKind::Cancellation,
        }
    }

    /// Classification string written to `error_type` in error envelopes
    pub fn error_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Whether the runner may spend retry budget on this error.
    ///
    /// Dependency errors are only retried when `retry_dependency_errors` is set.
    pub fn is_retryable(&self, retry_dependency_errors: bool) -> bool {
        match self {
            AgentError::Dependency { .. } => retry_dependency_errors,
            AgentError::Execution(_) | AgentError::Timeout { .. } => true,
            AgentError::Cancelled { .. } => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentErrorKind {
    #[serde(rename = "DependencyError")]
    Dependency,
    #[serde(rename = "ExecutionError")]
    Execution,
    #[serde(rename = "TimeoutError")]
    Timeout,
    #[serde(rename = "CancellationError")]
    Cancellation,
}

impl AgentErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentErrorKind::Dependency => error_types::DEPENDENCY_ERROR,
            AgentErrorKind::Execution => error_types::EXECUTION_ERROR,
            AgentErrorKind::Timeout => error_types::TIMEOUT_ERROR,
            AgentErrorKind::Cancellation => error_types::CANCELLATION_ERROR,
        }
    }
}

impl std::fmt::Display for AgentErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the orchestrator itself, as opposed to the agents it runs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrchestrationError {
    #[error("Unknown phase: {0}")]
    UnknownPhase(String),

    #[error("duplicate agent registration for '{key}'")]
    DuplicateAgent { key: String },

    #[error("no agent is registered under '{0}'")]
    UnknownAgent(String),
}
