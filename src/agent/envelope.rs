//! # Result Envelope
//!
//! Uniform record returned by every agent run. The `status` tag decides which
//! half is meaningful: a success carries `result` and the winning `attempt`, an
//! error carries `error`, `error_type`, and the total `attempts` with a null
//! `result`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::traits::AgentOutput;
use crate::orchestration::Phase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultEnvelope {
    Success(SuccessEnvelope),
    Error(ErrorEnvelope),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub agent: String,
    pub agent_key: String,
    pub phase: Phase,
    /// Seconds since the run started, across all attempts
    pub execution_time: f64,
    pub attempt: u32,
    pub result: AgentOutput,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub agent: String,
    pub agent_key: String,
    pub phase: Phase,
    pub execution_time: f64,
    pub attempts: u32,
    pub error: String,
    pub error_type: String,
    /// Always null
    pub result: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl ResultEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }

    pub fn agent(&self) -> &str {
        match self {
            Self::Success(envelope) => &envelope.agent,
            Self::Error(envelope) => &envelope.agent,
        }
    }

    pub fn agent_key(&self) -> &str {
        match self {
            Self::Success(envelope) => &envelope.agent_key,
            Self::Error(envelope) => &envelope.agent_key,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Success(envelope) => envelope.phase,
            Self::Error(envelope) => envelope.phase,
        }
    }

    pub fn execution_time(&self) -> f64 {
        match self {
            Self::Success(envelope) => envelope.execution_time,
            Self::Error(envelope) => envelope.execution_time,
        }
    }

    /// Attempts spent by the run, the winning attempt for a success
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Success(envelope) => envelope.attempt,
            Self::Error(envelope) => envelope.attempts,
        }
    }

    pub fn result(&self) -> Option<&AgentOutput> {
        match self {
            Self::Success(envelope) => Some(&envelope.result),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(envelope) => Some(&envelope.error),
        }
    }

    pub fn error_type(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(envelope) => Some(&envelope.error_type),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Success(envelope) => envelope.timestamp,
            Self::Error(envelope) => envelope.timestamp,
        }
    }
}
