use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an agent runner across its runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Constructed or reset; no run in flight
    #[default]
    Idle,
    /// A run is executing or waiting out a backoff delay
    Running,
    /// The last run produced a success envelope
    Completed,
    /// The last run exhausted its retry budget or failed fast
    Error,
    /// The last run was cancelled before producing a result
    Cancelled,
}

impl AgentStatus {
    /// Check if this is a terminal state for the most recent run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error | Self::Cancelled)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "error" => Ok(Self::Error),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid agent status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde() {
        for status in [
            AgentStatus::Idle,
            AgentStatus::Running,
            AgentStatus::Completed,
            AgentStatus::Error,
            AgentStatus::Cancelled,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.to_string());
            assert_eq!(status.to_string().parse::<AgentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_paused_is_not_a_status() {
        assert!("paused".parse::<AgentStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!AgentStatus::Idle.is_terminal());
        assert!(!AgentStatus::Running.is_terminal());
        assert!(AgentStatus::Completed.is_terminal());
        assert!(AgentStatus::Error.is_terminal());
        assert!(AgentStatus::Cancelled.is_terminal());
    }
}
