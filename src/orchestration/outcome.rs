use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::final_blog::FinalBlog;
use super::phase::Phase;
use crate::agent::{AgentOutput, ResultEnvelope};

/// Record of one phase run, tagged on `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// Every runner produced an envelope; some may be errors
    Completed {
        phase: Phase,
        agent_results: BTreeMap<String, ResultEnvelope>,
        failed_agents: Vec<String>,
        execution_time: f64,
    },
    /// Cancellation arrived before the phase finished; holds what did finish
    Cancelled {
        phase: Phase,
        agent_results: BTreeMap<String, ResultEnvelope>,
        execution_time: f64,
    },
    /// The phase could not be run at all
    Error { message: String },
}

impl PhaseOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Completed { .. } => "completed",
            Self::Cancelled { .. } => "cancelled",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn agent_results(&self) -> Option<&BTreeMap<String, ResultEnvelope>> {
        match self {
            Self::Completed { agent_results, .. } | Self::Cancelled { agent_results, .. } => {
                Some(agent_results)
            }
            Self::Error { .. } => None,
        }
    }

    /// Successful envelopes of a completed phase, in agent key order
    pub fn successful_envelopes(&self) -> impl Iterator<Item = &ResultEnvelope> {
        let results = match self {
            Self::Completed { agent_results, .. } => Some(agent_results),
            _ => None,
        };

        results
            .into_iter()
            .flat_map(|results| results.values())
            .filter(|envelope| envelope.is_success())
    }

    /// Result payloads of the successful agents of a completed phase
    pub fn successful_results(&self) -> impl Iterator<Item = &AgentOutput> {
        self.successful_envelopes()
            .filter_map(ResultEnvelope::result)
    }

    pub fn failed_agents(&self) -> &[String] {
        match self {
            Self::Completed { failed_agents, .. } => failed_agents,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Completed,
    Cancelled,
}

/// Outcome of a full blog creation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub status: PipelineStatus,
    /// Phases whose outcome is `completed`
    pub phases_completed: usize,
    /// Outcome of every phase that ran, serialized under its display name
    pub phase_results: BTreeMap<Phase, PhaseOutcome>,
    pub final_blog: FinalBlog,
    pub execution_time: f64,
}

impl PipelineResult {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseOutcome> {
        self.phase_results.get(&phase)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == PipelineStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_outcome_shape() {
        let outcome = PhaseOutcome::Error {
            message: "Unknown phase: Typo".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "error", "message": "Unknown phase: Typo"})
        );
        assert!(outcome.agent_results().is_none());
        assert_eq!(outcome.successful_envelopes().count(), 0);
    }

    #[test]
    fn test_completed_outcome_shape() {
        let outcome = PhaseOutcome::Completed {
            phase: Phase::Promotion,
            agent_results: BTreeMap::new(),
            failed_agents: vec![],
            execution_time: 0.5,
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["phase"], "Promotion");
        assert_eq!(value["agent_results"], json!({}));
    }
}
