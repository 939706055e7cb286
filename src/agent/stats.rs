use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::AgentStatus;
use crate::orchestration::Phase;

/// Point-in-time metrics snapshot of one agent runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub key: String,
    pub phase: Phase,
    pub description: String,
    pub status: AgentStatus,
    pub success_count: u64,
    pub failure_count: u64,
    /// Percentage of finished runs that succeeded, 0 before the first run
    pub success_rate: f64,
    /// Seconds spent by the most recent finished run
    pub last_execution_time: f64,
    pub average_execution_time: f64,
    /// Seconds accumulated by successful runs
    pub total_execution_time: f64,
    pub retry_count: u32,
    pub dependencies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_run_at: Option<DateTime<Utc>>,
}

impl AgentStats {
    pub fn total_runs(&self) -> u64 {
        self.success_count + self.failure_count
    }
}

/// `success / (success + failure) * 100`, or 0 when nothing has finished yet
pub fn success_rate(success_count: u64, failure_count: u64) -> f64 {
    let total = success_count + failure_count;
    if total == 0 {
        return 0.0;
    }
    round_to(success_count as f64 / total as f64 * 100.0, 2)
}

pub fn average_execution_time(total_execution_time: f64, runs: u64) -> f64 {
    if runs == 0 {
        return 0.0;
    }
    round_to(total_execution_time / runs as f64, 3)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
