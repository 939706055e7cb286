use std::time::Duration;

use crate::config::AgentConfig;

/// Exponential backoff between attempts of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub unit: Duration,
    pub max: Duration,
}

impl BackoffPolicy {
    pub fn new(unit: Duration, max: Duration) -> Self {
        Self { unit, max }
    }

    /// Delay before retry `retry` (1-indexed): `unit * 2^retry`, capped at `max`
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.unit
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
            .min(self.max)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from(&AgentConfig::default())
    }
}

impl From<&AgentConfig> for BackoffPolicy {
    fn from(config: &AgentConfig) -> Self {
        Self::new(config.backoff_unit(), config.max_backoff())
    }
}
