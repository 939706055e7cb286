//! # Blog Suite Configuration System
//!
//! Layered configuration for the agent runner and the phase orchestrator.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults (`SuiteConfig::default()`)
//! 2. `config/blogsuite.toml`
//! 3. `config/blogsuite.{environment}.toml`
//! 4. `BLOGSUITE__SECTION__KEY` environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use blogsuite_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//!
//! let retries = manager.config().agent.max_retries;
//! let phases = manager.config().pipeline_phases()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{context_keys, defaults};
use crate::orchestration::Phase;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring `config/blogsuite.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Retry, backoff, and deadline settings shared by every agent runner
    pub agent: AgentConfig,

    /// Phase sequencing settings
    pub orchestration: OrchestrationConfig,

    pub logging: LoggingConfig,

    /// Values seeded into the initial execution context when the caller omits them
    pub defaults: ContentDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_retries: u32,
    pub backoff_unit_ms: u64,
    pub max_backoff_ms: u64,
    /// Per-attempt deadline; `None` or 0 disables it
    pub timeout_seconds: Option<u64>,
    /// Spend retry budget on unmet dependencies instead of failing fast
    pub retry_dependency_errors: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::MAX_RETRIES,
            backoff_unit_ms: defaults::BACKOFF_UNIT_MS,
            max_backoff_ms: defaults::MAX_BACKOFF_MS,
            timeout_seconds: Some(defaults::AGENT_TIMEOUT_SECONDS),
            retry_dependency_errors: false,
        }
    }
}

impl AgentConfig {
    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OrchestrationConfig {
    /// Runners executed at once inside one phase; 1 keeps declaration order strictly sequential
    pub max_concurrent_agents: usize,

    /// Phase display names run by `create_full_blog`, in order
    pub phases: Vec<String>,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_agents: defaults::MAX_CONCURRENT_AGENTS,
            phases: Phase::default_sequence()
                .iter()
                .map(|phase| phase.display_name().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive; derived from the environment when unset
    pub level: Option<String>,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl LoggingConfig {
    pub fn effective_level(&self, environment: &str) -> String {
        if let Some(level) = &self.level {
            return level.clone();
        }

        match environment {
            "production" => "info".to_string(),
            _ => "debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentDefaults {
    pub tone: String,
    pub target_audience: String,
    pub content_length: String,
}

impl Default for ContentDefaults {
    fn default() -> Self {
        Self {
            tone: defaults::TONE.to_string(),
            target_audience: defaults::TARGET_AUDIENCE.to_string(),
            content_length: defaults::CONTENT_LENGTH.to_string(),
        }
    }
}

impl ContentDefaults {
    /// Insert each default the caller did not provide
    pub fn apply_to(&self, input: &mut Map<String, Value>) {
        let entries = [
            (context_keys::TONE, &self.tone),
            (context_keys::TARGET_AUDIENCE, &self.target_audience),
            (context_keys::CONTENT_LENGTH, &self.content_length),
        ];

        for (key, value) in entries {
            input
                .entry(key.to_string())
                .or_insert_with(|| Value::String(value.clone()));
        }
    }
}

impl SuiteConfig {
    /// Resolve the configured phase names into the pipeline sequence
    pub fn pipeline_phases(&self) -> ConfigResult<Vec<Phase>> {
        let mut seen = HashSet::new();
        let mut phases = Vec::with_capacity(self.orchestration.phases.len());

        for name in &self.orchestration.phases {
            let phase: Phase = name.parse().map_err(|_| {
                ConfigurationError::invalid_value(
                    "orchestration.phases",
                    name.clone(),
                    "not a known phase",
                )
            })?;

            if !seen.insert(phase) {
                return Err(ConfigurationError::invalid_value(
                    "orchestration.phases",
                    name.clone(),
                    "phase listed more than once",
                ));
            }

            phases.push(phase);
        }

        Ok(phases)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.orchestration.max_concurrent_agents == 0 {
            return Err(ConfigurationError::invalid_value(
                "orchestration.max_concurrent_agents",
                "0",
                "at least one agent must be allowed to run",
            ));
        }

        if self.orchestration.phases.is_empty() {
            return Err(ConfigurationError::validation_error(
                "orchestration.phases must name at least one phase",
            ));
        }

        self.pipeline_phases()?;

        if self.agent.max_backoff_ms < self.agent.backoff_unit_ms {
            return Err(ConfigurationError::invalid_value(
                "agent.max_backoff_ms",
                self.agent.max_backoff_ms.to_string(),
                format!(
                    "must not be below agent.backoff_unit_ms ({})",
                    self.agent.backoff_unit_ms
                ),
            ));
        }

        Ok(())
    }
}
