use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::context::ExecutionContext;
use crate::agents::naming;
use crate::orchestration::Phase;

/// Payload returned by an agent's logic
pub type AgentOutput = Map<String, Value>;

/// Everything one attempt of an agent's logic may read
#[derive(Debug, Clone)]
pub struct AgentInput {
    pub context: ExecutionContext,
    /// The runner's stored configuration, including keys the runner does not interpret
    pub config: Map<String, Value>,
    /// 1-indexed attempt number within the current run
    pub attempt: u32,
    pub cancellation: CancellationToken,
}

impl AgentInput {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    pub fn topic(&self) -> Option<&str> {
        self.context.topic()
    }

    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

/// Unit of work wrapped by an [`AgentRunner`](super::AgentRunner)
///
/// Implementations only supply business logic; retries, deadlines, metrics,
/// and the result envelope belong to the runner.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput>;

    /// Validate configuration before the runner stores it - optional validation hook
    fn validate_config(&self, config: &Map<String, Value>) -> anyhow::Result<()> {
        let _ = config;
        Ok(())
    }
}

/// Adapts a synchronous closure into an [`Agent`]
pub struct FnAgent<F> {
    func: F,
}

impl<F> FnAgent<F>
where
    F: Fn(&AgentInput) -> anyhow::Result<AgentOutput> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Agent for FnAgent<F>
where
    F: Fn(&AgentInput) -> anyhow::Result<AgentOutput> + Send + Sync,
{
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        (self.func)(input)
    }
}

impl<F> fmt::Debug for FnAgent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAgent").finish_non_exhaustive()
    }
}

/// Static identity of an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Type-style key used in `agent_results` and in dependency lists
    pub key: String,
    /// Human-readable name carried in envelopes and stats
    pub name: String,
    pub phase: Phase,
    pub description: String,
    /// Agent keys whose successful output must already be in `agent_results`
    pub dependencies: Vec<String>,
}

impl AgentDescriptor {
    /// Describe an agent, deriving its display name from the key
    pub fn new(key: impl Into<String>, phase: Phase) -> Self {
        let key = key.into();
        Self {
            name: naming::display_name(&key),
            key,
            phase,
            description: String::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}
