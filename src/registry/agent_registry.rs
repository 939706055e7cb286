//! # Agent Registry
//!
//! Maps every phase to its ordered agent runners and indexes runners by key.
//!
//! ## Usage
//!
//! ```rust
//! use blogsuite_core::config::AgentConfig;
//! use blogsuite_core::orchestration::Phase;
//! use blogsuite_core::registry::AgentRegistry;
//!
//! let registry = AgentRegistry::builtin(&AgentConfig::default()).unwrap();
//!
//! assert_eq!(registry.runners_for(Phase::Promotion).len(), 4);
//! assert!(registry.get("KeywordExtractionAgent").is_some());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::agent::{Agent, AgentDescriptor, AgentRunner};
use crate::agents::{agent_keys, builtin_agent};
use crate::config::AgentConfig;
use crate::error::OrchestrationError;
use crate::orchestration::Phase;

/// Registry statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_agents: usize,
    pub agents_per_phase: BTreeMap<Phase, usize>,
}

#[derive(Default)]
pub struct AgentRegistry {
    by_key: DashMap<String, Arc<AgentRunner>>,
    by_phase: RwLock<BTreeMap<Phase, Vec<Arc<AgentRunner>>>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full built-in catalog, every runner sharing `config`
    pub fn builtin(config: &AgentConfig) -> Result<Self, OrchestrationError> {
        let registry = Self::new();

        for phase in Phase::ALL {
            for key in agent_keys(phase) {
                let (descriptor, agent) = builtin_agent(key, phase);
                registry.register_agent(descriptor, agent, config)?;
            }
        }

        info!(
            total_agents = registry.len(),
            phases = Phase::ALL.len(),
            "Built-in agent catalog registered"
        );

        Ok(registry)
    }

    /// Wrap `agent` in a runner configured from `config` and register it
    pub fn register_agent(
        &self,
        descriptor: AgentDescriptor,
        agent: Arc<dyn Agent>,
        config: &AgentConfig,
    ) -> Result<Arc<AgentRunner>, OrchestrationError> {
        self.register(AgentRunner::with_config(descriptor, agent, config))
    }

    /// Append a runner to the end of its phase; duplicate keys are rejected
    pub fn register(&self, runner: AgentRunner) -> Result<Arc<AgentRunner>, OrchestrationError> {
        let runner = Arc::new(runner);
        let key = runner.key().to_string();

        match self.by_key.entry(key.clone()) {
            Entry::Occupied(_) => return Err(OrchestrationError::DuplicateAgent { key }),
            Entry::Vacant(entry) => {
                entry.insert(runner.clone());
            }
        }

        let phase = runner.descriptor().phase;
        self.by_phase
            .write()
            .entry(phase)
            .or_default()
            .push(runner.clone());

        debug!(agent_key = %key, phase = %phase, "Registered agent");
        Ok(runner)
    }

    /// Runners of `phase` in registration order
    pub fn runners_for(&self, phase: Phase) -> Vec<Arc<AgentRunner>> {
        self.by_phase
            .read()
            .get(&phase)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<AgentRunner>> {
        self.by_key.get(key).map(|entry| entry.value().clone())
    }

    pub fn require(&self, key: &str) -> Result<Arc<AgentRunner>, OrchestrationError> {
        self.get(key)
            .ok_or_else(|| OrchestrationError::UnknownAgent(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Every runner, phase by phase in pipeline order
    pub fn all_runners(&self) -> Vec<Arc<AgentRunner>> {
        self.by_phase
            .read()
            .values()
            .flat_map(|runners| runners.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        let agents_per_phase = self
            .by_phase
            .read()
            .iter()
            .map(|(phase, runners)| (*phase, runners.len()))
            .collect();

        RegistryStats {
            total_agents: self.len(),
            agents_per_phase,
        }
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("total_agents", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentInput, AgentOutput, FnAgent};

    fn noop() -> Arc<dyn Agent> {
        Arc::new(FnAgent::new(|_: &AgentInput| Ok(AgentOutput::new())))
    }

    #[test]
    fn test_builtin_catalog_is_complete() {
        let registry = AgentRegistry::builtin(&AgentConfig::default()).unwrap();
        let stats = registry.stats();

        assert_eq!(stats.total_agents, 166);
        assert_eq!(stats.agents_per_phase.len(), 19);
        assert_eq!(stats.agents_per_phase[&Phase::IdeationAndPlanning], 17);
        assert_eq!(stats.agents_per_phase[&Phase::AuxiliarySupport], 16);
    }

    #[test]
    fn test_runners_keep_declaration_order() {
        let registry = AgentRegistry::builtin(&AgentConfig::default()).unwrap();
        let keys: Vec<String> = registry
            .runners_for(Phase::Promotion)
            .iter()
            .map(|runner| runner.key().to_string())
            .collect();

        assert_eq!(
            keys,
            vec![
                "SocialMediaGeneratorAgent",
                "PromotionGenerationAgent",
                "PromotionSchedulerAgent",
                "NewsletterContentGeneratorAgent",
            ]
        );
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let registry = AgentRegistry::new();
        let config = AgentConfig::default();

        registry
            .register_agent(AgentDescriptor::new("EchoAgent", Phase::Promotion), noop(), &config)
            .unwrap();
        let duplicate = registry.register_agent(
            AgentDescriptor::new("EchoAgent", Phase::AnalyticsAndUpdate),
            noop(),
            &config,
        );

        assert_eq!(
            duplicate.unwrap_err(),
            OrchestrationError::DuplicateAgent {
                key: "EchoAgent".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.runners_for(Phase::AnalyticsAndUpdate).is_empty());
    }

    #[test]
    fn test_unknown_key_lookup() {
        let registry = AgentRegistry::new();
        assert!(matches!(
            registry.require("Nope"),
            Err(OrchestrationError::UnknownAgent(_))
        ));
    }
}
