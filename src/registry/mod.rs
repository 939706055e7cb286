//! # Registry Infrastructure
//!
//! Startup-time registry of agent runners, keyed by phase and by agent key.

pub mod agent_registry;

pub use agent_registry::{AgentRegistry, RegistryStats};
