//! # Built-in Agents
//!
//! Catalog of stand-in agents installed by
//! [`AgentRegistry::builtin`](crate::registry::AgentRegistry::builtin).

pub mod builtin;
pub mod catalog;
pub mod naming;

pub use builtin::{builtin_agent, TemplateAgent};
pub use catalog::{agent_keys, total_agents};
