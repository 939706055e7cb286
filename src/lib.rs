#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # BlogSuite Core
//!
//! Agent execution and phase orchestration for a multi-agent blog creation
//! pipeline.
//!
//! ## Overview
//!
//! A blog is produced by running a fixed sequence of phases. Each phase holds
//! an ordered set of agents; every agent is wrapped by a runner that owns its
//! retry policy, per-attempt deadline, status, and metrics, and that always
//! answers with a [`ResultEnvelope`](agent::ResultEnvelope). The orchestrator
//! threads results from phase to phase and compiles the final blog.
//!
//! ## Module Organization
//!
//! - [`agent`] - Agent trait, runner, envelopes, status and stats
//! - [`agents`] - Built-in agent catalog
//! - [`registry`] - Agent registry keyed by phase and agent key
//! - [`orchestration`] - Phases, phase log, orchestrator, final blog
//! - [`config`] - Layered TOML and environment configuration
//! - [`logging`] - Structured logging setup and helpers
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blogsuite_core::agent::ExecutionContext;
//! use blogsuite_core::config::SuiteConfig;
//! use blogsuite_core::orchestration::PhaseOrchestrator;
//! use serde_json::json;
//!
//! # async fn example() -> blogsuite_core::Result<()> {
//! let orchestrator = PhaseOrchestrator::from_config(&SuiteConfig::default())?;
//! let input = ExecutionContext::from_value(json!({"topic": "Async Rust"}))?;
//!
//! let result = orchestrator.create_full_blog(input).await;
//! println!("{}", result.final_blog.title);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod agents;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod orchestration;
pub mod registry;

pub use agent::{Agent, AgentRunner, AgentStatus, ExecutionContext, ResultEnvelope};
pub use config::{ConfigManager, SuiteConfig};
pub use error::{AgentError, BlogSuiteError, OrchestrationError, Result};
pub use orchestration::{FinalBlog, Phase, PhaseOrchestrator, PhaseOutcome, PipelineResult};
pub use registry::AgentRegistry;
