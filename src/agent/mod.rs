//! # Agent Execution
//!
//! The [`Agent`] trait is the single extension point for business logic.
//! [`AgentRunner`] wraps one agent with retries, deadlines, cancellation,
//! metrics, and the [`ResultEnvelope`] contract.
//!
//! ```rust
//! use std::sync::Arc;
//! use blogsuite_core::agent::{AgentDescriptor, AgentInput, AgentOutput, AgentRunner, ExecutionContext, FnAgent};
//! use blogsuite_core::orchestration::Phase;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let echo = FnAgent::new(|input: &AgentInput| {
//!     let x = input.get("x").and_then(|v| v.as_i64()).unwrap_or_default();
//!     let mut output = AgentOutput::new();
//!     output.insert("value".to_string(), json!(x + 1));
//!     Ok(output)
//! });
//!
//! let runner = AgentRunner::new(AgentDescriptor::new("Echo", Phase::IdeationAndPlanning), Arc::new(echo));
//! let envelope = runner.run(&ExecutionContext::from_value(json!({"x": 5}))?).await;
//!
//! assert!(envelope.is_success());
//! assert_eq!(envelope.result().unwrap()["value"], 6);
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod context;
pub mod envelope;
pub mod runner;
pub mod stats;
pub mod status;
pub mod traits;

pub use backoff::BackoffPolicy;
pub use context::ExecutionContext;
pub use envelope::{ErrorEnvelope, ResultEnvelope, SuccessEnvelope};
pub use runner::{AgentRunner, RunnerSettings};
pub use stats::AgentStats;
pub use status::AgentStatus;
pub use traits::{Agent, AgentDescriptor, AgentInput, AgentOutput, FnAgent};
