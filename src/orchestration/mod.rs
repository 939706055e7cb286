//! # Orchestration
//!
//! Phase sequencing on top of the agent runners.
//!
//! - [`Phase`]: the closed set of pipeline phases
//! - [`PhaseOrchestrator`]: runs phases and full pipelines
//! - [`PhaseLog`]: the append-only record each phase's context is projected from
//! - [`FinalBlog`]: the blog compiled from phase outcomes

pub mod final_blog;
pub mod orchestrator;
pub mod outcome;
pub mod phase;
pub mod phase_log;

pub use final_blog::{FieldSource, FinalBlog, CONTRACT};
pub use orchestrator::PhaseOrchestrator;
pub use outcome::{PhaseOutcome, PipelineResult, PipelineStatus};
pub use phase::Phase;
pub use phase_log::PhaseLog;
