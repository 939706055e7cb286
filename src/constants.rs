//! # System Constants
//!
//! Well-known context keys, retry defaults, and envelope vocabulary shared by the
//! agent runner, the phase orchestrator, and the final blog projection.

/// Keys the orchestrator reads from and writes into the execution context
pub mod context_keys {
    /// Map of agent key to the successful result envelope of that agent
    pub const AGENT_RESULTS: &str = "agent_results";

    /// Map of phase display name to the outcome of that phase
    pub const PHASE_RESULTS: &str = "phase_results";

    /// Blog topic supplied by the caller
    pub const TOPIC: &str = "topic";

    pub const TONE: &str = "tone";
    pub const TARGET_AUDIENCE: &str = "target_audience";
    pub const CONTENT_LENGTH: &str = "content_length";
}

/// Retry and timeout defaults applied when configuration is silent
pub mod defaults {
    /// Additional attempts after the first failure
    pub const MAX_RETRIES: u32 = 3;

    /// Unit of exponential backoff; retry `n` waits `unit * 2^n`
    pub const BACKOFF_UNIT_MS: u64 = 1000;

    /// Upper bound for a single backoff delay
    pub const MAX_BACKOFF_MS: u64 = 60_000;

    /// Per-attempt execution deadline
    pub const AGENT_TIMEOUT_SECONDS: u64 = 120;

    /// Agents run one at a time inside a phase unless configured otherwise
    pub const MAX_CONCURRENT_AGENTS: usize = 1;

    /// SEO score reported when no upstream agent produced one
    pub const SEO_SCORE: f64 = 85.0;

    pub const TONE: &str = "professional";
    pub const TARGET_AUDIENCE: &str = "general";
    pub const CONTENT_LENGTH: &str = "1500-2000";
}

/// Error classifications carried in error envelopes
pub mod error_types {
    pub const DEPENDENCY_ERROR: &str = "DependencyError";
    pub const EXECUTION_ERROR: &str = "ExecutionError";
    pub const TIMEOUT_ERROR: &str = "TimeoutError";
    pub const CANCELLATION_ERROR: &str = "CancellationError";
}

/// System-wide constants
pub mod system {
    /// Crate version reported by the CLI and pipeline logs
    pub const BLOGSUITE_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Environment used when no environment variable selects one
    pub const DEFAULT_ENVIRONMENT: &str = "development";
}
