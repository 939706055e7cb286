//! # Structured Logging Module
//!
//! Environment-aware structured logging for agent runs, phases, and whole
//! pipelines. Console output is human-readable by default and JSON lines when
//! `logging.json` is set.

use std::sync::OnceLock;

use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{ConfigManager, LoggingConfig};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let log_level = config.effective_level(&environment);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

        let console_layer = if config.json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // Use try_init to avoid panic if a global subscriber is already set
        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            level = %log_level,
            json = config.json,
            "STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Log structured data for agent runner operations
pub fn log_agent_operation(
    operation: &str,
    agent_key: &str,
    phase: &str,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        agent_key = %agent_key,
        phase = %phase,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "AGENT_OPERATION"
    );
}

/// Log structured data for phase operations
pub fn log_phase_operation(
    operation: &str,
    phase: &str,
    agent_count: Option<usize>,
    status: &str,
    duration_ms: Option<u64>,
) {
    tracing::info!(
        operation = %operation,
        phase = %phase,
        agent_count = agent_count,
        status = %status,
        duration_ms = duration_ms,
        timestamp = %Utc::now().to_rfc3339(),
        "PHASE_OPERATION"
    );
}

/// Log structured data for full pipeline runs
pub fn log_pipeline_operation(
    operation: &str,
    run_id: &str,
    topic: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        run_id = %run_id,
        topic = topic,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "PIPELINE_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_initialization_is_tolerated() {
        let config = LoggingConfig {
            level: Some("debug".to_string()),
            json: true,
        };

        init_structured_logging(&config);
        init_structured_logging(&LoggingConfig::default());

        assert!(LOGGER_INITIALIZED.get().is_some());
    }

    #[test]
    fn test_helpers_do_not_require_a_subscriber() {
        log_agent_operation("run", "EchoAgent", "Ideation & Planning", "success", None);
        log_phase_operation("run_phase", "Promotion", Some(4), "completed", Some(12));
        log_pipeline_operation("create_full_blog", "run-1", Some("Rust"), "started", None);
        log_error("orchestrator", "run_phase", "Unknown phase: Typo", Some("test"));
    }
}
