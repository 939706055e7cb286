//! # Agent Runner
//!
//! Execution wrapper around a single [`Agent`]: dependency validation, retry
//! with exponential backoff, a per-attempt deadline, cooperative cancellation,
//! run metrics, and the [`ResultEnvelope`] contract.
//!
//! ## Run lifecycle
//!
//! `idle -> running -> (completed | error | cancelled)`
//!
//! A run reaches `error` once its retry budget is spent, or on the first
//! dependency failure unless `retry_dependency_errors` is set. Errors raised by
//! agent logic never escape [`AgentRunner::run`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use tokio::time::{timeout, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::backoff::BackoffPolicy;
use super::context::ExecutionContext;
use super::envelope::{ErrorEnvelope, ResultEnvelope, SuccessEnvelope};
use super::stats::{self, AgentStats};
use super::status::AgentStatus;
use super::traits::{Agent, AgentDescriptor, AgentInput, AgentOutput};
use crate::config::AgentConfig;
use crate::error::{AgentError, BlogSuiteError, Result};
use crate::logging::log_agent_operation;

const MAX_RETRIES_KEY: &str = "max_retries";

/// Retry, deadline, and configuration settings of one runner
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub max_retries: u32,
    pub backoff: BackoffPolicy,
    pub timeout: Option<Duration>,
    pub retry_dependency_errors: bool,
    /// Stored configuration handed to the agent on every attempt
    pub config: Map<String, Value>,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self::from(&AgentConfig::default())
    }
}

impl From<&AgentConfig> for RunnerSettings {
    fn from(config: &AgentConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: BackoffPolicy::from(config),
            timeout: config.timeout(),
            retry_dependency_errors: config.retry_dependency_errors,
            config: Map::new(),
        }
    }
}

#[derive(Debug, Default)]
struct RunnerState {
    status: AgentStatus,
    success_count: u64,
    failure_count: u64,
    retry_count: u32,
    last_execution_time: f64,
    total_execution_time: f64,
    cached_output: Option<AgentOutput>,
    last_run_at: Option<DateTime<Utc>>,
    cancellation: Option<CancellationToken>,
}

pub struct AgentRunner {
    descriptor: AgentDescriptor,
    agent: Arc<dyn Agent>,
    settings: RwLock<RunnerSettings>,
    state: Mutex<RunnerState>,
    created_at: DateTime<Utc>,
}

impl AgentRunner {
    /// Create a runner with default retry settings
    pub fn new(descriptor: AgentDescriptor, agent: Arc<dyn Agent>) -> Self {
        Self::with_settings(descriptor, agent, RunnerSettings::default())
    }

    pub fn with_config(
        descriptor: AgentDescriptor,
        agent: Arc<dyn Agent>,
        config: &AgentConfig,
    ) -> Self {
        Self::with_settings(descriptor, agent, RunnerSettings::from(config))
    }

    pub fn with_settings(
        descriptor: AgentDescriptor,
        agent: Arc<dyn Agent>,
        settings: RunnerSettings,
    ) -> Self {
        Self {
            descriptor,
            agent,
            settings: RwLock::new(settings),
            state: Mutex::new(RunnerState::default()),
            created_at: Utc::now(),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.settings.get_mut().max_retries = max_retries;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.settings.get_mut().backoff = backoff;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.settings.get_mut().timeout = timeout;
        self
    }

    pub fn with_retry_dependency_errors(mut self, enabled: bool) -> Self {
        self.settings.get_mut().retry_dependency_errors = enabled;
        self
    }

    pub fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    pub fn key(&self) -> &str {
        &self.descriptor.key
    }

    pub fn status(&self) -> AgentStatus {
        self.state.lock().status
    }

    pub fn settings(&self) -> RunnerSettings {
        self.settings.read().clone()
    }

    /// Run with a fresh cancellation scope
    pub async fn run(&self, context: &ExecutionContext) -> ResultEnvelope {
        self.run_with_cancellation(context, &CancellationToken::new())
            .await
    }

    /// Run under `parent`; cancelling it, or calling [`cancel`](Self::cancel),
    /// ends the run with a `CancellationError` envelope
    #[instrument(skip_all, fields(agent_key = %self.descriptor.key, phase = %self.descriptor.phase))]
    pub async fn run_with_cancellation(
        &self,
        context: &ExecutionContext,
        parent: &CancellationToken,
    ) -> ResultEnvelope {
        let token = parent.child_token();
        let settings = self.settings.read().clone();
        let started = Instant::now();

        {
            let mut state = self.state.lock();
            state.status = AgentStatus::Running;
            state.last_run_at = Some(Utc::now());
            state.cancellation = Some(token.clone());
        }

        info!(
            agent = %self.descriptor.name,
            max_retries = settings.max_retries,
            "Starting execution of agent"
        );

        let mut attempt: u32 = 1;
        loop {
            let error = match self.attempt(context, &settings, attempt, &token).await {
                Ok(output) => return self.record_success(output, attempt, started),
                Err(error) => error,
            };

            if matches!(error, AgentError::Cancelled { .. }) {
                return self.record_cancelled(error, attempt, started);
            }

            self.state.lock().retry_count = attempt;

            let retryable = error.is_retryable(settings.retry_dependency_errors);
            if !retryable || attempt > settings.max_retries {
                return self.record_failure(error, attempt, started);
            }

            let delay = settings.backoff.delay_for_retry(attempt);
            warn!(
                attempt = attempt,
                error = %error,
                error_type = error.error_type(),
                delay_ms = delay.as_millis() as u64,
                "Attempt failed, retrying after backoff"
            );

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    let cancelled = AgentError::Cancelled { agent: self.descriptor.name.clone() };
                    return self.record_cancelled(cancelled, attempt, started);
                }
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    async fn attempt(
        &self,
        context: &ExecutionContext,
        settings: &RunnerSettings,
        attempt: u32,
        token: &CancellationToken,
    ) -> std::result::Result<AgentOutput, AgentError> {
        let missing = self.missing_dependencies(context);
        if !missing.is_empty() {
            return Err(AgentError::Dependency {
                agent: self.descriptor.name.clone(),
                missing,
            });
        }

        let input = AgentInput {
            context: context.clone(),
            config: settings.config.clone(),
            attempt,
            cancellation: token.clone(),
        };

        let guarded = async {
            match settings.timeout {
                Some(limit) => match timeout(limit, self.agent.execute(&input)).await {
                    Ok(result) => result.map_err(AgentError::from),
                    Err(_) => {
                        error!(attempt = attempt, "Agent execution timed out after {:?}", limit);
                        Err(AgentError::Timeout {
                            agent: self.descriptor.name.clone(),
                            after: limit,
                        })
                    }
                },
                None => self.agent.execute(&input).await.map_err(AgentError::from),
            }
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(AgentError::Cancelled {
                agent: self.descriptor.name.clone(),
            }),
            result = guarded => result,
        }
    }

    fn record_success(&self, output: AgentOutput, attempt: u32, started: Instant) -> ResultEnvelope {
        let execution_time = started.elapsed().as_secs_f64();

        {
            let mut state = self.state.lock();
            state.success_count += 1;
            state.status = AgentStatus::Completed;
            state.retry_count = 0;
            state.last_execution_time = execution_time;
            state.total_execution_time += execution_time;
            state.cached_output = Some(output.clone());
            state.cancellation = None;
        }

        info!(
            attempt = attempt,
            execution_time = execution_time,
            "Completed execution of agent"
        );
        self.log_outcome("completed", attempt);

        ResultEnvelope::Success(SuccessEnvelope {
            agent: self.descriptor.name.clone(),
            agent_key: self.descriptor.key.clone(),
            phase: self.descriptor.phase,
            execution_time,
            attempt,
            result: output,
            timestamp: Utc::now(),
        })
    }

    fn record_failure(&self, error: AgentError, attempts: u32, started: Instant) -> ResultEnvelope {
        let execution_time = started.elapsed().as_secs_f64();

        {
            let mut state = self.state.lock();
            state.failure_count += 1;
            state.status = AgentStatus::Error;
            state.last_execution_time = execution_time;
            state.cancellation = None;
        }

        error!(
            attempts = attempts,
            error = %error,
            error_type = error.error_type(),
            "Max retries exceeded for agent"
        );
        self.log_outcome("error", attempts);

        self.error_envelope(error, attempts, execution_time)
    }

    fn record_cancelled(&self, error: AgentError, attempts: u32, started: Instant) -> ResultEnvelope {
        let execution_time = started.elapsed().as_secs_f64();

        {
            let mut state = self.state.lock();
            state.status = AgentStatus::Cancelled;
            state.last_execution_time = execution_time;
            state.cancellation = None;
        }

        warn!(attempts = attempts, "Agent execution cancelled");
        self.log_outcome("cancelled", attempts);

        self.error_envelope(error, attempts, execution_time)
    }

    fn log_outcome(&self, status: &str, attempts: u32) {
        let details = format!("attempts={attempts}");
        log_agent_operation(
            "run",
            &self.descriptor.key,
            self.descriptor.phase.display_name(),
            status,
            Some(&details),
        );
    }

    fn error_envelope(&self, error: AgentError, attempts: u32, execution_time: f64) -> ResultEnvelope {
        ResultEnvelope::Error(ErrorEnvelope {
            agent: self.descriptor.name.clone(),
            agent_key: self.descriptor.key.clone(),
            phase: self.descriptor.phase,
            execution_time,
            attempts,
            error_type: error.error_type().to_string(),
            error: error.to_string(),
            result: None,
            timestamp: Utc::now(),
        })
    }

    /// Whether every declared dependency already has a result in `agent_results`
    pub fn validate_dependencies(&self, context: &ExecutionContext) -> bool {
        self.missing_dependencies(context).is_empty()
    }

    fn missing_dependencies(&self, context: &ExecutionContext) -> Vec<String> {
        let missing: Vec<String> = self
            .descriptor
            .dependencies
            .iter()
            .filter(|dependency| !context.has_agent_result(dependency))
            .cloned()
            .collect();

        for dependency in &missing {
            error!(dependency = %dependency, "Missing dependency");
        }

        missing
    }

    /// Request cancellation of the run in flight; false when idle
    pub fn cancel(&self) -> bool {
        match &self.state.lock().cancellation {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn get_stats(&self) -> AgentStats {
        let state = self.state.lock();
        let runs = state.success_count + state.failure_count;

        AgentStats {
            name: self.descriptor.name.clone(),
            key: self.descriptor.key.clone(),
            phase: self.descriptor.phase,
            description: self.descriptor.description.clone(),
            status: state.status,
            success_count: state.success_count,
            failure_count: state.failure_count,
            success_rate: stats::success_rate(state.success_count, state.failure_count),
            last_execution_time: state.last_execution_time,
            average_execution_time: stats::average_execution_time(state.total_execution_time, runs),
            total_execution_time: stats::round_to(state.total_execution_time, 3),
            retry_count: state.retry_count,
            dependencies: self.descriptor.dependencies.clone(),
            created_at: self.created_at,
            last_run_at: state.last_run_at,
        }
    }

    /// Zero counters and timings, drop the cached output, and return to idle.
    ///
    /// `last_run_at` survives a reset.
    pub fn reset_stats(&self) {
        let mut state = self.state.lock();
        state.success_count = 0;
        state.failure_count = 0;
        state.retry_count = 0;
        state.last_execution_time = 0.0;
        state.total_execution_time = 0.0;
        state.cached_output = None;
        state.status = AgentStatus::Idle;
        debug!(agent_key = %self.descriptor.key, "Agent stats reset");
    }

    /// Merge `overrides` into the stored configuration.
    ///
    /// `max_retries` replaces the retry budget; every other key is stored for
    /// the agent's own use.
    pub fn configure(&self, overrides: Map<String, Value>) -> Result<()> {
        let max_retries = match overrides.get(MAX_RETRIES_KEY) {
            Some(value) => Some(
                value
                    .as_u64()
                    .and_then(|retries| u32::try_from(retries).ok())
                    .ok_or_else(|| {
                        BlogSuiteError::Validation(format!(
                            "{MAX_RETRIES_KEY} must be a non-negative integer, got {value}"
                        ))
                    })?,
            ),
            None => None,
        };

        let mut settings = self.settings.write();
        let mut merged = settings.config.clone();
        merged.extend(overrides);

        self.agent
            .validate_config(&merged)
            .map_err(|e| BlogSuiteError::Validation(format!("{}: {e}", self.descriptor.key)))?;

        settings.config = merged;
        if let Some(max_retries) = max_retries {
            settings.max_retries = max_retries;
        }

        Ok(())
    }

    /// Result payload of the last successful run
    pub fn get_cached_output(&self) -> Option<AgentOutput> {
        self.state.lock().cached_output.clone()
    }
}

impl fmt::Display for AgentRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}",
            self.descriptor.name,
            self.descriptor.phase,
            self.status()
        )
    }
}

impl fmt::Debug for AgentRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentRunner")
            .field("descriptor", &self.descriptor)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
