//! # Phase Orchestrator
//!
//! Runs phases of registered agents and threads their results forward.
//!
//! Every runner in a phase receives the same pre-phase snapshot, so phase
//! members never observe each other's output. Between phases the orchestrator
//! appends the outcome to a [`PhaseLog`] and projects the next snapshot from
//! it. A failing agent never aborts its phase; only cancellation stops a run
//! early.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::final_blog::FinalBlog;
use super::outcome::{PhaseOutcome, PipelineResult, PipelineStatus};
use super::phase::Phase;
use super::phase_log::PhaseLog;
use crate::agent::{AgentStats, ExecutionContext, ResultEnvelope};
use crate::config::{ContentDefaults, SuiteConfig};
use crate::constants::{context_keys, defaults, error_types};
use crate::error::Result;
use crate::logging::{log_error, log_phase_operation, log_pipeline_operation};
use crate::registry::AgentRegistry;

pub struct PhaseOrchestrator {
    registry: Arc<AgentRegistry>,
    phases: Vec<Phase>,
    max_concurrent_agents: usize,
    defaults: ContentDefaults,
    cancellation: Mutex<CancellationToken>,
}

impl PhaseOrchestrator {
    /// Orchestrate `registry` over the default phase sequence, one agent at a time
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self {
            registry,
            phases: Phase::default_sequence().to_vec(),
            max_concurrent_agents: defaults::MAX_CONCURRENT_AGENTS,
            defaults: ContentDefaults::default(),
            cancellation: Mutex::new(CancellationToken::new()),
        }
    }

    /// Validate `config` and build an orchestrator over the built-in catalog
    pub fn from_config(config: &SuiteConfig) -> Result<Self> {
        config.validate()?;
        let registry = AgentRegistry::builtin(&config.agent)?;

        Ok(Self::new(Arc::new(registry))
            .with_phases(config.pipeline_phases()?)
            .with_max_concurrent_agents(config.orchestration.max_concurrent_agents)
            .with_defaults(config.defaults.clone()))
    }

    pub fn with_phases(mut self, phases: Vec<Phase>) -> Self {
        self.phases = phases;
        self
    }

    /// Values below 1 are treated as 1
    pub fn with_max_concurrent_agents(mut self, max_concurrent_agents: usize) -> Self {
        self.max_concurrent_agents = max_concurrent_agents.max(1);
        self
    }

    pub fn with_defaults(mut self, defaults: ContentDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    /// Phases run by [`create_full_blog`](Self::create_full_blog)
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Run every agent of `phase` against the same snapshot.
    ///
    /// Content defaults are seeded into `context` the same way a pipeline
    /// run seeds its initial context.
    pub async fn run_phase(&self, phase: Phase, context: &ExecutionContext) -> PhaseOutcome {
        let token = self.begin_run();
        let seeded = ExecutionContext::new(self.seed(context));
        self.execute_phase(phase, &seeded, &token).await
    }

    /// Resolve a free-text phase name, then run it.
    ///
    /// Unknown names produce an error outcome and touch no runner.
    pub async fn run_phase_named(&self, name: &str, context: &ExecutionContext) -> PhaseOutcome {
        match name.parse::<Phase>() {
            Ok(phase) => self.run_phase(phase, context).await,
            Err(e) => {
                log_error("orchestrator", "run_phase_named", &e.to_string(), Some(name));
                PhaseOutcome::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Run the configured phase sequence and compile the final blog
    pub async fn create_full_blog(&self, input: ExecutionContext) -> PipelineResult {
        let phases = self.phases.clone();
        self.run_pipeline(&phases, input).await
    }

    /// Run `phases` in order; a phase listed twice only runs the first time
    #[instrument(skip_all, fields(phases = phases.len()))]
    pub async fn run_pipeline(&self, phases: &[Phase], input: ExecutionContext) -> PipelineResult {
        let run_id = Uuid::new_v4();
        let run_label = run_id.to_string();
        let token = self.begin_run();
        let started = Instant::now();

        let initial = self.seed(&input);
        let topic = initial
            .get(context_keys::TOPIC)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        log_pipeline_operation("create_full_blog", &run_label, Some(&topic), "started", None);

        let mut log = PhaseLog::new(initial);
        let mut seen = HashSet::new();
        let mut status = PipelineStatus::Completed;

        for &phase in phases {
            if !seen.insert(phase) {
                warn!(phase = %phase, "Phase listed more than once, skipping repeat");
                continue;
            }

            if token.is_cancelled() {
                status = PipelineStatus::Cancelled;
                break;
            }

            let outcome = self.execute_phase(phase, &log.view(), &token).await;
            let cancelled = outcome.is_cancelled();
            log.append(phase, outcome);

            if cancelled {
                status = PipelineStatus::Cancelled;
                break;
            }
        }

        let phases_completed = log.completed_phases();
        let phase_results = log.into_phase_results();
        let final_blog = FinalBlog::compile(&topic, &phase_results);
        let execution_time = started.elapsed().as_secs_f64();

        let details = format!("{phases_completed}/{} phases completed", phases.len());
        let status_label = match status {
            PipelineStatus::Completed => "completed",
            PipelineStatus::Cancelled => "cancelled",
        };
        log_pipeline_operation(
            "create_full_blog",
            &run_label,
            Some(&topic),
            status_label,
            Some(&details),
        );

        PipelineResult {
            run_id,
            status,
            phases_completed,
            phase_results,
            final_blog,
            execution_time,
        }
    }

    async fn execute_phase(
        &self,
        phase: Phase,
        context: &ExecutionContext,
        token: &CancellationToken,
    ) -> PhaseOutcome {
        let runners = self.registry.runners_for(phase);
        let started = Instant::now();

        log_phase_operation("run_phase", phase.display_name(), Some(runners.len()), "started", None);

        let envelopes: Vec<ResultEnvelope> = if self.max_concurrent_agents <= 1 {
            let mut envelopes = Vec::with_capacity(runners.len());
            for runner in &runners {
                if token.is_cancelled() {
                    break;
                }
                envelopes.push(runner.run_with_cancellation(context, token).await);
            }
            envelopes
        } else {
            let pending: Vec<_> = runners
                .iter()
                .map(|runner| runner.run_with_cancellation(context, token))
                .collect();
            stream::iter(pending)
                .buffered(self.max_concurrent_agents)
                .collect()
                .await
        };

        // A cancel that lands after every runner finished leaves the phase complete
        let interrupted = token.is_cancelled()
            && (envelopes.len() < runners.len()
                || envelopes
                    .iter()
                    .any(|envelope| envelope.error_type() == Some(error_types::CANCELLATION_ERROR)));

        let execution_time = started.elapsed().as_secs_f64();
        let agent_results: BTreeMap<String, ResultEnvelope> = envelopes
            .into_iter()
            .map(|envelope| (envelope.agent_key().to_string(), envelope))
            .collect();

        let duration_ms = (execution_time * 1000.0) as u64;

        if interrupted {
            log_phase_operation("run_phase", phase.display_name(), None, "cancelled", Some(duration_ms));
            return PhaseOutcome::Cancelled {
                phase,
                agent_results,
                execution_time,
            };
        }

        let failed_agents: Vec<String> = runners
            .iter()
            .map(|runner| runner.key())
            .filter(|key| {
                agent_results
                    .get(*key)
                    .is_some_and(|envelope| !envelope.is_success())
            })
            .map(str::to_string)
            .collect();

        if !failed_agents.is_empty() {
            warn!(
                phase = %phase,
                failed = failed_agents.len(),
                "Phase completed with failed agents"
            );
        }

        info!(phase = %phase, agents = runners.len(), execution_time, "Phase completed");
        log_phase_operation(
            "run_phase",
            phase.display_name(),
            Some(runners.len()),
            "completed",
            Some(duration_ms),
        );

        PhaseOutcome::Completed {
            phase,
            agent_results,
            failed_agents,
            execution_time,
        }
    }

    /// Cancel the run in flight.
    ///
    /// Running agents get a `CancellationError` envelope and no further phase
    /// starts. The next run starts with a fresh scope.
    pub fn cancel(&self) {
        self.cancellation.lock().cancel();
        info!("Orchestrator cancellation requested");
    }

    fn seed(&self, input: &ExecutionContext) -> Map<String, Value> {
        let mut values = input.as_map().clone();
        self.defaults.apply_to(&mut values);
        values
    }

    fn begin_run(&self) -> CancellationToken {
        let mut token = self.cancellation.lock();
        if token.is_cancelled() {
            *token = CancellationToken::new();
        }
        token.child_token()
    }

    /// Stats of every registered runner, phase by phase
    pub fn agent_stats(&self) -> Vec<AgentStats> {
        self.registry
            .all_runners()
            .iter()
            .map(|runner| runner.get_stats())
            .collect()
    }

    pub fn reset_all_stats(&self) {
        for runner in self.registry.all_runners() {
            runner.reset_stats();
        }
    }
}

impl std::fmt::Debug for PhaseOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseOrchestrator")
            .field("registry", &self.registry)
            .field("phases", &self.phases)
            .field("max_concurrent_agents", &self.max_concurrent_agents)
            .finish_non_exhaustive()
    }
}
