//! # Phase Log
//!
//! Append-only record of phase outcomes on top of the caller's initial input.
//! Phases never write into a shared context; the context each phase sees is
//! projected from the log by [`PhaseLog::view`].
//!
//! The projection holds:
//!
//! - every key of the initial input
//! - `agent_results`: successful envelopes of all completed phases, by agent key
//! - `phase_results`: every recorded outcome, by phase display name
//!
//! Caller-supplied `agent_results` or `phase_results` keys are replaced by the
//! projection.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::outcome::PhaseOutcome;
use super::phase::Phase;
use crate::agent::ExecutionContext;
use crate::constants::context_keys;

#[derive(Debug, Clone, Default)]
pub struct PhaseLog {
    initial: Map<String, Value>,
    entries: Vec<(Phase, PhaseOutcome)>,
}

impl PhaseLog {
    pub fn new(initial: Map<String, Value>) -> Self {
        Self {
            initial,
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, phase: Phase, outcome: PhaseOutcome) {
        self.entries.push((phase, outcome));
    }

    pub fn entries(&self) -> &[(Phase, PhaseOutcome)] {
        &self.entries
    }

    pub fn initial(&self) -> &Map<String, Value> {
        &self.initial
    }

    /// Latest outcome recorded for `phase`
    pub fn outcome(&self, phase: Phase) -> Option<&PhaseOutcome> {
        self.entries
            .iter()
            .rev()
            .find(|(logged, _)| *logged == phase)
            .map(|(_, outcome)| outcome)
    }

    pub fn completed_phases(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_completed())
            .count()
    }

    /// Project the context the next phase should see
    pub fn view(&self) -> ExecutionContext {
        let mut values = self.initial.clone();
        let mut agent_results = Map::new();
        let mut phase_results = Map::new();

        for (phase, outcome) in &self.entries {
            for envelope in outcome.successful_envelopes() {
                agent_results.insert(envelope.agent_key().to_string(), to_json(envelope));
            }
            phase_results.insert(phase.display_name().to_string(), to_json(outcome));
        }

        values.insert(
            context_keys::AGENT_RESULTS.to_string(),
            Value::Object(agent_results),
        );
        values.insert(
            context_keys::PHASE_RESULTS.to_string(),
            Value::Object(phase_results),
        );

        ExecutionContext::new(values)
    }

    /// Outcomes keyed by phase, the latest entry winning
    pub fn into_phase_results(self) -> BTreeMap<Phase, PhaseOutcome> {
        self.entries.into_iter().collect()
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to project value into execution context");
        Value::Null
    })
}
