//! Shared helpers for integration tests: scripted agents and runner builders.

#![allow(dead_code)]

pub mod strategies;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use blogsuite_core::agent::{
    Agent, AgentDescriptor, AgentInput, AgentOutput, AgentRunner, BackoffPolicy, ExecutionContext,
};
use blogsuite_core::orchestration::Phase;

/// Returns `{"value": x + 1}` for an integer `x` in the context
pub struct EchoAgent;

#[async_trait]
impl Agent for EchoAgent {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let x = input
            .get("x")
            .and_then(Value::as_i64)
            .ok_or_else(|| anyhow::anyhow!("missing x"))?;
        Ok(output(json!({"value": x + 1})))
    }
}

/// Fails every attempt, counting calls
#[derive(Default)]
pub struct AlwaysFailAgent {
    pub calls: AtomicU32,
}

#[async_trait]
impl Agent for AlwaysFailAgent {
    async fn execute(&self, _input: &AgentInput) -> anyhow::Result<AgentOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("scripted failure")
    }
}

/// Fails the first `failures` calls, then succeeds with `{"calls": n}`
pub struct FailKTimesAgent {
    pub failures: u32,
    pub calls: AtomicU32,
}

impl FailKTimesAgent {
    pub fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Agent for FailKTimesAgent {
    async fn execute(&self, _input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            anyhow::bail!("scripted failure {call}");
        }
        Ok(output(json!({"calls": call})))
    }
}

/// Sleeps for `delay` before returning `{"slept_ms": ..}`
pub struct SlowAgent {
    pub delay: Duration,
}

#[async_trait]
impl Agent for SlowAgent {
    async fn execute(&self, _input: &AgentInput) -> anyhow::Result<AgentOutput> {
        tokio::time::sleep(self.delay).await;
        Ok(output(json!({"slept_ms": self.delay.as_millis() as u64})))
    }
}

/// Records the snapshot it saw under `seen` and emits `{"marker": key}`
pub struct SnapshotAgent {
    pub key: &'static str,
}

#[async_trait]
impl Agent for SnapshotAgent {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let seen: Vec<String> = input
            .context
            .agent_results()
            .map(|results| results.keys().cloned().collect())
            .unwrap_or_default();
        Ok(output(json!({"marker": self.key, "seen": seen})))
    }
}

pub fn output(value: Value) -> AgentOutput {
    value.as_object().cloned().unwrap_or_default()
}

pub fn context(value: Value) -> ExecutionContext {
    ExecutionContext::from_value(value).expect("test context must be an object")
}

pub fn fast_backoff() -> BackoffPolicy {
    BackoffPolicy::new(Duration::from_millis(1), Duration::from_millis(4))
}

/// Runner with a millisecond backoff and no deadline
pub fn runner(key: &str, phase: Phase, agent: Arc<dyn Agent>) -> AgentRunner {
    AgentRunner::new(AgentDescriptor::new(key, phase), agent)
        .with_backoff(fast_backoff())
        .with_timeout(None)
}
