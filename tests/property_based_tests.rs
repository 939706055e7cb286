mod common;

use std::sync::Arc;

use proptest::prelude::*;

use blogsuite_core::agent::{AgentDescriptor, AgentStatus, ExecutionContext};
use blogsuite_core::agents::naming::display_name;
use blogsuite_core::orchestration::Phase;

use common::strategies::*;
use common::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: an agent failing k times succeeds on attempt k + 1 exactly when k <= max_retries
    #[test]
    fn attempts_follow_the_retry_budget(failures in 0u32..=6, max_retries in max_retries_strategy()) {
        let agent = Arc::new(FailKTimesAgent::new(failures));
        let runner = runner("FlakyAgent", Phase::EditingAndValidation, agent.clone())
            .with_max_retries(max_retries);

        let envelope = tokio_test::block_on(runner.run(&ExecutionContext::default()));
        let stats = runner.get_stats();

        if failures <= max_retries {
            prop_assert!(envelope.is_success());
            prop_assert_eq!(envelope.attempts(), failures + 1);
            prop_assert_eq!(stats.success_count, 1);
            prop_assert_eq!(stats.retry_count, 0);
        } else {
            prop_assert!(!envelope.is_success());
            prop_assert_eq!(envelope.attempts(), max_retries + 1);
            prop_assert_eq!(stats.failure_count, 1);
            prop_assert_eq!(stats.retry_count, max_retries + 1);
            prop_assert_eq!(stats.status, AgentStatus::Error);
        }
        prop_assert_eq!(agent.calls(), envelope.attempts());
    }

    /// Property: counters and success rate track every finished run
    #[test]
    fn success_rate_matches_run_history(outcomes in run_outcomes_strategy()) {
        let flag = Arc::new(std::sync::atomic::AtomicBool::new(true));
        let agent = {
            let flag = flag.clone();
            blogsuite_core::agent::FnAgent::new(move |_: &blogsuite_core::agent::AgentInput| {
                if flag.load(std::sync::atomic::Ordering::SeqCst) {
                    Ok(output(serde_json::json!({})))
                } else {
                    anyhow::bail!("scripted failure")
                }
            })
        };
        let runner = runner("ScriptedAgent", Phase::Promotion, Arc::new(agent)).with_max_retries(0);

        for &succeed in &outcomes {
            flag.store(succeed, std::sync::atomic::Ordering::SeqCst);
            tokio_test::block_on(runner.run(&ExecutionContext::default()));
        }

        let stats = runner.get_stats();
        let successes = outcomes.iter().filter(|succeeded| **succeeded).count() as u64;
        let failures = outcomes.len() as u64 - successes;

        prop_assert_eq!(stats.success_count, successes);
        prop_assert_eq!(stats.failure_count, failures);
        prop_assert!((0.0..=100.0).contains(&stats.success_rate));

        if outcomes.is_empty() {
            prop_assert_eq!(stats.success_rate, 0.0);
            prop_assert_eq!(stats.status, AgentStatus::Idle);
        } else {
            let expected = (successes as f64 / outcomes.len() as f64 * 100.0 * 100.0).round() / 100.0;
            prop_assert_eq!(stats.success_rate, expected);
        }
    }

    /// Property: a runner without dependencies accepts any context
    #[test]
    fn no_dependencies_always_validate(keys in prop::collection::vec(agent_key_strategy(), 0..5)) {
        let results: serde_json::Map<String, serde_json::Value> = keys
            .into_iter()
            .map(|key| (key, serde_json::json!({"status": "success"})))
            .collect();
        let ctx = context(serde_json::json!({"agent_results": results}));
        let runner = runner("FreeAgent", Phase::Promotion, Arc::new(EchoAgent));

        prop_assert!(runner.validate_dependencies(&ctx));
        prop_assert!(runner.validate_dependencies(&ExecutionContext::default()));
    }

    /// Property: display names keep every word of the key and end with "Agent"
    #[test]
    fn display_names_split_camel_case(key in agent_key_strategy()) {
        let name = display_name(&key);

        prop_assert!(name.ends_with("Agent"));
        prop_assert_eq!(name.replace(' ', ""), key.clone());
        prop_assert_eq!(AgentDescriptor::new(key, Phase::Promotion).name, name);
    }

    /// Property: every phase parses back from its display name and key
    #[test]
    fn phase_names_round_trip(index in 0usize..19) {
        let phase = Phase::ALL[index];

        prop_assert_eq!(phase.display_name().parse::<Phase>().unwrap(), phase);
        prop_assert_eq!(phase.display_name().to_uppercase().parse::<Phase>().unwrap(), phase);
        prop_assert_eq!(phase.key().parse::<Phase>().unwrap(), phase);
    }
}
