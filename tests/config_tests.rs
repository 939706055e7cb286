//! Configuration file loading and its effect on orchestration.

mod common;

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;

use blogsuite_core::config::{ConfigManager, ConfigurationError, SuiteConfig};
use blogsuite_core::orchestration::{Phase, PhaseOrchestrator};

use common::context;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_from_path_reads_every_section() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "suite.toml",
        r#"
[agent]
max_retries = 1
backoff_unit_ms = 10
max_backoff_ms = 40
timeout_seconds = 5

[orchestration]
max_concurrent_agents = 4
phases = ["Ideation & Planning", "promotion"]

[logging]
level = "warn"
json = true

[defaults]
tone = "friendly"
"#,
    );

    let manager = ConfigManager::load_from_path(&path).unwrap();
    let config = manager.config();

    assert_eq!(config.agent.max_retries, 1);
    assert_eq!(config.agent.timeout_seconds, Some(5));
    assert_eq!(config.orchestration.max_concurrent_agents, 4);
    assert_eq!(
        config.pipeline_phases().unwrap(),
        vec![Phase::IdeationAndPlanning, Phase::Promotion]
    );
    assert!(config.logging.json);
    assert_eq!(config.defaults.tone, "friendly");
    assert_eq!(config.defaults.target_audience, "general");
    assert_eq!(manager.config_directory(), dir.path());
}

#[test]
fn test_missing_file_is_reported() {
    let error = ConfigManager::load_from_path(Path::new("/nonexistent/blogsuite.toml")).unwrap_err();
    assert!(matches!(error, ConfigurationError::FileNotFound { .. }));
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();

    let unknown_phase = write_config(
        &dir,
        "unknown.toml",
        "[orchestration]\nphases = [\"Publishing Preparation\"]\n",
    );
    let error = ConfigManager::load_from_path(&unknown_phase).unwrap_err();
    assert!(error.to_string().contains("Publishing Preparation"), "{error}");

    let no_concurrency = write_config(
        &dir,
        "zero.toml",
        "[orchestration]\nmax_concurrent_agents = 0\n",
    );
    assert!(ConfigManager::load_from_path(&no_concurrency).is_err());
}

#[test]
fn test_zero_timeout_loads_as_disabled_deadline() {
    let dir = TempDir::new().unwrap();
    let omitted = write_config(&dir, "omitted.toml", "[agent]\nmax_retries = 1\n");
    let disabled = write_config(&dir, "disabled.toml", "[agent]\ntimeout_seconds = 0\n");

    let manager = ConfigManager::load_from_path(&omitted).unwrap();
    assert_eq!(manager.config().agent.timeout(), Some(Duration::from_secs(120)));

    let manager = ConfigManager::load_from_path(&disabled).unwrap();
    assert_eq!(manager.config().agent.timeout_seconds, Some(0));
    assert_eq!(manager.config().agent.timeout(), None);
}

#[test]
fn test_directory_loading_layers_environment_file() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "blogsuite.toml", "[agent]\nmax_retries = 5\nbackoff_unit_ms = 10\n");
    write_config(&dir, "blogsuite.staging.toml", "[agent]\nmax_retries = 2\n");

    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "staging")
            .unwrap();

    assert_eq!(manager.environment(), "staging");
    assert_eq!(manager.config().agent.max_retries, 2);
    assert_eq!(manager.config().agent.backoff_unit_ms, 10);
}

#[tokio::test]
async fn test_configured_phases_drive_full_blog() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "short.toml",
        r#"
[orchestration]
phases = ["Ideation & Planning", "Research & Structuring", "Drafting & Content Generation"]

[defaults]
target_audience = "beginner"
"#,
    );

    let manager = ConfigManager::load_from_path(&path).unwrap();
    let orchestrator = PhaseOrchestrator::from_config(manager.config()).unwrap();
    assert_eq!(orchestrator.phases().len(), 3);

    let result = orchestrator
        .create_full_blog(context(json!({"topic": "Tokio"})))
        .await;

    assert_eq!(result.phases_completed, 3);
    assert_eq!(result.final_blog.title, "Tokio: Everything You Need to Know");
    assert!(result.final_blog.content.contains("written for a beginner audience"));
    assert!(result.final_blog.keywords.is_empty());
    assert_eq!(result.final_blog.seo_score, 85.0);
}

#[test]
fn test_in_memory_config_is_validated() {
    let mut config = SuiteConfig::default();
    config.orchestration.phases.clear();

    assert!(ConfigManager::from_config(config.clone()).is_err());
    assert!(PhaseOrchestrator::from_config(&config).is_err());
}
