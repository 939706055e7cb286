//! # Final Blog Projection
//!
//! Compiles the user-facing blog from phase outcomes through a fixed contract
//! table: each field names the phase that produces it and a JSON pointer into
//! the result payload of that phase's agents. The first successful agent (in
//! agent key order) whose payload holds the pointer supplies the value;
//! absent fields fall back to defaults so a partial run still yields a blog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::outcome::PhaseOutcome;
use super::phase::Phase;
use crate::agent::stats::round_to;
use crate::agent::AgentOutput;
use crate::constants::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSource {
    pub field: &'static str,
    pub phase: Phase,
    pub pointer: &'static str,
}

/// Where every projected field comes from
pub const CONTRACT: [FieldSource; 8] = [
    FieldSource {
        field: "title",
        phase: Phase::IdeationAndPlanning,
        pointer: "/selected_title",
    },
    FieldSource {
        field: "content",
        phase: Phase::DraftingAndContentGeneration,
        pointer: "/content/main_content",
    },
    FieldSource {
        field: "meta_description",
        phase: Phase::SeoAndKeywordPreparation,
        pointer: "/seo_data/meta_description",
    },
    FieldSource {
        field: "keywords",
        phase: Phase::SeoAndKeywordPreparation,
        pointer: "/seo_data/secondary_keywords",
    },
    FieldSource {
        field: "seo_score",
        phase: Phase::SeoAndKeywordPreparation,
        pointer: "/seo_data/seo_score",
    },
    FieldSource {
        field: "images",
        phase: Phase::ContentEnrichment,
        pointer: "/enrichments/images",
    },
    FieldSource {
        field: "statistics",
        phase: Phase::ContentEnrichment,
        pointer: "/enrichments/statistics",
    },
    FieldSource {
        field: "quotes",
        phase: Phase::ContentEnrichment,
        pointer: "/enrichments/quotes",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalBlog {
    pub title: String,
    pub content: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub images: Map<String, Value>,
    pub statistics: Vec<Value>,
    pub quotes: Vec<Value>,
    pub seo_score: f64,
    /// Percentage of successful agent runs across completed phases
    pub quality_score: f64,
}

impl FinalBlog {
    pub fn compile(topic: &str, phase_results: &BTreeMap<Phase, PhaseOutcome>) -> Self {
        let text = |field: &str| {
            lookup(phase_results, field)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let list = |field: &str| {
            lookup(phase_results, field)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            title: text("title").unwrap_or_else(|| format!("{topic}: Complete Guide")),
            content: text("content").unwrap_or_default(),
            meta_description: text("meta_description").unwrap_or_default(),
            keywords: list("keywords")
                .into_iter()
                .filter_map(|keyword| keyword.as_str().map(str::to_string))
                .collect(),
            images: lookup(phase_results, "images")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            statistics: list("statistics"),
            quotes: list("quotes"),
            seo_score: lookup(phase_results, "seo_score")
                .and_then(Value::as_f64)
                .unwrap_or(defaults::SEO_SCORE),
            quality_score: quality_score(phase_results),
        }
    }
}

/// Value of `field` from the first successful agent of its contract phase
fn lookup<'a>(phase_results: &'a BTreeMap<Phase, PhaseOutcome>, field: &str) -> Option<&'a Value> {
    let source = CONTRACT.iter().find(|source| source.field == field)?;
    phase_results
        .get(&source.phase)?
        .successful_results()
        .find_map(|result| pointer_in(result, source.pointer))
}

/// Share of successful envelopes across completed phases, 0 when none ran
fn quality_score(phase_results: &BTreeMap<Phase, PhaseOutcome>) -> f64 {
    let (succeeded, total) = phase_results
        .values()
        .filter(|outcome| outcome.is_completed())
        .filter_map(PhaseOutcome::agent_results)
        .flat_map(|results| results.values())
        .fold((0usize, 0usize), |(succeeded, total), envelope| {
            (succeeded + usize::from(envelope.is_success()), total + 1)
        });

    if total == 0 {
        return 0.0;
    }
    round_to(succeeded as f64 / total as f64 * 100.0, 2)
}

/// Resolve a JSON pointer against a result payload
fn pointer_in<'a>(result: &'a AgentOutput, pointer: &str) -> Option<&'a Value> {
    let path = pointer.strip_prefix('/')?;
    let (head, tail) = match path.split_once('/') {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    };

    let value = result.get(head)?;
    match tail {
        Some(tail) => value.pointer(&format!("/{tail}")),
        None => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ErrorEnvelope, ResultEnvelope, SuccessEnvelope};
    use chrono::Utc;
    use serde_json::json;

    fn envelope(key: &str, phase: Phase, result: Option<Value>) -> (String, ResultEnvelope) {
        let envelope = match result {
            Some(result) => ResultEnvelope::Success(SuccessEnvelope {
                agent: key.to_string(),
                agent_key: key.to_string(),
                phase,
                execution_time: 0.0,
                attempt: 1,
                result: result.as_object().cloned().unwrap_or_default(),
                timestamp: Utc::now(),
            }),
            None => ResultEnvelope::Error(ErrorEnvelope {
                agent: key.to_string(),
                agent_key: key.to_string(),
                phase,
                execution_time: 0.0,
                attempts: 1,
                error: "failed".to_string(),
                error_type: "ExecutionError".to_string(),
                result: None,
                timestamp: Utc::now(),
            }),
        };
        (key.to_string(), envelope)
    }

    fn completed(phase: Phase, results: Vec<(String, ResultEnvelope)>) -> PhaseOutcome {
        PhaseOutcome::Completed {
            phase,
            agent_results: results.into_iter().collect(),
            failed_agents: vec![],
            execution_time: 0.0,
        }
    }

    #[test]
    fn test_empty_run_uses_fallbacks() {
        let blog = FinalBlog::compile("Rust", &BTreeMap::new());

        assert_eq!(blog.title, "Rust: Complete Guide");
        assert_eq!(blog.content, "");
        assert!(blog.keywords.is_empty());
        assert!(blog.images.is_empty());
        assert_eq!(blog.seo_score, 85.0);
        assert_eq!(blog.quality_score, 0.0);
    }

    #[test]
    fn test_fields_are_read_from_their_contract_phase() {
        let mut results = BTreeMap::new();
        results.insert(
            Phase::IdeationAndPlanning,
            completed(
                Phase::IdeationAndPlanning,
                vec![envelope(
                    "FinalTopicSelectionAgent",
                    Phase::IdeationAndPlanning,
                    Some(json!({"selected_title": "Rust at Scale"})),
                )],
            ),
        );
        results.insert(
            Phase::SeoAndKeywordPreparation,
            completed(
                Phase::SeoAndKeywordPreparation,
                vec![
                    envelope("KeywordClusteringAgent", Phase::SeoAndKeywordPreparation, None),
                    envelope(
                        "KeywordExtractionAgent",
                        Phase::SeoAndKeywordPreparation,
                        Some(json!({"seo_data": {"secondary_keywords": ["a", "b"], "seo_score": 91}})),
                    ),
                ],
            ),
        );

        let blog = FinalBlog::compile("Rust", &results);

        assert_eq!(blog.title, "Rust at Scale");
        assert_eq!(blog.keywords, vec!["a", "b"]);
        assert_eq!(blog.seo_score, 91.0);
        assert_eq!(blog.meta_description, "");
        assert_eq!(blog.quality_score, 66.67);
    }

    #[test]
    fn test_title_in_wrong_phase_is_ignored() {
        let mut results = BTreeMap::new();
        results.insert(
            Phase::Promotion,
            completed(
                Phase::Promotion,
                vec![envelope(
                    "SocialMediaGeneratorAgent",
                    Phase::Promotion,
                    Some(json!({"selected_title": "Wrong"})),
                )],
            ),
        );

        assert_eq!(FinalBlog::compile("Rust", &results).title, "Rust: Complete Guide");
    }

    #[test]
    fn test_pointer_resolution() {
        let result = json!({"a": {"b": [1, 2]}}).as_object().cloned().unwrap();
        assert_eq!(pointer_in(&result, "/a/b/1"), Some(&json!(2)));
        assert_eq!(pointer_in(&result, "/a"), Some(&json!({"b": [1, 2]})));
        assert_eq!(pointer_in(&result, "/missing"), None);
        assert_eq!(pointer_in(&result, "a"), None);
    }
}
