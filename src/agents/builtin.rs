//! # Built-in Stand-in Agents
//!
//! Deterministic agents for the catalog. Most entries are a [`TemplateAgent`]
//! that reports what it saw; a few produce the fields the final blog
//! projection reads.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::agent::{Agent, AgentDescriptor, AgentInput, AgentOutput};
use crate::constants::context_keys;
use crate::orchestration::Phase;

const OUTLINE_AGENT: &str = "OutlineStructuringAgent";

/// Descriptor and logic for a catalog key
pub fn builtin_agent(key: &str, phase: Phase) -> (AgentDescriptor, Arc<dyn Agent>) {
    let descriptor = AgentDescriptor::new(key, phase);
    let description = format!("{} for the {} phase", descriptor.name, phase);
    let descriptor = descriptor.with_description(description);

    match key {
        "FinalTopicSelectionAgent" => (descriptor, Arc::new(TitleSelection)),
        "OutlineStructuringAgent" => (descriptor, Arc::new(OutlineBuilder)),
        "SectionBodyWriterAgent" => (
            descriptor.with_dependencies([OUTLINE_AGENT]),
            Arc::new(SectionBodyWriter),
        ),
        "KeywordExtractionAgent" => (descriptor, Arc::new(KeywordExtraction)),
        "ImageGenerationAgent" => (descriptor, Arc::new(ImagePlanner)),
        "StatInjectorAgent" => (descriptor, Arc::new(StatisticsCollector)),
        "QuoteCurationAgent" => (descriptor, Arc::new(QuoteCurator)),
        _ => {
            let agent = TemplateAgent::new(&descriptor);
            (descriptor, Arc::new(agent))
        }
    }
}

fn topic_of(input: &AgentInput) -> String {
    input.topic().unwrap_or("Untitled").to_string()
}

fn context_str<'a>(input: &'a AgentInput, key: &str, fallback: &'a str) -> &'a str {
    input.get(key).and_then(Value::as_str).unwrap_or(fallback)
}

fn object(value: Value) -> AgentOutput {
    match value {
        Value::Object(map) => map,
        _ => AgentOutput::new(),
    }
}

/// Summarises the context it was handed
#[derive(Debug, Clone)]
pub struct TemplateAgent {
    name: String,
    phase: Phase,
}

impl TemplateAgent {
    pub fn new(descriptor: &AgentDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            phase: descriptor.phase,
        }
    }
}

#[async_trait]
impl Agent for TemplateAgent {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);
        let upstream = input
            .context
            .agent_results()
            .map(|results| results.len())
            .unwrap_or(0);

        Ok(object(json!({
            "agent": self.name,
            "phase": self.phase,
            "topic": topic,
            "summary": format!("{} reviewed '{}' during {}", self.name, topic, self.phase),
            "upstream_results": upstream,
            "tone": context_str(input, context_keys::TONE, "professional"),
        })))
    }
}

struct TitleSelection;

#[async_trait]
impl Agent for TitleSelection {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);
        let candidates = vec![
            format!("{topic}: Everything You Need to Know"),
            format!("A Practical Introduction to {topic}"),
            format!("{topic} Explained"),
        ];

        Ok(object(json!({
            "selected_title": candidates[0],
            "candidates": candidates,
        })))
    }
}

struct OutlineBuilder;

#[async_trait]
impl Agent for OutlineBuilder {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);

        Ok(object(json!({
            "outline": [
                format!("What is {topic}?"),
                format!("Why {topic} matters"),
                format!("Getting started with {topic}"),
                "Key takeaways",
            ],
        })))
    }
}

struct SectionBodyWriter;

#[async_trait]
impl Agent for SectionBodyWriter {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);
        let audience = context_str(input, context_keys::TARGET_AUDIENCE, "general");

        let headings: Vec<String> = input
            .context
            .agent_output(OUTLINE_AGENT, "/outline")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if headings.is_empty() {
            anyhow::bail!("outline for '{topic}' has no sections");
        }

        let sections: Vec<Value> = headings
            .iter()
            .map(|heading| {
                json!({
                    "heading": heading,
                    "body": format!("{heading}, written for a {audience} audience."),
                })
            })
            .collect();

        let main_content = headings
            .iter()
            .map(|heading| format!("## {heading}\n\n{heading}, written for a {audience} audience."))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(object(json!({
            "content": {
                "main_content": main_content,
                "sections": sections,
            },
        })))
    }
}

struct KeywordExtraction;

#[async_trait]
impl Agent for KeywordExtraction {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);
        let primary = topic.to_lowercase();
        let secondary = vec![
            format!("{primary} guide"),
            format!("{primary} best practices"),
            format!("learn {primary}"),
        ];

        Ok(object(json!({
            "seo_data": {
                "primary_keyword": primary,
                "secondary_keywords": secondary,
                "meta_description": format!("A clear, practical guide to {topic}: what it is, why it matters, and how to get started."),
                "seo_score": 90,
            },
        })))
    }
}

struct ImagePlanner;

#[async_trait]
impl Agent for ImagePlanner {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);

        Ok(object(json!({
            "enrichments": {
                "images": {
                    "hero": {
                        "prompt": format!("Editorial illustration about {topic}"),
                        "alt": format!("Illustration for {topic}"),
                    },
                },
            },
        })))
    }
}

struct StatisticsCollector;

#[async_trait]
impl Agent for StatisticsCollector {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);

        Ok(object(json!({
            "enrichments": {
                "statistics": [
                    {"label": format!("Readers searching for {topic} each month"), "value": null, "source": null},
                ],
            },
        })))
    }
}

struct QuoteCurator;

#[async_trait]
impl Agent for QuoteCurator {
    async fn execute(&self, input: &AgentInput) -> anyhow::Result<AgentOutput> {
        let topic = topic_of(input);

        Ok(object(json!({
            "enrichments": {
                "quotes": [
                    {"text": format!("Start small with {topic} and iterate."), "attribution": "Editorial team"},
                ],
            },
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ExecutionContext;
    use tokio_util::sync::CancellationToken;

    fn input(value: Value) -> AgentInput {
        AgentInput {
            context: ExecutionContext::from_value(value).unwrap(),
            config: serde_json::Map::new(),
            attempt: 1,
            cancellation: CancellationToken::new(),
        }
    }

    #[tokio::test]
    async fn test_template_agent_is_deterministic() {
        let (descriptor, agent) = builtin_agent("TopicGenerationAgent", Phase::IdeationAndPlanning);
        assert_eq!(descriptor.name, "Topic Generation Agent");

        let input = input(json!({"topic": "Rust"}));
        let first = agent.execute(&input).await.unwrap();
        let second = agent.execute(&input).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first["topic"], "Rust");
        assert_eq!(first["phase"], "Ideation & Planning");
    }

    #[tokio::test]
    async fn test_section_writer_needs_outline() {
        let (descriptor, agent) =
            builtin_agent("SectionBodyWriterAgent", Phase::DraftingAndContentGeneration);
        assert_eq!(descriptor.dependencies, vec![OUTLINE_AGENT]);

        let without_outline = input(json!({"topic": "Rust"}));
        assert!(agent.execute(&without_outline).await.is_err());

        let with_outline = input(json!({
            "topic": "Rust",
            "agent_results": {
                "OutlineStructuringAgent": {"status": "success", "result": {"outline": ["Intro", "Outro"]}}
            }
        }));
        let output = agent.execute(&with_outline).await.unwrap();
        let main_content = output["content"]["main_content"].as_str().unwrap();
        assert!(main_content.starts_with("## Intro"));
        assert!(main_content.contains("## Outro"));
    }

    #[tokio::test]
    async fn test_keyword_extraction_fills_seo_data() {
        let (_, agent) = builtin_agent("KeywordExtractionAgent", Phase::SeoAndKeywordPreparation);
        let output = agent.execute(&input(json!({"topic": "Async Rust"}))).await.unwrap();

        assert_eq!(output["seo_data"]["primary_keyword"], "async rust");
        assert_eq!(output["seo_data"]["secondary_keywords"].as_array().unwrap().len(), 3);
        assert_eq!(output["seo_data"]["seo_score"], 90);
    }
}
