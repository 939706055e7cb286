//! # Execution Context
//!
//! Immutable snapshot of the shared blog-creation state handed to every agent
//! in a phase. Cloning is a reference-count bump, so each runner in a phase can
//! hold the same pre-phase view without copying it.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::context_keys;
use crate::error::{BlogSuiteError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    values: Arc<Map<String, Value>>,
}

impl ExecutionContext {
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    /// Build a context from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(BlogSuiteError::Validation(format!(
                "execution context must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(Arc::unwrap_or_clone(self.values))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn topic(&self) -> Option<&str> {
        self.get(context_keys::TOPIC).and_then(Value::as_str)
    }

    /// Successful envelopes of every earlier phase, keyed by agent key
    pub fn agent_results(&self) -> Option<&Map<String, Value>> {
        self.get(context_keys::AGENT_RESULTS)
            .and_then(Value::as_object)
    }

    pub fn has_agent_result(&self, agent_key: &str) -> bool {
        self.agent_results()
            .is_some_and(|results| results.contains_key(agent_key))
    }

    /// Look up a value inside an upstream agent's result payload
    pub fn agent_output(&self, agent_key: &str, pointer: &str) -> Option<&Value> {
        self.agent_results()?
            .get(agent_key)?
            .get("result")?
            .pointer(pointer)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for ExecutionContext {
    fn from(values: Map<String, Value>) -> Self {
        Self::new(values)
    }
}

impl Serialize for ExecutionContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExecutionContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::new)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(ExecutionContext::from_value(json!({"topic": "Rust"})).is_ok());

        let error = ExecutionContext::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(error.to_string().contains("an array"));
    }

    #[test]
    fn test_agent_result_lookup() {
        let context = ExecutionContext::from_value(json!({
            "topic": "Async Rust",
            "agent_results": {
                "FinalTopicSelectionAgent": {
                    "status": "success",
                    "result": {"selected_title": "Async Rust in Practice"}
                }
            }
        }))
        .unwrap();

        assert_eq!(context.topic(), Some("Async Rust"));
        assert!(context.has_agent_result("FinalTopicSelectionAgent"));
        assert!(!context.has_agent_result("ResearchAgent"));
        assert_eq!(
            context.agent_output("FinalTopicSelectionAgent", "/selected_title"),
            Some(&json!("Async Rust in Practice"))
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let context = ExecutionContext::from_value(json!({"x": 5})).unwrap();
        let clone = context.clone();

        assert!(Arc::ptr_eq(&context.values, &clone.values));
        assert_eq!(clone.into_value(), json!({"x": 5}));
    }
}
