//! Tool registry and `tools/call` dispatcher

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use jsonschema::Validator;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::protocol::{McpTool, Tool};
use crate::types::{McpError, McpResult, ToolOutcome};

struct RegisteredTool {
    definition: McpTool,
    validator: Validator,
    tool: Box<dyn Tool>,
}

/// Static catalog of tools, keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, compiling its input schema
    pub fn register_tool(&mut self, tool: Box<dyn Tool>) -> McpResult<&mut Self> {
        let definition = tool.definition();
        let validator = jsonschema::validator_for(&definition.input_schema).map_err(|e| {
            McpError::Config(format!(
                "invalid input schema for tool '{}': {}",
                definition.name, e
            ))
        })?;
        self.tools.insert(
            definition.name.clone(),
            RegisteredTool {
                definition,
                validator,
                tool,
            },
        );
        Ok(self)
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Descriptors for `tools/list`, sorted by name
    pub fn list_tools(&self) -> Vec<McpTool> {
        let mut tools: Vec<McpTool> = self.tools.values().map(|t| t.definition.clone()).collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.list_tools().into_iter().map(|t| t.name).collect()
    }

    /// Validate, fill defaults, and run the named tool
    ///
    /// Every failure comes back as `ToolOutcome::Failure`; nothing propagates.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolOutcome {
        let started = Instant::now();
        let result = self.try_call(name, arguments).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => debug!(tool = name, elapsed_ms, "Tool call succeeded"),
            Err(e) if e.is_tool_failure() => {
                warn!(tool = name, elapsed_ms, error = %e, "Tool call failed")
            }
            Err(e) => error!(tool = name, elapsed_ms, error = %e, "Tool handler error"),
        }
        result.into()
    }

    async fn try_call(&self, name: &str, arguments: Option<Value>) -> McpResult<Value> {
        let registered = self
            .tools
            .get(name)
            .ok_or_else(|| McpError::UnknownTool(name.to_string()))?;

        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(args) => args,
        };

        validate_arguments(&registered.validator, name, &arguments)?;
        let arguments = apply_defaults(&registered.definition.input_schema, arguments);

        registered.tool.execute(arguments).await
    }
}

fn validate_arguments(validator: &Validator, tool: &str, arguments: &Value) -> McpResult<()> {
    if validator.is_valid(arguments) {
        return Ok(());
    }

    let message = validator
        .iter_errors(arguments)
        .take(5)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");

    if message.is_empty() {
        Err(McpError::validation(tool, "arguments do not match the input schema"))
    } else {
        Err(McpError::validation(tool, message))
    }
}

/// Fill missing top-level properties from their schema `default`
pub fn apply_defaults(schema: &Value, arguments: Value) -> Value {
    let Value::Object(mut args) = arguments else {
        return arguments;
    };

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (key, property) in properties {
            if let Some(default) = property.get("default") {
                args.entry(key.clone()).or_insert_with(|| default.clone());
            }
        }
    }
    Value::Object(args)
}

/// Shared handle used by every protocol core
pub type SharedRegistry = Arc<ToolRegistry>;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoLimitTool;

    #[async_trait]
    impl Tool for EchoLimitTool {
        fn definition(&self) -> McpTool {
            McpTool::new(
                "echo_limit".to_string(),
                "Echo the arguments".to_string(),
                json!({
                    "type": "object",
                    "properties": {
                        "q": { "type": "string" },
                        "limit": { "type": "integer", "minimum": 1, "maximum": 50, "default": 20 }
                    },
                    "required": ["q"]
                }),
            )
        }

        async fn execute(&self, params: Value) -> McpResult<Value> {
            Ok(params)
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn definition(&self) -> McpTool {
            McpTool::new(
                "failing".to_string(),
                "Always fails".to_string(),
                json!({ "type": "object", "properties": {} }),
            )
        }

        async fn execute(&self, _params: Value) -> McpResult<Value> {
            Err(McpError::Upstream {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    struct MisconfiguredTool;

    #[async_trait]
    impl Tool for MisconfiguredTool {
        fn definition(&self) -> McpTool {
            McpTool::new(
                "misconfigured".to_string(),
                "Fails outside the tool's own domain".to_string(),
                json!({ "type": "object", "properties": {} }),
            )
        }

        async fn execute(&self, _params: Value) -> McpResult<Value> {
            Err(McpError::Config("bad base url".to_string()))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Box::new(EchoLimitTool)).unwrap();
        registry.register_tool(Box::new(FailingTool)).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_success_fills_defaults() {
        let outcome = registry()
            .call_tool("echo_limit", Some(json!({"q": "삼성"})))
            .await;
        assert_eq!(outcome, ToolOutcome::Success(json!({"q": "삼성", "limit": 20})));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_named() {
        let outcome = registry().call_tool("echo_limit", Some(json!({}))).await;
        match outcome {
            ToolOutcome::Failure(message) => {
                assert!(message.contains("echo_limit"), "{}", message);
                assert!(message.contains("\"q\""), "{}", message);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_value_fails() {
        let outcome = registry()
            .call_tool("echo_limit", Some(json!({"q": "x", "limit": 500})))
            .await;
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_failure_outcome() {
        let outcome = registry().call_tool("get_weather", None).await;
        assert_eq!(outcome, ToolOutcome::Failure("Unknown tool: get_weather".to_string()));
    }

    #[tokio::test]
    async fn test_handler_error_is_a_failure_outcome() {
        let outcome = registry().call_tool("failing", None).await;
        assert_eq!(
            outcome,
            ToolOutcome::Failure("API request failed: 503 - unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_tool_error_still_becomes_failure_outcome() {
        let mut registry = registry();
        registry.register_tool(Box::new(MisconfiguredTool)).unwrap();

        let outcome = registry.call_tool("misconfigured", None).await;
        assert_eq!(
            outcome,
            ToolOutcome::Failure("Configuration error: bad base url".to_string())
        );
    }

    #[test]
    fn test_list_tools_sorted() {
        let names = registry().tool_names();
        assert_eq!(names, vec!["echo_limit".to_string(), "failing".to_string()]);
    }

    #[test]
    fn test_apply_defaults_keeps_explicit_values() {
        let schema = json!({"properties": {"days": {"type": "integer", "default": 7}}});
        assert_eq!(apply_defaults(&schema, json!({"days": 3})), json!({"days": 3}));
        assert_eq!(apply_defaults(&schema, json!({})), json!({"days": 7}));
    }
}
