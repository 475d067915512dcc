// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry.
//!
//! The [`Tool`] trait is the typed interface an agent calls into. The
//! [`ToolRegistry`] is an explicit value owned by the caller (there is no
//! global registration) that resolves tools by name and produces the tool
//! definition array advertised to a model.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlgate_core::SqlGateError;

/// Output from a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The content returned by the tool (text or JSON).
    pub content: String,
    /// Whether the tool invocation resulted in an error.
    pub is_error: bool,
}

/// Interface every tool implements.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used for lookup and in tool definitions.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input.
    fn parameters_schema(&self) -> serde_json::Value;

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SqlGateError>;
}

/// Registry of available tools, indexed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool under its `name()`, replacing any previous one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Looks up `name` and invokes it with `input`.
    pub async fn invoke(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, SqlGateError> {
        let tool = self.get(name).ok_or_else(|| SqlGateError::Tool {
            message: format!("unknown tool '{name}'"),
            source: None,
        })?;
        tool.invoke(input).await
    }

    /// Returns (name, description) pairs sorted by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Returns tool definitions for all registered tools, sorted by name.
    ///
    /// Each definition has the shape:
    /// ```json
    /// {
    ///   "name": "tool_name",
    ///   "description": "What the tool does",
    ///   "input_schema": { ... JSON Schema ... }
    /// }
    /// ```
    pub fn tool_definitions(&self) -> Vec<serde_json::Value> {
        self.list()
            .into_iter()
            .filter_map(|(name, _)| self.tools.get(name))
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "input_schema": t.parameters_schema(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the input back"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string" }
                },
                "required": ["message"]
            })
        }

        async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SqlGateError> {
            Ok(ToolOutput {
                content: input["message"].as_str().unwrap_or("no message").to_string(),
                is_error: false,
            })
        }
    }

    struct NoopTool(&'static str);

    #[async_trait]
    impl Tool for NoopTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Does nothing"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }

        async fn invoke(&self, _input: serde_json::Value) -> Result<ToolOutput, SqlGateError> {
            Ok(ToolOutput {
                content: String::new(),
                is_error: false,
            })
        }
    }

    #[test]
    fn empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("echo").is_none());
        assert!(registry.tool_definitions().is_empty());
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(EchoTool));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn definitions_are_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NoopTool("zeta")));
        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(NoopTool("alpha")));

        let names: Vec<String> = registry
            .tool_definitions()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["alpha", "echo", "zeta"]);

        let echo = &registry.tool_definitions()[1];
        assert_eq!(echo["description"], "Echoes the input back");
        assert_eq!(echo["input_schema"]["required"][0], "message");
    }

    #[tokio::test]
    async fn invoke_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let output = registry
            .invoke("echo", serde_json::json!({"message": "hi"}))
            .await
            .unwrap();
        assert_eq!(output.content, "hi");
        assert!(!output.is_error);
    }

    #[tokio::test]
    async fn invoke_unknown_tool_is_tool_error() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke("missing", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, SqlGateError::Tool { .. }));
        assert!(err.to_string().contains("unknown tool 'missing'"));
    }
}
