use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Result, ToolError};

/// A full document fetched from a knowledge base, paired with the canonical
/// URL it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    /// Canonical source URL
    pub source: String,
}

impl Document {
    pub fn new(page_content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            source: source.into(),
        }
    }
}

/// What a tool hands back to the calling agent.
///
/// Plain messages and fetched documents are distinct variants so the caller
/// can tell "found a document" apart from "got a message" (including the
/// in-band `Error occurred: ...` reports) without string sniffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutput {
    Text { text: String },
    Document(Document),
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        ToolOutput::Text { text: text.into() }
    }

    pub fn document(document: Document) -> Self {
        ToolOutput::Document(document)
    }

    /// The display string for this output: the message itself, or the page
    /// content of a fetched document.
    pub fn content(&self) -> &str {
        match self {
            ToolOutput::Text { text } => text,
            ToolOutput::Document(doc) => &doc.page_content,
        }
    }

    /// True when this output is the in-band service-failure report.
    pub fn is_error_report(&self) -> bool {
        matches!(self, ToolOutput::Text { text } if text.starts_with("Error occurred:"))
    }
}

/// A tool that can be invoked by the agent.
///
/// Every tool exposes static metadata (name, description, argument schema)
/// for discovery, plus a blocking `run`. Arguments must satisfy the declared
/// schema before the tool touches its backing service; `Err` from `run` means
/// the arguments were rejected, while failures of the service itself come
/// back as normal text output.
#[async_trait]
pub trait Tool: Send + Sync + std::fmt::Debug {
    /// The name of the tool (used in function calls)
    fn name(&self) -> &'static str;

    /// A description of what the tool does
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's arguments
    fn parameters_schema(&self) -> serde_json::Value;

    /// Invoke the tool with the given argument mapping, blocking until the
    /// backing service call completes.
    fn run(&self, arguments: serde_json::Value) -> Result<ToolOutput>;

    /// Async entry point. Declared for every tool but not wired up yet:
    /// it fails immediately, regardless of arguments. Callers must not
    /// assume asynchronous execution is available.
    async fn run_async(&self, arguments: serde_json::Value) -> Result<ToolOutput> {
        let _ = arguments;
        Err(ToolError::NotImplemented(self.name()))
    }
}

/// Registry for available tools
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all registered tools
    pub fn list(&self) -> Vec<&dyn Tool> {
        self.tools.values().map(|tool| tool.as_ref()).collect()
    }

    /// Invoke a tool by name
    pub fn invoke(&self, name: &str, arguments: serde_json::Value) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        tool.run(arguments)
    }

    /// Generate tool definitions for a function-calling orchestration layer
    pub fn definitions(&self) -> Vec<serde_json::Value> {
        self.tools
            .values()
            .map(|tool| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema()
                    }
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct EchoTool;

    impl Tool for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo the given message back"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {"message": {"type": "string"}},
                "required": ["message"]
            })
        }

        fn run(&self, arguments: serde_json::Value) -> Result<ToolOutput> {
            let message = arguments["message"].as_str().unwrap_or_default();
            Ok(ToolOutput::text(message))
        }
    }

    #[test]
    fn the_default_async_entry_point_fails_immediately() {
        let result = tokio_test::block_on(EchoTool.run_async(serde_json::json!({"message": "hi"})));
        assert!(matches!(result, Err(ToolError::NotImplemented("echo"))));
    }

    #[test]
    fn registry_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let output = registry
            .invoke("echo", serde_json::json!({"message": "hi"}))
            .unwrap();
        assert_eq!(output.content(), "hi");

        assert!(matches!(
            registry.invoke("missing", serde_json::json!({})),
            Err(ToolError::ToolNotFound(_))
        ));
    }

    #[test]
    fn document_output_content_is_the_page_text() {
        let output = ToolOutput::document(Document::new("body", "https://example.org/page"));
        assert_eq!(output.content(), "body");
        assert!(!output.is_error_report());
    }
}
