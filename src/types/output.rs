use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token usage information from the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Final output of an agent run, as handed to presentation layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    /// The answer text
    pub output: String,
    /// Accumulated cost of the run, if tracked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Token usage, if the API reported it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenUsage>,
}

impl AgentOutput {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            cost: None,
            tokens: None,
        }
    }
}

/// What a plugin hands back: either a full agent output or a bare value.
///
/// The two cases are explicit variants so display extraction is exhaustive
/// rather than a runtime type test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginResponse {
    Agent(AgentOutput),
    Value(Value),
}

impl PluginResponse {
    /// The display string for this response: the agent's answer text, or a
    /// plain rendering of the bare value (strings render unquoted).
    pub fn content(&self) -> String {
        match self {
            PluginResponse::Agent(output) => output.output.clone(),
            PluginResponse::Value(Value::String(text)) => text.clone(),
            PluginResponse::Value(value) => value.to_string(),
        }
    }
}

impl From<AgentOutput> for PluginResponse {
    fn from(output: AgentOutput) -> Self {
        PluginResponse::Agent(output)
    }
}

impl From<Value> for PluginResponse {
    fn from(value: Value) -> Self {
        PluginResponse::Value(value)
    }
}
