pub mod output;

pub use output::{AgentOutput, PluginResponse, TokenUsage};
