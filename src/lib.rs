//! agent-tools-rs: typed tool adapters for LLM agent frameworks
//!
//! This library provides a uniform tool invocation contract plus ready-made
//! adapters (weather lookup, Wikipedia search), so a host agent can discover,
//! validate arguments for, and invoke every tool the same way. Service
//! failures come back as in-band text the agent can reason about, never as
//! panics or raw client errors.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agent_tools_rs::{tools::WikipediaTool, ToolRegistry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = ToolRegistry::new();
//!     registry.register(WikipediaTool::default());
//!
//!     let output = registry.invoke("wikipedia", serde_json::json!({"query": "Mars"}))?;
//!     println!("{}", output.content());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod schemas;
pub mod text;
pub mod tools;
pub mod types;

pub use error::{Result, ServiceFailure, ToolError};
pub use logging::{enable_log, log_config, log_enabled, LogConfig, LogLevel, LogMode};
pub use schemas::{parse_arguments, validate_arguments};
pub use text::regularize_block;
pub use tools::{
    CurrentWeatherTool, Document, Tool, ToolOutput, ToolRegistry, WeatherForecastTool,
    WikipediaTool,
};
pub use types::{AgentOutput, PluginResponse, TokenUsage};

#[cfg(feature = "cli")]
pub mod cli;
