use thiserror::Error;

/// Main error type for the tool layer
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Async execution is not implemented for tool `{0}`")]
    NotImplemented(&'static str),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    /// Check if this error is recoverable by re-supplying input.
    ///
    /// Validation failures can be fixed by the caller re-prompting for
    /// arguments; the rest are static conditions.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ToolError::Validation(_) | ToolError::ToolNotFound(_))
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ToolError::Config(_) => "CONFIG_ERROR",
            ToolError::Serialization(_) => "SERIALIZATION_ERROR",
            ToolError::Validation(_) => "VALIDATION_ERROR",
            ToolError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            ToolError::NotImplemented(_) => "NOT_IMPLEMENTED",
            ToolError::Logging(_) => "LOGGING_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "recoverable": self.is_recoverable()
            }
        })
    }
}

/// A failure while driving a backing service: the cause plus whatever raw
/// payload was fetched, kept verbatim so the calling agent can inspect it.
#[derive(Debug, Clone)]
pub struct ServiceFailure {
    pub cause: String,
    pub payload: String,
}

impl ServiceFailure {
    pub fn new(cause: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
            payload: payload.into(),
        }
    }

    /// Render the in-band error text handed back to the calling agent.
    ///
    /// Service failures are reported as normal tool output rather than
    /// raised, so the agent can reason about them and re-prompt.
    pub fn into_report(self) -> String {
        format!(
            "Error occurred: {}. The response fetched: {}",
            self.cause, self.payload
        )
    }
}
