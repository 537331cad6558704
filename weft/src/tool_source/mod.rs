//! Tool-facing types: specs sent to the model, call results, call context and errors.
//!
//! [`Tool`](crate::tools::Tool) implementations return [`ToolCallContent`]; the
//! [`ActNode`](crate::ActNode) turns each result (or [`ToolSourceError`]) into a
//! [`ToolMessage`](crate::message::ToolMessage).

mod context;

pub use context::ToolCallContext;

use serde_json::Value;
use thiserror::Error;

/// Tool specification: name, description and JSON schema for the arguments.
///
/// **Interaction**: Returned by `ToolRegistry::list()`; bound to
/// [`ChatOpenAI`](crate::ChatOpenAI) so the model can request calls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name (exact-match lookup key).
    pub name: String,
    /// Human-readable description for the model.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result of a single tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallContent {
    /// Result text.
    pub text: String,
    /// True when this call completes the session (structured completion signal).
    pub finishes_session: bool,
}

impl ToolCallContent {
    /// Plain result; the session continues.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finishes_session: false,
        }
    }

    /// Result that marks the session as complete.
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finishes_session: true,
        }
    }
}

/// Errors from looking up or calling a tool.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("tool execution failed: {0}")]
    Execution(String),
}
