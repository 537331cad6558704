//! Agent execution error types.
//!
//! Returned by graph nodes, the compiled graph run loop and the driver loops.
//! Tool failures have their own type ([`ToolSourceError`](crate::tool_source::ToolSourceError))
//! and are normally folded into tool messages instead of surfacing here.

use thiserror::Error;

/// Agent execution error.
///
/// A model failure maps to `ExecutionFailed` and halts the run; there is no retry.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. model call failed, console closed unexpectedly).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The graph ran more steps than its recursion limit allows.
    #[error("recursion limit of {0} steps reached without hitting END")]
    RecursionLimit(usize),

    /// Console or file I/O failed outside of a tool call.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
