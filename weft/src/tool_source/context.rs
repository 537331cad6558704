//! Context passed into tool calls for the current step.
//!
//! The [`ActNode`](crate::ActNode) moves the session's [`Document`] into the context
//! before the first call of a step and moves it back into state afterwards, so tools
//! read and write it through `&mut ToolCallContext` without any shared global.

use crate::state::Document;

/// Per-step context available to tools during execution.
#[derive(Debug, Clone, Default)]
pub struct ToolCallContext {
    /// The session's document; tools may replace it.
    pub document: Document,
}

impl ToolCallContext {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}
