//! Act node: run every tool call of the last assistant message, append one tool message each.
//!
//! The session document is moved into the [`ToolCallContext`] for the step and moved
//! back into state once every call finished.
//!
//! # Error Handling
//!
//! Tool failures never short-circuit the graph. An unknown tool, unparsable arguments
//! or a tool error each become a tool message with `is_error` set, so the model sees
//! the problem and can correct itself on the next turn.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::{Message, ToolCall, ToolMessage};
use crate::state::AgentState;
use crate::tool_source::{ToolCallContext, ToolSourceError};
use crate::tools::ToolRegistry;

/// Truncates a string for logging, appending "..." if longer than max_len.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

/// Parses `ToolCall.arguments` to a JSON value. Empty input is an empty object;
/// a JSON string holding an object is unwrapped once.
fn parse_tool_arguments(arguments: &str) -> Result<Value, ToolSourceError> {
    if arguments.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    let raw: Value = serde_json::from_str(arguments).map_err(|e| {
        warn!(error = %e, arguments = %arguments, "tool arguments JSON parse failed");
        ToolSourceError::InvalidInput(e.to_string())
    })?;
    match raw.as_str() {
        Some(inner) => serde_json::from_str(inner).map_err(|e| {
            warn!(error = %e, "nested tool arguments JSON parse failed");
            ToolSourceError::InvalidInput(e.to_string())
        }),
        None => Ok(raw),
    }
}

/// Text returned to the model when it asks for a tool that does not exist.
fn unknown_tool_message(name: &str, available: &[&str]) -> String {
    format!(
        "Error: {} is not a valid tool, try one of [{}].",
        name,
        available.join(", ")
    )
}

/// Tool executor: one step that answers every tool call of the last assistant message.
pub struct ActNode {
    tools: ToolRegistry,
}

impl ActNode {
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    async fn call_one(&self, tc: &ToolCall, ctx: &mut ToolCallContext) -> ToolMessage {
        let mut message = ToolMessage {
            call_id: tc.id.clone(),
            name: tc.name.clone(),
            ..Default::default()
        };

        let result = match parse_tool_arguments(&tc.arguments) {
            Ok(args) => {
                debug!(tool = %tc.name, args = ?args, "Calling tool");
                self.tools.call(&tc.name, args, ctx).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(content) => {
                trace!(
                    tool = %tc.name,
                    result_len = content.text.len(),
                    result_preview = %truncate_for_log(&content.text, 200),
                    "Tool returned"
                );
                message.content = content.text;
                message.finishes_session = content.finishes_session;
            }
            Err(ToolSourceError::NotFound(name)) => {
                warn!(tool = %name, "model requested unknown tool");
                message.content = unknown_tool_message(&name, &self.tools.names());
                message.is_error = true;
            }
            Err(e) => {
                warn!(tool = %tc.name, error = %e, "Tool call failed");
                message.content = format!("Error: {}", e);
                message.is_error = true;
            }
        }
        message
    }
}

#[async_trait]
impl Node<AgentState> for ActNode {
    fn id(&self) -> &str {
        "tools"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let AgentState {
            mut messages,
            document,
        } = state;
        let tool_calls: Vec<ToolCall> = match messages.last() {
            Some(Message::Assistant(a)) => a.tool_calls.clone(),
            _ => Vec::new(),
        };

        let mut ctx = ToolCallContext::new(document);
        for tc in &tool_calls {
            let result = self.call_one(tc, &mut ctx).await;
            messages.push(Message::Tool(result));
        }

        let state = AgentState {
            messages,
            document: ctx.document,
        };
        Ok((state, Next::Continue))
    }
}
