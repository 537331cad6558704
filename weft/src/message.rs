//! Message types for the conversation log.
//!
//! Roles: System (usually first), User, Assistant (optionally requesting tool calls),
//! and Tool (one result per requested call). The conversation is an append-only
//! `Vec<Message>` in [`AgentState`](crate::state::AgentState).

use serde::{Deserialize, Serialize};

/// A single tool invocation requested by the model.
///
/// `arguments` is the raw JSON string from the model; the tool executor parses it.
/// `id` correlates the request with the [`ToolMessage`] that answers it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as registered in the [`ToolRegistry`](crate::tools::ToolRegistry).
    pub name: String,
    /// Arguments as a JSON string.
    pub arguments: String,
    /// Optional provider-assigned id.
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Model reply: text plus the tool calls it requested (empty when none).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantMessage {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Result of one tool call, appended right after the assistant message that requested it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMessage {
    /// Id of the [`ToolCall`] this answers, when the call had one.
    pub call_id: Option<String>,
    /// Name of the tool that produced this result.
    pub name: String,
    /// Text shown to the model.
    pub content: String,
    /// True when the tool failed or was unknown; the text then carries the error.
    #[serde(default)]
    pub is_error: bool,
    /// Set by tools that complete the session (e.g. `save`). Read by the drafter router.
    #[serde(default)]
    pub finishes_session: bool,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model reply, possibly requesting tool calls.
    Assistant(AssistantMessage),
    /// Tool result.
    Tool(ToolMessage),
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message without tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(AssistantMessage {
            content: content.into(),
            tool_calls: vec![],
        })
    }

    /// Creates an assistant message requesting the given tool calls.
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant(AssistantMessage {
            content: content.into(),
            tool_calls,
        })
    }

    /// Text content of the message, whatever the role.
    pub fn content(&self) -> &str {
        match self {
            Message::System(s) | Message::User(s) => s,
            Message::Assistant(a) => &a.content,
            Message::Tool(t) => &t.content,
        }
    }

    /// Tool calls requested by this message; empty for anything but an assistant reply.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Assistant(a) => &a.tool_calls,
            _ => &[],
        }
    }

    /// Human-readable rendering with a role banner, one message per block.
    pub fn pretty(&self) -> String {
        let (title, body) = match self {
            Message::System(s) => ("System", s.clone()),
            Message::User(s) => ("Human", s.clone()),
            Message::Assistant(a) => {
                let mut body = a.content.clone();
                if a.has_tool_calls() {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str("Tool Calls:");
                    for tc in &a.tool_calls {
                        body.push_str(&format!("\n  {}", tc.name));
                        if let Some(id) = &tc.id {
                            body.push_str(&format!(" ({})", id));
                        }
                        body.push_str(&format!("\n  Args: {}", tc.arguments));
                    }
                }
                ("Ai", body)
            }
            Message::Tool(t) => ("Tool", format!("Name: {}\n\n{}", t.name, t.content)),
        };
        format!("{}\n\n{}", banner(title), body)
    }
}

/// `=====  Title Message  =====` padded to 80 columns.
fn banner(title: &str) -> String {
    let title = format!(" {} Message ", title);
    let side = 80usize.saturating_sub(title.len()) / 2;
    let left = "=".repeat(side);
    let right = if title.len() % 2 == 1 {
        format!("{}=", left)
    } else {
        left.clone()
    };
    format!("{}{}{}", left, title, right)
}
