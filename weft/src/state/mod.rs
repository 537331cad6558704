//! State types for the agent graphs.
//!
//! One state type flows through every node of every variant: the conversation log
//! plus the drafter's working document. The chat and react variants simply leave
//! the document empty.
//!
//! # Example
//!
//! ```rust
//! use weft::{AgentState, Message};
//!
//! let mut state = AgentState::default();
//! state.messages.push(Message::user("Add 40 + 12"));
//! assert_eq!(state.messages.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::message::{AssistantMessage, Message};

/// The document edited by the drafter. Last write wins; no history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document(String);

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn content(&self) -> &str {
        &self.0
    }

    /// Replaces the whole content.
    pub fn replace(&mut self, content: impl Into<String>) {
        self.0 = content.into();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Graph state: append-only conversation plus the session's document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentState {
    /// Conversation in insertion order.
    pub messages: Vec<Message>,
    /// Drafter document, owned by this session.
    #[serde(default)]
    pub document: Document,
}

impl AgentState {
    /// State seeded with one user message.
    pub fn from_user(input: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(input)],
            document: Document::default(),
        }
    }

    /// The most recent assistant reply, if any.
    pub fn last_assistant(&self) -> Option<&AssistantMessage> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(a) => Some(a),
            _ => None,
        })
    }

    /// Text of the most recent assistant reply.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.last_assistant().map(|a| a.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ToolCall;

    #[test]
    fn document_replace_is_last_write_wins() {
        let mut doc = Document::default();
        assert!(doc.is_empty());
        doc.replace("one");
        doc.replace("two");
        assert_eq!(doc.content(), "two");
    }

    #[test]
    fn last_assistant_skips_tool_messages() {
        let mut state = AgentState::from_user("hi");
        state.messages.push(Message::assistant_with_tools(
            "calling",
            vec![ToolCall::new("add_numbers", "{}")],
        ));
        state.messages.push(Message::Tool(Default::default()));
        assert_eq!(state.last_assistant_reply(), Some("calling"));
    }

    #[test]
    fn last_assistant_none_when_empty() {
        assert!(AgentState::default().last_assistant().is_none());
    }
}
