//! Routers: pure functions from the conversation tail to a routing key.

use crate::graph::END;
use crate::message::Message;
use crate::state::AgentState;

/// Output of [`tools_condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsConditionResult {
    /// Route to the tools execution node.
    Tools,
    /// Route to the end node.
    End,
}

impl ToolsConditionResult {
    /// Returns the node ID string for this routing result.
    ///
    /// - `Tools` -> `"tools"`
    /// - `End` -> `"__end__"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::End => END,
        }
    }
}

/// Routes to the tools node when the last message is an assistant message that
/// requests tool calls; otherwise ends.
///
/// Only the last message is examined.
pub fn tools_condition(state: &AgentState) -> ToolsConditionResult {
    match state.messages.last() {
        Some(Message::Assistant(a)) if a.has_tool_calls() => ToolsConditionResult::Tools,
        _ => ToolsConditionResult::End,
    }
}

/// Output of [`document_saved_condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentCondition {
    /// Ask the user for the next instruction.
    Continue,
    /// The document was saved; the session is over.
    End,
}

impl DocumentCondition {
    /// Routing key: `"continue"` or `"end"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::End => "end",
        }
    }
}

/// Ends the drafter once any tool message carries the `finishes_session` flag
/// (set by a successful `save`). Empty conversations continue.
pub fn document_saved_condition(state: &AgentState) -> DocumentCondition {
    let saved = state.messages.iter().rev().any(|m| match m {
        Message::Tool(t) => t.finishes_session,
        _ => false,
    });
    if saved {
        DocumentCondition::End
    } else {
        DocumentCondition::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ToolCall, ToolMessage};

    fn tool(content: &str, finishes_session: bool) -> Message {
        Message::Tool(ToolMessage {
            name: "save".into(),
            content: content.into(),
            finishes_session,
            ..Default::default()
        })
    }

    /// **Scenario**: tools_condition returns End when the last message has no tool calls.
    #[test]
    fn tools_condition_returns_end_when_no_tool_calls() {
        let mut state = AgentState::from_user("hello");
        assert_eq!(tools_condition(&state), ToolsConditionResult::End);
        state.messages.push(Message::assistant("hi"));
        let result = tools_condition(&state);
        assert_eq!(result, ToolsConditionResult::End);
        assert_eq!(result.as_str(), "__end__");
    }

    /// **Scenario**: tools_condition returns Tools when the last assistant message requests tools.
    #[test]
    fn tools_condition_returns_tools_when_tool_calls_present() {
        let mut state = AgentState::from_user("Add 40 + 12");
        state.messages.push(Message::assistant_with_tools(
            "",
            vec![ToolCall::new("add_numbers", r#"{"a":40,"b":12}"#)],
        ));
        let result = tools_condition(&state);
        assert_eq!(result, ToolsConditionResult::Tools);
        assert_eq!(result.as_str(), "tools");
    }

    /// **Scenario**: only the last message counts; an answered request further back does not route.
    #[test]
    fn tools_condition_looks_at_last_message_only() {
        let mut state = AgentState::from_user("x");
        state.messages.push(Message::assistant_with_tools(
            "",
            vec![ToolCall::new("add_numbers", "{}")],
        ));
        state.messages.push(tool("52", false));
        assert_eq!(tools_condition(&state), ToolsConditionResult::End);
    }

    #[test]
    fn empty_conversation_continues() {
        assert_eq!(
            document_saved_condition(&AgentState::default()),
            DocumentCondition::Continue
        );
    }

    /// **Scenario**: text mentioning "saved" and "document" is not enough without the flag.
    #[test]
    fn saved_text_without_flag_continues() {
        let mut state = AgentState::default();
        state
            .messages
            .push(tool("The document was not saved yet", false));
        assert_eq!(document_saved_condition(&state), DocumentCondition::Continue);
    }

    #[test]
    fn finished_tool_message_ends() {
        let mut state = AgentState::default();
        state.messages.push(tool("Document saved to out.txt", true));
        state.messages.push(Message::assistant("done"));
        let result = document_saved_condition(&state);
        assert_eq!(result, DocumentCondition::End);
        assert_eq!(result.as_str(), "end");
    }

    /// **Scenario**: a router is a pure function; repeated calls agree.
    #[test]
    fn routers_are_pure() {
        let mut state = AgentState::default();
        state.messages.push(tool("Error saving document: denied", false));
        let before = state.messages.clone();
        assert_eq!(
            document_saved_condition(&state),
            document_saved_condition(&state)
        );
        assert_eq!(tools_condition(&state), tools_condition(&state));
        assert_eq!(state.messages, before);
    }
}
