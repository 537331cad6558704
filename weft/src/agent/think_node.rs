//! Think node: prepend the system prompt, call the model, append the reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::AgentState;

/// System prompt of the react agent.
pub const REACT_SYSTEM_PROMPT: &str =
    "You are an AI assistant, please answer my query to the best of your ability.";

/// Reasoning step of the react agent.
///
/// The system prompt is sent on every call but never stored in the conversation.
pub struct ThinkNode {
    llm: Arc<dyn LlmClient>,
}

impl ThinkNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<AgentState> for ThinkNode {
    fn id(&self) -> &str {
        "agent"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let mut request = Vec::with_capacity(state.messages.len() + 1);
        request.push(Message::system(REACT_SYSTEM_PROMPT));
        request.extend(state.messages.iter().cloned());

        let response = self.llm.invoke(&request).await?;
        debug!(
            tool_calls = response.tool_calls.len(),
            usage = ?response.usage,
            "think node got model reply"
        );
        let mut state = state;
        state.messages.push(response.into_message());
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    /// **Scenario**: the system prompt is sent first but not stored.
    #[tokio::test]
    async fn think_node_prepends_system_prompt_without_storing_it() {
        let llm = Arc::new(MockLlm::with_no_tool_calls("7"));
        let node = ThinkNode::new(llm.clone());

        let (state, _) = node.run(AgentState::from_user("Add 3+4")).await.unwrap();
        assert_eq!(state.messages.len(), 2);
        assert!(!matches!(state.messages[0], Message::System(_)));

        let requests = llm.requests();
        assert_eq!(requests[0][0], Message::system(REACT_SYSTEM_PROMPT));
        assert_eq!(requests[0][1], Message::user("Add 3+4"));
    }
}
