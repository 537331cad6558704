//! Chat node: send the conversation to the model, append and print the reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::console::Console;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::state::AgentState;

/// One model turn over the whole conversation; prints `AI: <reply>`.
///
/// Used by the bot and chat variants (`START → chat → END`).
pub struct ChatNode {
    llm: Arc<dyn LlmClient>,
    console: Arc<dyn Console>,
}

impl ChatNode {
    pub fn new(llm: Arc<dyn LlmClient>, console: Arc<dyn Console>) -> Self {
        Self { llm, console }
    }
}

#[async_trait]
impl Node<AgentState> for ChatNode {
    fn id(&self) -> &str {
        "chat"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        debug!(message_count = state.messages.len(), "chat node invoking model");
        let response = self.llm.invoke(&state.messages).await?;
        self.console.print(&format!("\nAI: {}", response.content));
        let mut state = state;
        state.messages.push(response.into_message());
        Ok((state, Next::Continue))
    }
}
