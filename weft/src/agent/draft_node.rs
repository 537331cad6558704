//! Draft node: read the user's instruction, call the model with a document-aware prompt.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::console::{is_exit_command, Console};
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{AgentState, Document};

/// Question shown before every drafter turn.
pub const DRAFTER_PROMPT: &str = "\n What would you like to do with the document?";

/// System prompt for the drafter, embedding the current document.
pub fn drafter_system_prompt(document: &Document) -> String {
    format!(
        "You are Drafter, a helpful writing assistant. You are going to help the user update and modify documents.\n\
         \n\
         - If the user wants to update or modify content, use the 'update' tool with the complete updated content.\n\
         - If the user wants to save and finish, you need to use the 'save' tool.\n\
         - Make sure to always show the current document state after modifications.\n\
         \n\
         The current document content is:{}",
        document.content()
    )
}

/// Agent step of the drafter.
///
/// Reads one line from the console; `exit` or end of input ends the graph without
/// a model call. Otherwise appends the user message and the model reply.
pub struct DraftNode {
    llm: Arc<dyn LlmClient>,
    console: Arc<dyn Console>,
}

impl DraftNode {
    pub fn new(llm: Arc<dyn LlmClient>, console: Arc<dyn Console>) -> Self {
        Self { llm, console }
    }
}

#[async_trait]
impl Node<AgentState> for DraftNode {
    fn id(&self) -> &str {
        "agent"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let input = match self.console.read_line(DRAFTER_PROMPT).await? {
            Some(line) if !is_exit_command(&line) => line,
            _ => {
                info!("drafter input closed, ending session");
                return Ok((state, Next::End));
            }
        };

        let user = Message::user(input);
        let mut request = Vec::with_capacity(state.messages.len() + 2);
        request.push(Message::system(drafter_system_prompt(&state.document)));
        request.extend(state.messages.iter().cloned());
        request.push(user.clone());

        let response = self.llm.invoke(&request).await?;
        self.console.print(&format!("\n AI: {}", response.content));
        if !response.tool_calls.is_empty() {
            let names: Vec<&str> = response.tool_calls.iter().map(|tc| tc.name.as_str()).collect();
            self.console.print(&format!("Using tools: {:?}", names));
        }
        debug!(tool_calls = response.tool_calls.len(), "draft node got model reply");

        let mut state = state;
        state.messages.push(user);
        state.messages.push(response.into_message());
        Ok((state, Next::Continue))
    }
}
