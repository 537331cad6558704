//! Drafter loop: stream the drafter graph and show tool results as they arrive.

use futures::StreamExt;

use crate::console::Console;
use crate::error::AgentError;
use crate::graph::CompiledStateGraph;
use crate::message::Message;
use crate::state::AgentState;
use crate::stream::StreamMode;

pub const DRAFTER_BANNER: &str = "\n ==========DRAFTER ================ \n";
pub const DRAFTER_COMPLETED_BANNER: &str = "\n ==========DRAFTER COMPLETED ================ \n";

/// Runs one drafter session from an empty state and returns the final state.
///
/// After every step, tool messages among the last three messages are printed as
/// `Tool result: <text>`.
pub async fn run_drafter(
    graph: &CompiledStateGraph<AgentState>,
    console: &dyn Console,
) -> Result<AgentState, AgentError> {
    console.print(DRAFTER_BANNER);
    let mut last = AgentState::default();
    let mut events = graph.stream(AgentState::default(), StreamMode::Values);
    while let Some(event) = events.next().await {
        let state = event?.into_state();
        print_tool_results(console, &state.messages);
        last = state;
    }
    console.print(DRAFTER_COMPLETED_BANNER);
    Ok(last)
}

fn print_tool_results(console: &dyn Console, messages: &[Message]) {
    let tail = &messages[messages.len().saturating_sub(3)..];
    for message in tail {
        if let Message::Tool(t) = message {
            console.print(&format!("Tool result: {}", t.content));
        }
    }
}
