//! React run: one canned query, every new message pretty printed.

use futures::StreamExt;

use crate::console::Console;
use crate::error::AgentError;
use crate::graph::CompiledStateGraph;
use crate::state::AgentState;
use crate::stream::StreamMode;

/// Query used when none is given.
pub const DEFAULT_REACT_INPUT: &str = "Add 40 + 12. Add 3+4";

/// Streams the react graph for `input` and prints each message once, as it is appended.
pub async fn run_react(
    graph: &CompiledStateGraph<AgentState>,
    console: &dyn Console,
    input: &str,
) -> Result<AgentState, AgentError> {
    let mut printed = 0;
    let mut last = AgentState::from_user(input);
    let mut events = graph.stream(last.clone(), StreamMode::Values);
    while let Some(event) = events.next().await {
        let state = event?.into_state();
        for message in state.messages.iter().skip(printed) {
            console.print(&message.pretty());
        }
        printed = state.messages.len();
        last = state;
    }
    Ok(last)
}
