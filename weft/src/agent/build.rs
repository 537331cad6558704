//! Graph builders for the four variants.
//!
//! | Variant   | Graph                                  |
//! |-----------|----------------------------------------|
//! | bot, chat | `START → chat → END`                   |
//! | drafter   | `START → agent → tools → {agent, END}` |
//! | react     | `START → agent → {tools → agent, END}` |

use std::collections::HashMap;
use std::sync::Arc;

use crate::console::Console;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::state::AgentState;
use crate::tools::ToolRegistry;

use super::condition::{
    document_saved_condition, tools_condition, DocumentCondition, ToolsConditionResult,
};
use super::{ActNode, ChatNode, DraftNode, ThinkNode};

/// `START → chat → END`, shared by the bot and chat variants.
pub fn build_chat_graph(
    llm: Arc<dyn LlmClient>,
    console: Arc<dyn Console>,
) -> Result<CompiledStateGraph<AgentState>, CompilationError> {
    let mut graph = StateGraph::<AgentState>::new();
    graph
        .add_node("chat", Arc::new(ChatNode::new(llm, console)))
        .add_edge(START, "chat")
        .add_edge("chat", END);
    graph.compile()
}

/// Drafter: the agent always hands over to the tools node, whose router either loops
/// back for the next instruction or ends after a save.
///
/// Every user turn is a step, so the session runs without a recursion limit and ends
/// only on a save, `exit` or EOF.
pub fn build_drafter_graph(
    llm: Arc<dyn LlmClient>,
    console: Arc<dyn Console>,
    tools: ToolRegistry,
) -> Result<CompiledStateGraph<AgentState>, CompilationError> {
    let path_map: HashMap<String, String> = [
        (DocumentCondition::Continue.as_str().into(), "agent".into()),
        (DocumentCondition::End.as_str().into(), END.into()),
    ]
    .into_iter()
    .collect();

    let mut graph = StateGraph::<AgentState>::new().with_recursion_limit(usize::MAX);
    graph
        .add_node("agent", Arc::new(DraftNode::new(llm, console)))
        .add_node("tools", Arc::new(ActNode::new(tools)))
        .add_edge(START, "agent")
        .add_edge("agent", "tools")
        .add_conditional_edges(
            "tools",
            Arc::new(|state: &AgentState| document_saved_condition(state).as_str().to_string()),
            Some(path_map),
        );
    graph.compile()
}

/// React: think, run the requested tools, think again until the model stops asking.
pub fn build_react_graph(
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
) -> Result<CompiledStateGraph<AgentState>, CompilationError> {
    let path_map: HashMap<String, String> = [
        (ToolsConditionResult::Tools.as_str().into(), "tools".into()),
        (END.into(), END.into()),
    ]
    .into_iter()
    .collect();

    let mut graph = StateGraph::<AgentState>::new();
    graph
        .add_node("agent", Arc::new(ThinkNode::new(llm)))
        .add_node("tools", Arc::new(ActNode::new(tools)))
        .add_edge(START, "agent")
        .add_conditional_edges(
            "agent",
            Arc::new(|state: &AgentState| tools_condition(state).as_str().to_string()),
            Some(path_map),
        )
        .add_edge("tools", "agent");
    graph.compile()
}
