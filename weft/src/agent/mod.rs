//! Agent nodes, routers and graph builders.
//!
//! - **[`ChatNode`]**: one model turn over the conversation (bot, chat).
//! - **[`DraftNode`]**: reads the user's instruction and calls the model with the
//!   document in the system prompt (drafter).
//! - **[`ThinkNode`]**: model turn with a fixed system prompt (react).
//! - **[`ActNode`]**: runs the requested tools through a [`ToolRegistry`](crate::tools::ToolRegistry).
//! - **[`tools_condition`]** / **[`document_saved_condition`]**: routers for the
//!   react and drafter graphs.
//!
//! # Routing
//!
//! ```rust,ignore
//! graph.add_conditional_edges(
//!     "agent",
//!     Arc::new(|state: &AgentState| tools_condition(state).as_str().to_string()),
//!     Some(path_map),
//! );
//! ```

mod act_node;
mod build;
mod chat_node;
mod condition;
mod draft_node;
mod think_node;

pub use act_node::ActNode;
pub use build::{build_chat_graph, build_drafter_graph, build_react_graph};
pub use chat_node::ChatNode;
pub use condition::{
    document_saved_condition, tools_condition, DocumentCondition, ToolsConditionResult,
};
pub use draft_node::{drafter_system_prompt, DraftNode, DRAFTER_PROMPT};
pub use think_node::{ThinkNode, REACT_SYSTEM_PROMPT};
