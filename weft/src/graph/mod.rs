//! State graph: nodes, edges and conditional edges; compile, then invoke or stream.
//!
//! Build a [`StateGraph`] with `add_node` / `add_edge` / `add_conditional_edges`,
//! `compile()` it into a [`CompiledStateGraph`], then run it with `invoke(state)`.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod next;
mod node;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
pub use next::Next;
pub use node::Node;
pub use state_graph::{StateGraph, END, START};
