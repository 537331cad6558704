//! # Weft
//!
//! Small tool-calling agent loops on a state-in, state-out graph runtime. One state type,
//! [`AgentState`], flows through every node: the conversation plus the drafter's
//! [`Document`].
//!
//! ## Variants
//!
//! - **bot**: one model call per console line, no history ([`run_bot`]).
//! - **chat**: history across turns, transcript written on exit ([`run_chat`]).
//! - **drafter**: the model edits a document with `update` and finishes with `save`
//!   ([`run_drafter`]).
//! - **react**: the model answers arithmetic questions with `add_numbers`,
//!   `subtract_numbers` and `multiply_numbers` ([`run_react`]).
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`].
//! - [`agent`]: [`ChatNode`], [`DraftNode`], [`ThinkNode`], [`ActNode`], the routers
//!   [`tools_condition`] and [`document_saved_condition`], and graph builders.
//! - [`driver`]: console loops around a compiled graph.
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`].
//! - [`tools`]: [`Tool`] trait, [`ToolRegistry`] and the built-in tools.
//! - [`message`], [`state`], [`stream`], [`console`], [`tool_source`], [`error`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weft::{arithmetic_tools, build_react_graph, run_react, AgentState, LlmResponse, MockLlm};
//! use weft::{StdConsole, ToolCall, ToolRegistry};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockLlm::scripted(vec![
//!     LlmResponse::with_tool_calls("", vec![ToolCall::new("add_numbers", r#"{"a":40,"b":12}"#)]),
//!     LlmResponse::text("40 + 12 = 52"),
//! ]));
//! let graph = build_react_graph(llm, ToolRegistry::from_tools(arithmetic_tools()))?;
//! let state: AgentState = run_react(&graph, &StdConsole::new(), "Add 40 + 12").await?;
//! assert_eq!(state.last_assistant_reply(), Some("40 + 12 = 52"));
//! # Ok(())
//! # }
//! ```
//!
//! Run the offline example: `cargo run -p weft-examples --example react_mock`

pub mod agent;
pub mod console;
pub mod driver;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod state;
pub mod stream;
pub mod tool_source;
pub mod tools;

pub use agent::{
    build_chat_graph, build_drafter_graph, build_react_graph, document_saved_condition,
    drafter_system_prompt, tools_condition, ActNode, ChatNode, DocumentCondition, DraftNode,
    ThinkNode, ToolsConditionResult, DRAFTER_PROMPT, REACT_SYSTEM_PROMPT,
};
pub use console::{is_exit_command, Console, ScriptedConsole, StdConsole, EXIT_COMMAND};
pub use driver::{
    render_transcript, run_bot, run_chat, run_drafter, run_react, write_transcript,
    DEFAULT_REACT_INPUT, DEFAULT_TRANSCRIPT_PATH, DRAFTER_BANNER, DRAFTER_COMPLETED_BANNER,
    MESSAGE_PROMPT,
};
pub use error::AgentError;
pub use graph::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    CompilationError, CompiledStateGraph, Next, Node, StateGraph, DEFAULT_RECURSION_LIMIT, END,
    START,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, ToolChoiceMode};
pub use message::{AssistantMessage, Message, ToolCall, ToolMessage};
pub use state::{AgentState, Document};
pub use stream::{StreamEvent, StreamMode};
pub use tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
pub use tools::{
    arithmetic_tools, document_tools, with_document_extension, ArithmeticTool, SaveTool, Tool,
    ToolRegistry, UpdateTool, DOCUMENT_EXTENSION, TOOL_ADD_NUMBERS, TOOL_MULTIPLY_NUMBERS,
    TOOL_SAVE, TOOL_SUBTRACT_NUMBERS, TOOL_UPDATE,
};

/// When running `cargo test -p weft`, initializes tracing from `RUST_LOG` so that
/// unit tests in `src/**` can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
