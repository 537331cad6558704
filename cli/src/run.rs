//! Variant runner: builds the graph for one variant and hands it to its driver loop.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, info_span, Instrument};

use weft::{
    arithmetic_tools, build_chat_graph, build_drafter_graph, build_react_graph, document_tools,
    run_bot, run_chat, run_drafter, run_react, AgentError, CompilationError, Console, LlmClient,
    ToolRegistry, DEFAULT_REACT_INPUT, DEFAULT_TRANSCRIPT_PATH,
};

/// Which agent loop to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Bot,
    Chat,
    Drafter,
    React,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Bot => "bot",
            Variant::Chat => "chat",
            Variant::Drafter => "drafter",
            Variant::React => "react",
        };
        f.write_str(name)
    }
}

/// Per-variant settings. Each variant reads only its own field.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Chat transcript path.
    pub transcript: PathBuf,
    /// Folder the drafter's `save` writes into.
    pub working_folder: PathBuf,
    /// React query.
    pub input: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            transcript: PathBuf::from(DEFAULT_TRANSCRIPT_PATH),
            working_folder: PathBuf::from("."),
            input: DEFAULT_REACT_INPUT.to_string(),
        }
    }
}

/// Errors surfaced by the CLI. Any of them ends the process with a non-zero code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("failed to build graph: {0}")]
    Compile(#[from] CompilationError),
    #[error("no API key: pass --api-key or set OPENAI_API_KEY")]
    MissingApiKey,
}

/// Tools the variant exposes to the model; empty for bot and chat.
pub fn tool_registry(variant: Variant, options: &RunOptions) -> ToolRegistry {
    match variant {
        Variant::Bot | Variant::Chat => ToolRegistry::new(),
        Variant::Drafter => ToolRegistry::from_tools(document_tools(options.working_folder.clone())),
        Variant::React => ToolRegistry::from_tools(arithmetic_tools()),
    }
}

/// Builds the variant's graph and runs its driver loop to completion.
///
/// `llm` must already have the variant's tool specs bound when it needs them.
pub async fn run_variant(
    variant: Variant,
    options: &RunOptions,
    llm: Arc<dyn LlmClient>,
    console: Arc<dyn Console>,
) -> Result<(), RunError> {
    let span = info_span!("session", variant = %variant);
    async move {
        match variant {
            Variant::Bot => {
                let graph = build_chat_graph(llm, console.clone())?;
                let turns = run_bot(&graph, console.as_ref()).await?;
                info!(turns, "bot finished");
            }
            Variant::Chat => {
                let graph = build_chat_graph(llm, console.clone())?;
                let history = run_chat(&graph, console.as_ref(), &options.transcript).await?;
                info!(messages = history.len(), "chat finished");
            }
            Variant::Drafter => {
                let tools = tool_registry(variant, options);
                let graph = build_drafter_graph(llm, console.clone(), tools)?;
                let state = run_drafter(&graph, console.as_ref()).await?;
                info!(document_len = state.document.content().len(), "drafter finished");
            }
            Variant::React => {
                let tools = tool_registry(variant, options);
                let graph = build_react_graph(llm, tools)?;
                let state = run_react(&graph, console.as_ref(), &options.input).await?;
                info!(messages = state.messages.len(), "react finished");
            }
        }
        Ok(())
    }
    .instrument(span)
    .await
}
