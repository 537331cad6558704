//! Bot and chat loops: one graph run per console line.

use std::path::Path;

use tracing::{debug, info};

use crate::console::{is_exit_command, Console};
use crate::error::AgentError;
use crate::graph::CompiledStateGraph;
use crate::message::Message;
use crate::state::AgentState;

/// Prompt shown before each bot / chat turn.
pub const MESSAGE_PROMPT: &str = "Enter your message: ";

/// Where the chat transcript goes unless configured otherwise.
pub const DEFAULT_TRANSCRIPT_PATH: &str = "conversation.txt";

async fn next_input(console: &dyn Console) -> Result<Option<String>, AgentError> {
    match console.read_line(MESSAGE_PROMPT).await? {
        Some(line) if !is_exit_command(&line) => Ok(Some(line)),
        _ => Ok(None),
    }
}

/// Stateless loop: every turn sends only the new user line. Returns the number of turns.
pub async fn run_bot(
    graph: &CompiledStateGraph<AgentState>,
    console: &dyn Console,
) -> Result<usize, AgentError> {
    let mut turns = 0;
    while let Some(input) = next_input(console).await? {
        graph.invoke(AgentState::from_user(input)).await?;
        turns += 1;
        debug!(turns, "bot turn complete");
    }
    Ok(turns)
}

/// Multi-turn loop with history; writes the transcript to `transcript` on exit.
///
/// Only user lines and assistant replies are kept in the history. Returns it.
pub async fn run_chat(
    graph: &CompiledStateGraph<AgentState>,
    console: &dyn Console,
    transcript: &Path,
) -> Result<Vec<Message>, AgentError> {
    let mut history: Vec<Message> = Vec::new();
    while let Some(input) = next_input(console).await? {
        history.push(Message::user(input));
        let state = AgentState {
            messages: history.clone(),
            ..AgentState::default()
        };
        let result = graph.invoke(state).await?;
        if let Some(reply) = result.messages.last().filter(|m| matches!(m, Message::Assistant(_))) {
            history.push(reply.clone());
        }
    }
    write_transcript(transcript, &history)?;
    info!(path = %transcript.display(), messages = history.len(), "transcript written");
    Ok(history)
}

/// `User: <text>` / `AI: <text>` per message, each followed by a blank line.
pub fn render_transcript(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        match message {
            Message::User(text) => out.push_str(&format!("User: {}\n", text)),
            Message::Assistant(a) => out.push_str(&format!("AI: {}\n", a.content)),
            Message::System(_) | Message::Tool(_) => {}
        }
        out.push('\n');
    }
    out
}

/// Overwrites `path` with the rendered transcript.
pub fn write_transcript(path: &Path, messages: &[Message]) -> std::io::Result<()> {
    std::fs::write(path, render_transcript(messages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_transcript_formats_roles() {
        let text = render_transcript(&[Message::user("hi"), Message::assistant("Hello!")]);
        assert_eq!(text, "User: hi\n\nAI: Hello!\n\n");
    }

    #[test]
    fn render_transcript_empty() {
        assert_eq!(render_transcript(&[]), "");
    }
}
