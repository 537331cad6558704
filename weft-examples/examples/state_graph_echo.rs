//! Example: a one-node StateGraph over `AgentState`.
//!
//! The node echoes the last user message back as the assistant. Shows the bare
//! graph runtime without a model or tools.
//!
//! Run: `cargo run -p weft-examples --example state_graph_echo -- "hello"`

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use weft::{AgentError, AgentState, Message, Next, Node, StateGraph, END, START};

struct EchoNode;

#[async_trait]
impl Node<AgentState> for EchoNode {
    fn id(&self) -> &str {
        "echo"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let mut state = state;
        let last = state.messages.iter().rev().find_map(|m| match m {
            Message::User(s) => Some(s.clone()),
            _ => None,
        });
        if let Some(content) = last {
            state.messages.push(Message::assistant(content));
        }
        Ok((state, Next::Continue))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = env::args().nth(1).unwrap_or_else(|| "hello, world".to_string());

    let mut graph = StateGraph::<AgentState>::new();
    graph
        .add_node("echo", Arc::new(EchoNode))
        .add_edge(START, "echo")
        .add_edge("echo", END);
    let compiled = graph.compile()?;

    let state = compiled.invoke(AgentState::from_user(input)).await?;
    if let Some(reply) = state.last_assistant_reply() {
        println!("{}", reply);
    }
    Ok(())
}
