//! Example: the react loop against a scripted model, no network needed.
//!
//! The mock asks for `add_numbers` twice, then answers. Every message is pretty
//! printed as it is appended.
//!
//! Run: `cargo run -p weft-examples --example react_mock -- "Add 40 + 12. Add 3+4"`

use std::env;
use std::sync::Arc;

use weft::{
    arithmetic_tools, build_react_graph, run_react, LlmResponse, MockLlm, StdConsole, ToolCall,
    ToolRegistry, DEFAULT_REACT_INPUT,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_REACT_INPUT.to_string());

    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::with_tool_calls(
            "",
            vec![
                ToolCall::new("add_numbers", r#"{"a":40,"b":12}"#).with_id("call-1"),
                ToolCall::new("add_numbers", r#"{"a":3,"b":4}"#).with_id("call-2"),
            ],
        ),
        LlmResponse::text("40 + 12 = 52 and 3 + 4 = 7."),
    ]));
    let graph = build_react_graph(llm, ToolRegistry::from_tools(arithmetic_tools()))?;

    let state = run_react(&graph, &StdConsole::new(), &input).await?;
    println!("\n{} messages", state.messages.len());
    Ok(())
}
