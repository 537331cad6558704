//! Drafter end to end: scripted console and model, real files in a temp folder.

mod init_logging;

use std::sync::Arc;

use weft::{
    build_drafter_graph, document_tools, run_drafter, LlmResponse, Message, MockLlm,
    ScriptedConsole, ToolCall, ToolRegistry, DEFAULT_RECURSION_LIMIT, DRAFTER_COMPLETED_BANNER,
};

/// **Scenario**: update("draft v1") then save("out") persists exactly "draft v1" to out.txt
/// and ends the session.
#[tokio::test]
async fn update_then_save_writes_file_and_completes() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::with_tool_calls(
            "Here is your draft.",
            vec![ToolCall::new("update", r#"{"content":"draft v1"}"#).with_id("u1")],
        ),
        LlmResponse::with_tool_calls(
            "Saving.",
            vec![ToolCall::new("save", r#"{"filename":"out"}"#).with_id("s1")],
        ),
    ]));
    let console = Arc::new(ScriptedConsole::new(["write draft v1", "save it as out"]));
    let graph = build_drafter_graph(
        llm.clone(),
        console.clone(),
        ToolRegistry::from_tools(document_tools(dir.path())),
    )
    .unwrap();

    let state = run_drafter(&graph, console.as_ref()).await.unwrap();

    let saved = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(saved, "draft v1");
    assert_eq!(state.document.content(), "draft v1");
    assert_eq!(llm.calls(), 2);
    assert_eq!(console.remaining(), 0);

    let second_request = &llm.requests()[1];
    assert!(second_request[0].content().ends_with("content is:draft v1"));

    let out = console.output();
    assert!(out.contains("Tool result: Document content updated; The current content is: \ndraft v1"));
    assert!(out.contains("Tool result: Document saved to out.txt"));
    assert!(out.contains(r#"Using tools: ["save"]"#));
    assert!(out.ends_with(&format!("{}\n", DRAFTER_COMPLETED_BANNER)));
}

/// **Scenario**: `exit` ends the drafter before any model call.
#[tokio::test]
async fn exit_ends_before_model_call() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlm::with_no_tool_calls("unused"));
    let console = Arc::new(ScriptedConsole::new(["Exit"]));
    let graph = build_drafter_graph(
        llm.clone(),
        console.clone(),
        ToolRegistry::from_tools(document_tools(dir.path())),
    )
    .unwrap();

    let state = run_drafter(&graph, console.as_ref()).await.unwrap();
    assert_eq!(llm.calls(), 0);
    assert!(state.messages.is_empty());
    assert!(console.output().contains("DRAFTER COMPLETED"));
}

/// **Scenario**: a failed save does not end the session; the user keeps going.
#[tokio::test]
async fn failed_save_keeps_session_open() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::with_tool_calls(
            "",
            vec![ToolCall::new("save", r#"{"filename":"../escape"}"#)],
        ),
        LlmResponse::text("That name is not allowed."),
    ]));
    let console = Arc::new(ScriptedConsole::new(["save as ../escape", "never mind"]));
    let graph = build_drafter_graph(
        llm.clone(),
        console.clone(),
        ToolRegistry::from_tools(document_tools(dir.path())),
    )
    .unwrap();

    let state = run_drafter(&graph, console.as_ref()).await.unwrap();
    assert_eq!(llm.calls(), 2);
    let failed = state
        .messages
        .iter()
        .find_map(|m| match m {
            Message::Tool(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert!(failed.content.starts_with("Error saving document:"));
    assert!(!failed.finishes_session);
    assert!(console.output().contains("Tool result: Error saving document:"));
}

/// **Scenario**: a long editing session is not cut short by the step limit; only
/// `exit` ends it.
#[tokio::test]
async fn long_session_runs_until_exit() {
    let dir = tempfile::tempdir().unwrap();
    let turns = DEFAULT_RECURSION_LIMIT + 5;
    let mut lines: Vec<String> = (0..turns).map(|i| format!("edit {}", i)).collect();
    lines.push("exit".to_string());
    let llm = Arc::new(MockLlm::with_no_tool_calls("Noted."));
    let console = Arc::new(ScriptedConsole::new(lines));
    let graph = build_drafter_graph(
        llm.clone(),
        console.clone(),
        ToolRegistry::from_tools(document_tools(dir.path())),
    )
    .unwrap();

    let result = run_drafter(&graph, console.as_ref()).await;

    assert!(result.is_ok(), "drafter session aborted: {:?}", result.err());
    assert_eq!(llm.calls(), turns);
    assert_eq!(console.remaining(), 0);
    assert!(console.output().contains("DRAFTER COMPLETED"));
}
