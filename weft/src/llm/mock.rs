//! Mock LLM for tests and examples.
//!
//! Replays a fixed script of responses, one per call; the last entry repeats once
//! the script runs out. Every request is recorded so tests can check what the model saw.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, ToolCall};

/// Mock LLM: scripted assistant replies.
///
/// **Interaction**: Implements `LlmClient`; used in place of `ChatOpenAI` by tests
/// and the offline example.
pub struct MockLlm {
    script: Vec<Result<LlmResponse, String>>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Creates a mock that replays `responses` in order.
    pub fn scripted(responses: Vec<LlmResponse>) -> Self {
        Self {
            script: responses.into_iter().map(Ok).collect(),
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that returns assistant text and no tool_calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::scripted(vec![LlmResponse::text(content)])
    }

    /// Creates a mock with custom content and tool_calls, returned on every call.
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::scripted(vec![LlmResponse::with_tool_calls(content, tool_calls)])
    }

    /// Stateful mock: first call requests `tool_calls`, later calls answer `final_answer`.
    pub fn first_tools_then_end(tool_calls: Vec<ToolCall>, final_answer: impl Into<String>) -> Self {
        Self::scripted(vec![
            LlmResponse::with_tool_calls("", tool_calls),
            LlmResponse::text(final_answer),
        ])
    }

    /// Creates a mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: vec![Err(message.into())],
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of `invoke` calls so far.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Message lists received by each call, oldest first.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.requests.lock() {
            Ok(mut guard) => guard.push(messages.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(messages.to_vec()),
        }
        let entry = self
            .script
            .get(n)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_else(|| Ok(LlmResponse::default()));
        entry.map_err(AgentError::ExecutionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: the script is replayed in order and its last entry repeats.
    #[tokio::test]
    async fn scripted_replays_then_repeats_last() {
        let llm = MockLlm::scripted(vec![LlmResponse::text("one"), LlmResponse::text("two")]);
        assert_eq!(llm.invoke(&[]).await.unwrap().content, "one");
        assert_eq!(llm.invoke(&[]).await.unwrap().content, "two");
        assert_eq!(llm.invoke(&[]).await.unwrap().content, "two");
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn records_requests() {
        let llm = MockLlm::with_no_tool_calls("hi");
        llm.invoke(&[Message::user("hello")]).await.unwrap();
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], vec![Message::user("hello")]);
    }

    #[tokio::test]
    async fn failing_returns_execution_failed() {
        let llm = MockLlm::failing("boom");
        let err = llm.invoke(&[]).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(m) if m == "boom"));
    }

    #[tokio::test]
    async fn first_tools_then_end_switches_after_first_call() {
        let llm = MockLlm::first_tools_then_end(vec![ToolCall::new("add_numbers", "{}")], "done");
        assert_eq!(llm.invoke(&[]).await.unwrap().tool_calls.len(), 1);
        let second = llm.invoke(&[]).await.unwrap();
        assert!(second.tool_calls.is_empty());
        assert_eq!(second.content, "done");
    }
}
