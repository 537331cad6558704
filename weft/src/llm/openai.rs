//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Requires `OPENAI_API_KEY` (or explicit config). Tools set with `with_tools`
//! are advertised on every request, so the response may carry `tool_calls`.
//! Assistant tool requests and tool results in the history are sent back in the
//! wire shape the API expects, correlated by call id.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ToolChoiceMode};
use crate::message::{AssistantMessage, Message, ToolCall, ToolMessage};
use crate::tool_source::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCall, ChatCompletionMessageToolCalls,
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestToolMessageArgs,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionToolChoiceOption,
        ChatCompletionTools, CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
        ToolChoiceOptions,
    },
    Client,
};

/// OpenAI Chat Completions client.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide config via
/// `ChatOpenAI::with_config` (custom key or base URL).
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
    tool_choice: Option<ToolChoiceMode>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::new(), model)
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            tools: None,
            temperature: None,
            tool_choice: None,
        }
    }

    /// Build client for an OpenAI-compatible endpoint. `None` keeps the default
    /// base URL / the key from `OPENAI_API_KEY`.
    pub fn for_endpoint(
        model: impl Into<String>,
        api_base: Option<&str>,
        api_key: Option<&str>,
    ) -> Self {
        let mut config = OpenAIConfig::new();
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        Self::with_config(config, model)
    }

    /// Set tools for this completion (enables tool_calls in response).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set tool choice mode. Without it, `auto` is sent whenever tools are present.
    pub fn with_tool_choice(mut self, mode: ToolChoiceMode) -> Self {
        self.tool_choice = Some(mode);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_message(m: &Message) -> Result<ChatCompletionRequestMessage, AgentError> {
        let msg = match m {
            Message::System(s) => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(s.as_str()),
            ),
            Message::User(s) => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(s.as_str()),
            ),
            Message::Assistant(a) => Self::assistant_message(a)?,
            Message::Tool(t) => Self::tool_message(t)?,
        };
        Ok(msg)
    }

    fn assistant_message(a: &AssistantMessage) -> Result<ChatCompletionRequestMessage, AgentError> {
        let mut args = ChatCompletionRequestAssistantMessageArgs::default();
        if !a.content.is_empty() || !a.has_tool_calls() {
            args.content(a.content.clone());
        }
        if a.has_tool_calls() {
            let calls: Vec<ChatCompletionMessageToolCalls> = a
                .tool_calls
                .iter()
                .map(|tc| {
                    ChatCompletionMessageToolCalls::Function(ChatCompletionMessageToolCall {
                        id: tc.id.clone().unwrap_or_default(),
                        function: FunctionCall {
                            name: tc.name.clone(),
                            arguments: tc.arguments.clone(),
                        },
                    })
                })
                .collect();
            args.tool_calls(calls);
        }
        let msg = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI assistant message build failed: {}", e))
        })?;
        Ok(ChatCompletionRequestMessage::Assistant(msg))
    }

    fn tool_message(t: &ToolMessage) -> Result<ChatCompletionRequestMessage, AgentError> {
        let msg = ChatCompletionRequestToolMessageArgs::default()
            .content(t.content.clone())
            .tool_call_id(t.call_id.clone().unwrap_or_default())
            .build()
            .map_err(|e| {
                AgentError::ExecutionFailed(format!("OpenAI tool message build failed: {}", e))
            })?;
        Ok(ChatCompletionRequestMessage::Tool(msg))
    }

    /// Convert our `Message` list to OpenAI request messages.
    fn messages_to_request(
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
        messages.iter().map(Self::request_message).collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages)?);

        if let Some(ref tools) = self.tools {
            let chat_tools: Vec<ChatCompletionTools> = tools
                .iter()
                .map(|t| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: Some(t.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            args.tools(chat_tools);
            let opt = match self.tool_choice.unwrap_or_default() {
                ToolChoiceMode::Auto => ToolChoiceOptions::Auto,
                ToolChoiceMode::None => ToolChoiceOptions::None,
                ToolChoiceMode::Required => ToolChoiceOptions::Required,
            };
            args.tool_choice(ChatCompletionToolChoiceOption::Mode(opt));
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        debug!(
            trace_id = %trace_id,
            model = %self.model,
            message_count = messages.len(),
            tools_count = self.tools.as_ref().map(|t| t.len()).unwrap_or(0),
            temperature = ?self.temperature,
            tool_choice = ?self.tool_choice,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "OpenAI response body");
        }

        let choice =
            response.choices.into_iter().next().ok_or_else(|| {
                AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
            })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| match tc {
                ChatCompletionMessageToolCalls::Function(f) => Some(ToolCall {
                    name: f.function.name,
                    arguments: f.function.arguments,
                    id: Some(f.id),
                }),
                _ => None,
            })
            .collect();

        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: ChatOpenAI::with_config keeps the model and starts without tools.
    #[test]
    fn chat_openai_with_config_sets_model() {
        let config = OpenAIConfig::new().with_api_key("test-key");
        let llm = ChatOpenAI::with_config(config, "gpt-4o-mini");
        assert_eq!(llm.model(), "gpt-4o-mini");
        assert!(llm.tools.is_none());
    }

    #[test]
    fn with_tool_choice_overrides_auto() {
        let llm = ChatOpenAI::for_endpoint("gpt-4o-mini", None, Some("test-key"))
            .with_tool_choice(ToolChoiceMode::Required);
        assert_eq!(llm.tool_choice, Some(ToolChoiceMode::Required));
        assert!(ChatOpenAI::new("gpt-4o-mini").tool_choice.is_none());
    }

    /// **Scenario**: every role maps to a request message, tool results keep their call id.
    #[test]
    fn messages_to_request_maps_all_roles() {
        let messages = vec![
            Message::system("sys"),
            Message::user("Add 40 + 12"),
            Message::assistant_with_tools(
                "",
                vec![ToolCall::new("add_numbers", r#"{"a":40,"b":12}"#).with_id("call-1")],
            ),
            Message::Tool(ToolMessage {
                call_id: Some("call-1".into()),
                name: "add_numbers".into(),
                content: "52".into(),
                ..Default::default()
            }),
            Message::assistant("52"),
        ];
        let out = ChatOpenAI::messages_to_request(&messages).unwrap();
        assert_eq!(out.len(), 5);
        assert!(matches!(out[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(out[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(out[2], ChatCompletionRequestMessage::Assistant(_)));
        match &out[3] {
            ChatCompletionRequestMessage::Tool(t) => assert_eq!(t.tool_call_id, "call-1"),
            other => panic!("expected tool message, got {:?}", other),
        }
    }
}
