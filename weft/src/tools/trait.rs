use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};

/// A single tool that the model can request.
///
/// Each tool has a unique name, a specification (description and JSON schema),
/// and implements the call logic. Tools are registered once with a
/// [`ToolRegistry`](super::ToolRegistry) and looked up by exact name.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use weft::tools::Tool;
/// use weft::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "echo".to_string(),
///             description: Some("Echo the input".to_string()),
///             input_schema: serde_json::json!({}),
///         }
///     }
///
///     async fn call(
///         &self,
///         args: Value,
///         _ctx: &mut ToolCallContext,
///     ) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent::text(args.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name; the registry key and the name the model uses.
    fn name(&self) -> &str;

    /// Specification bound to the model (name, description, argument schema).
    fn spec(&self) -> ToolSpec;

    /// Executes the tool.
    ///
    /// `ctx` carries the session document; tools that edit it write through
    /// `ctx.document`. Returns `InvalidInput` for arguments that do not match the
    /// schema and `Execution` for failures the tool does not handle itself.
    async fn call(
        &self,
        args: serde_json::Value,
        ctx: &mut ToolCallContext,
    ) -> Result<ToolCallContent, ToolSourceError>;
}
