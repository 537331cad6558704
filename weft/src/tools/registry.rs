use std::collections::HashMap;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;

/// Registry of tools keyed by name.
///
/// Built once at startup and read-only afterwards. Lookup is by exact name;
/// an unknown name yields [`ToolSourceError::NotFound`].
///
/// # Examples
///
/// ```
/// use weft::tools::{arithmetic_tools, ToolRegistry};
///
/// let registry = ToolRegistry::from_tools(arithmetic_tools());
/// assert_eq!(
///     registry.names(),
///     vec!["add_numbers", "multiply_numbers", "subtract_numbers"]
/// );
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry holding all given tools.
    pub fn from_tools(tools: impl IntoIterator<Item = Box<dyn Tool>>) -> Self {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Registers a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "tool registered twice, replacing previous");
        }
    }

    /// Specs of all registered tools, sorted by name.
    pub fn list(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|t| t.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Calls a tool by exact name.
    ///
    /// # Errors
    ///
    /// `ToolSourceError::NotFound` when no tool has that name; otherwise whatever the tool returns.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &mut ToolCallContext,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(args, ctx).await
    }
}
