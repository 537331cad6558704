//! Integer arithmetic tools for the react agent: `add_numbers`, `subtract_numbers`,
//! `multiply_numbers`. Each takes `{ "a": int, "b": int }` and returns the result as text.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::Tool;

pub const TOOL_ADD_NUMBERS: &str = "add_numbers";
pub const TOOL_SUBTRACT_NUMBERS: &str = "subtract_numbers";
pub const TOOL_MULTIPLY_NUMBERS: &str = "multiply_numbers";

#[derive(Debug, Deserialize)]
struct BinaryArgs {
    a: i64,
    b: i64,
}

/// Binary integer operation exposed as a tool. Overflow is an invalid-input error.
pub struct ArithmeticTool {
    name: &'static str,
    description: &'static str,
    op: fn(i64, i64) -> Option<i64>,
}

impl ArithmeticTool {
    pub fn add_numbers() -> Self {
        Self {
            name: TOOL_ADD_NUMBERS,
            description: "Add two numbers together",
            op: i64::checked_add,
        }
    }

    pub fn subtract_numbers() -> Self {
        Self {
            name: TOOL_SUBTRACT_NUMBERS,
            description: "Subtract the second number from the first",
            op: i64::checked_sub,
        }
    }

    pub fn multiply_numbers() -> Self {
        Self {
            name: TOOL_MULTIPLY_NUMBERS,
            description: "Multiply two numbers together",
            op: i64::checked_mul,
        }
    }
}

/// The three arithmetic tools, ready for [`ToolRegistry::from_tools`](super::ToolRegistry::from_tools).
pub fn arithmetic_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(ArithmeticTool::add_numbers()),
        Box::new(ArithmeticTool::subtract_numbers()),
        Box::new(ArithmeticTool::multiply_numbers()),
    ]
}

#[async_trait]
impl Tool for ArithmeticTool {
    fn name(&self) -> &str {
        self.name
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "a": { "type": "integer" },
                    "b": { "type": "integer" }
                },
                "required": ["a", "b"]
            }),
        }
    }

    async fn call(
        &self,
        args: serde_json::Value,
        _ctx: &mut ToolCallContext,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let BinaryArgs { a, b } = serde_json::from_value(args)
            .map_err(|e| ToolSourceError::InvalidInput(e.to_string()))?;
        let result = (self.op)(a, b).ok_or_else(|| {
            ToolSourceError::Execution(format!("{}({}, {}) overflows", self.name, a, b))
        })?;
        Ok(ToolCallContent::text(result.to_string()))
    }
}
