mod arithmetic;
mod document;
mod registry;
mod r#trait;

pub use arithmetic::{
    arithmetic_tools, ArithmeticTool, TOOL_ADD_NUMBERS, TOOL_MULTIPLY_NUMBERS,
    TOOL_SUBTRACT_NUMBERS,
};
pub use document::{
    document_tools, with_document_extension, SaveTool, UpdateTool, DOCUMENT_EXTENSION, TOOL_SAVE,
    TOOL_UPDATE,
};
pub use r#trait::Tool;
pub use registry::ToolRegistry;
