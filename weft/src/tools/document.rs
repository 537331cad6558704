//! Drafter tools: `update` replaces the session document, `save` writes it to a
//! `.txt` file under the working folder and marks the session as finished.
//!
//! Both operate on [`ToolCallContext::document`]; neither touches shared state.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::Tool;

pub const TOOL_UPDATE: &str = "update";
pub const TOOL_SAVE: &str = "save";

/// Extension appended by `save` when the requested name lacks it.
pub const DOCUMENT_EXTENSION: &str = ".txt";

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    content: String,
}

#[derive(Debug, Deserialize)]
struct SaveArgs {
    filename: String,
}

/// Overwrites the document with the given content.
pub struct UpdateTool;

#[async_trait]
impl Tool for UpdateTool {
    fn name(&self) -> &str {
        TOOL_UPDATE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_UPDATE.to_string(),
            description: Some("Update the document with the provided content.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "The complete updated document content."
                    }
                },
                "required": ["content"]
            }),
        }
    }

    async fn call(
        &self,
        args: serde_json::Value,
        ctx: &mut ToolCallContext,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let UpdateArgs { content } = serde_json::from_value(args)
            .map_err(|e| ToolSourceError::InvalidInput(e.to_string()))?;
        ctx.document.replace(content);
        Ok(ToolCallContent::text(format!(
            "Document content updated; The current content is: \n{}",
            ctx.document.content()
        )))
    }
}

/// Writes the document to `<filename>.txt` under the working folder.
///
/// I/O failures are reported in the result text and never returned as errors,
/// so the conversation can continue and the model can retry with another name.
pub struct SaveTool {
    working_folder: PathBuf,
}

impl SaveTool {
    pub fn new(working_folder: impl Into<PathBuf>) -> Self {
        Self {
            working_folder: working_folder.into(),
        }
    }
}

/// `notes` → `notes.txt`; `notes.txt` is left as is.
pub fn with_document_extension(filename: &str) -> String {
    if filename.ends_with(DOCUMENT_EXTENSION) {
        filename.to_string()
    } else {
        format!("{}{}", filename, DOCUMENT_EXTENSION)
    }
}

/// Resolves `.` and `..` lexically; does not touch the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut buf = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(p) => buf = PathBuf::from(p.as_os_str()),
            Component::RootDir => buf.push(comp),
            Component::CurDir => {}
            Component::ParentDir => {
                buf.pop();
            }
            Component::Normal(s) => buf.push(s),
        }
    }
    buf
}

/// Joins `filename` onto the working folder and rejects results outside it.
async fn resolve_under(working_folder: &Path, filename: &str) -> std::io::Result<PathBuf> {
    let base = tokio::fs::canonicalize(working_folder).await?;
    let full = normalize_path(&base.join(filename));
    if !full.starts_with(&base) || full == base {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("{} is outside the working folder", filename),
        ));
    }
    Ok(full)
}

#[async_trait]
impl Tool for SaveTool {
    fn name(&self) -> &str {
        TOOL_SAVE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_SAVE.to_string(),
            description: Some(
                "Save the current document to a text file and finish the process.".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "Name for the text file; .txt is appended if missing."
                    }
                },
                "required": ["filename"]
            }),
        }
    }

    async fn call(
        &self,
        args: serde_json::Value,
        ctx: &mut ToolCallContext,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let SaveArgs { filename } = serde_json::from_value(args)
            .map_err(|e| ToolSourceError::InvalidInput(e.to_string()))?;
        let filename = with_document_extension(&filename);
        let written = match resolve_under(&self.working_folder, &filename).await {
            Ok(path) => tokio::fs::write(&path, ctx.document.content())
                .await
                .map(|_| path),
            Err(e) => Err(e),
        };
        match written {
            Ok(path) => {
                tracing::debug!(path = %path.display(), bytes = ctx.document.content().len(), "document saved");
                Ok(ToolCallContent::finished(format!(
                    "Document saved to {}",
                    filename
                )))
            }
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "saving document failed");
                Ok(ToolCallContent::text(format!(
                    "Error saving document: {}",
                    e
                )))
            }
        }
    }
}

/// `update` and `save` (writing under `working_folder`).
pub fn document_tools(working_folder: impl Into<PathBuf>) -> Vec<Box<dyn Tool>> {
    vec![Box::new(UpdateTool), Box::new(SaveTool::new(working_folder))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Document;

    #[test]
    fn extension_appended_only_when_missing() {
        assert_eq!(with_document_extension("notes"), "notes.txt");
        assert_eq!(with_document_extension("notes.txt"), "notes.txt");
        assert_eq!(with_document_extension("notes.md"), "notes.md.txt");
    }

    #[test]
    fn extension_keeps_name_as_given() {
        assert_eq!(with_document_extension("my notes"), "my notes.txt");
        assert_eq!(with_document_extension(" notes "), " notes .txt");
    }

    #[tokio::test]
    async fn update_replaces_document() {
        let mut ctx = ToolCallContext::new(Document::new("old"));
        let out = UpdateTool
            .call(json!({"content": "draft v1"}), &mut ctx)
            .await
            .unwrap();
        assert_eq!(ctx.document.content(), "draft v1");
        assert!(out.text.ends_with("draft v1"));
        assert!(!out.finishes_session);
    }

    #[tokio::test]
    async fn save_with_and_without_extension_hit_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveTool::new(dir.path());
        let mut ctx = ToolCallContext::new(Document::new("body"));

        let a = tool.call(json!({"filename": "notes"}), &mut ctx).await.unwrap();
        let b = tool
            .call(json!({"filename": "notes.txt"}), &mut ctx)
            .await
            .unwrap();

        assert_eq!(a.text, "Document saved to notes.txt");
        assert_eq!(a, b);
        assert!(a.finishes_session);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "body"
        );
    }

    #[tokio::test]
    async fn save_io_failure_is_reported_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let tool = SaveTool::new(&missing);
        let mut ctx = ToolCallContext::new(Document::new("x"));
        let out = tool.call(json!({"filename": "a"}), &mut ctx).await.unwrap();
        assert!(out.text.starts_with("Error saving document:"), "{}", out.text);
        assert!(!out.finishes_session);
    }

    #[tokio::test]
    async fn save_outside_working_folder_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveTool::new(dir.path());
        let mut ctx = ToolCallContext::new(Document::new("x"));
        let out = tool
            .call(json!({"filename": "../escape"}), &mut ctx)
            .await
            .unwrap();
        assert!(out.text.contains("outside the working folder"), "{}", out.text);
        assert!(!out.finishes_session);
    }

    #[tokio::test]
    async fn save_missing_filename_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ToolCallContext::default();
        let err = SaveTool::new(dir.path())
            .call(json!({}), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolSourceError::InvalidInput(_)));
    }
}
