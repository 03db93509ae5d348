//! File tools: read, write, and list files inside the workspace sandbox.

use async_trait::async_trait;
use jarvis_core::error::ToolError;
use jarvis_core::tool::Tool;

use crate::sandbox::{SandboxError, Workspace};

/// Longest file content returned to the model, in characters.
const MAX_READ_CHARS: usize = 10_000;

fn denied(tool_name: &str, e: SandboxError) -> ToolError {
    ToolError::PermissionDenied {
        tool_name: tool_name.into(),
        reason: e.to_string(),
    }
}

fn failed(tool_name: &str, reason: impl Into<String>) -> ToolError {
    ToolError::ExecutionFailed {
        tool_name: tool_name.into(),
        reason: reason.into(),
    }
}

pub struct ReadFileTool {
    workspace: Workspace,
}

impl ReadFileTool {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read contents of a file. Input: filename."
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        let name = input.trim();
        if name.is_empty() {
            return Err(ToolError::InvalidArguments("read_file needs a filename".into()));
        }
        let path = self.workspace.resolve(name).map_err(|e| denied(self.name(), e))?;

        if !path.is_file() {
            return Err(failed(self.name(), format!("File not found: {name}")));
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| failed(self.name(), format!("Error reading file: {e}")))?;

        let content = match content.char_indices().nth(MAX_READ_CHARS) {
            Some((cut, _)) => format!("{}\n... (file truncated)", &content[..cut]),
            None => content,
        };

        Ok(format!("Contents of {name}:\n\n{content}"))
    }
}

pub struct WriteFileTool {
    workspace: Workspace,
}

impl WriteFileTool {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file. Input format: 'filename||content'"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        let (name, content) = input.split_once("||").ok_or_else(|| {
            ToolError::InvalidArguments("Input must be 'filename||content'".into())
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ToolError::InvalidArguments("write_file needs a filename".into()));
        }
        let path = self.workspace.resolve(name).map_err(|e| denied(self.name(), e))?;

        if let Some(parent) = path.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            return Err(failed(self.name(), format!("Failed to create directory: {e}")));
        }

        tokio::fs::write(&path, content)
            .await
            .map_err(|e| failed(self.name(), format!("Failed to write file: {e}")))?;

        Ok(format!("File written successfully: {name} ({} bytes)", content.len()))
    }
}

pub struct ListFilesTool {
    workspace: Workspace,
}

impl ListFilesTool {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files in directory. Input: directory path ('.' for the workspace root)."
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        let dir = match input.trim() {
            "" => ".",
            d => d,
        };
        let path = self.workspace.resolve(dir).map_err(|e| denied(self.name(), e))?;

        if !path.is_dir() {
            return Err(failed(self.name(), format!("Directory not found: {dir}")));
        }

        let mut reader = tokio::fs::read_dir(&path)
            .await
            .map_err(|e| failed(self.name(), format!("Error listing directory: {e}")))?;

        let mut items = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| failed(self.name(), format!("Error listing directory: {e}")))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            let line = match entry.metadata().await {
                Ok(meta) if meta.is_dir() => format!("[dir]  {name}/"),
                Ok(meta) => format!("[file] {name} ({} bytes)", meta.len()),
                Err(_) => format!("[?]    {name}"),
            };
            items.push((name, line));
        }
        items.sort();

        if items.is_empty() {
            return Ok("Empty directory".into());
        }
        Ok(items.into_iter().map(|(_, line)| line).collect::<Vec<_>>().join("\n"))
    }
}
