//! rmdir: Remove empty directories.

use async_trait::async_trait;
use weave_types::{ExecResult, Node};

use crate::error::{ShellError, VfsError};
use crate::shell::{ExecContext, ParamSchema, SOURCE, Tool, ToolArgs, ToolSchema};

pub struct Rmdir;

#[async_trait]
impl Tool for Rmdir {
    fn name(&self) -> &str {
        "rmdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rmdir", "Remove empty directories")
            .param(ParamSchema::required("path", "Directory to remove").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        if args.positional.is_empty() {
            return Err(ShellError::MissingOperand);
        }
        for path in &args.positional {
            let resolved = ctx.resolve_path(path);
            match ctx.vfs.get_node(&resolved) {
                Some(Node::Folder(folder)) if !folder.children.is_empty() => {
                    return Err(ShellError::failed(format!(
                        "failed to remove '{path}': Directory not empty"
                    )));
                }
                Some(Node::Folder(_)) => {
                    ctx.vfs.delete_node(&resolved, SOURCE).await?;
                }
                Some(Node::File(_)) => return Err(VfsError::NotADirectory(resolved).into()),
                None => return Err(VfsError::NotFound(resolved).into()),
            }
        }
        Ok(ExecResult::success(""))
    }
}
