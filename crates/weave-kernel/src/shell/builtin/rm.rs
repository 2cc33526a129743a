//! rm: Remove files and directories.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::{ShellError, VfsError};
use crate::paths;
use crate::shell::{ExecContext, ParamSchema, SOURCE, Tool, ToolArgs, ToolSchema};

/// Rm tool: remove files, or whole folders with `-r`.
pub struct Rm;

#[async_trait]
impl Tool for Rm {
    fn name(&self) -> &str {
        "rm"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rm", "Remove files and directories")
            .param(ParamSchema::flag("r", "Remove directories and their contents"))
            .param(ParamSchema::flag("f", "Ignore missing files"))
            .param(ParamSchema::required("path", "File or directory to remove").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let recursive = args.has_flag(&["r", "R", "recursive"]);
        let force = args.has_flag(&["f", "force"]);
        if args.positional.is_empty() && !force {
            return Err(ShellError::MissingOperand);
        }

        for path in &args.positional {
            let resolved = ctx.resolve_path(path);
            if paths::is_root(&resolved) {
                return Err(VfsError::CannotDeleteRoot.into());
            }
            if !ctx.vfs.exists(&resolved) {
                if force {
                    continue;
                }
                return Err(VfsError::NotFound(resolved).into());
            }
            if ctx.vfs.is_folder(&resolved) && !recursive {
                return Err(ShellError::failed(format!(
                    "cannot remove '{path}': Is a directory"
                )));
            }
            ctx.vfs.delete_node(&resolved, SOURCE).await?;
        }
        Ok(ExecResult::success(""))
    }
}
