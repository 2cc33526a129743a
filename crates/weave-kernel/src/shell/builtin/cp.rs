//! cp: Copy files and directories.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::transfer_plan;
use crate::error::{ShellError, VfsError};
use crate::shell::{ExecContext, ParamSchema, SOURCE, Tool, ToolArgs, ToolSchema};

/// Cp tool: copy files, or folders with `-r`.
pub struct Cp;

#[async_trait]
impl Tool for Cp {
    fn name(&self) -> &str {
        "cp"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cp", "Copy files and directories")
            .param(ParamSchema::flag("r", "Copy directories recursively"))
            .param(ParamSchema::required("source", "File or directory to copy").many())
            .param(ParamSchema::required("dest", "Destination path or directory"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let recursive = args.has_flag(&["r", "R", "recursive"]);
        for (src, dst) in transfer_plan(&args, ctx)? {
            if !ctx.vfs.exists(&src) {
                return Err(VfsError::NotFound(src).into());
            }
            if ctx.vfs.is_folder(&src) && !recursive {
                return Err(ShellError::failed(format!(
                    "-r not specified; omitting directory '{src}'"
                )));
            }
            ctx.vfs.copy_node(&src, &dst, SOURCE).await?;
        }
        Ok(ExecResult::success(""))
    }
}
