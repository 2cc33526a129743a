//! touch: Create empty files.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, SOURCE, Tool, ToolArgs, ToolSchema};

/// Touch tool: create a file if missing; existing files are left alone.
pub struct Touch;

#[async_trait]
impl Tool for Touch {
    fn name(&self) -> &str {
        "touch"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("touch", "Create empty files")
            .param(ParamSchema::required("file", "File to create").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        if args.positional.is_empty() {
            return Err(ShellError::MissingOperand);
        }
        for path in &args.positional {
            let resolved = ctx.resolve_path(path);
            if !ctx.vfs.exists(&resolved) {
                ctx.vfs.create_file(&resolved, "", SOURCE).await?;
            }
        }
        Ok(ExecResult::success(""))
    }
}
