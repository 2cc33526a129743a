//! mv: Move or rename files and directories.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::transfer_plan;
use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, SOURCE, Tool, ToolArgs, ToolSchema};

pub struct Mv;

#[async_trait]
impl Tool for Mv {
    fn name(&self) -> &str {
        "mv"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mv", "Move or rename files and directories")
            .param(ParamSchema::required("source", "File or directory to move").many())
            .param(ParamSchema::required("dest", "Destination path or directory"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        for (src, dst) in transfer_plan(&args, ctx)? {
            ctx.vfs.move_node(&src, &dst, SOURCE).await?;
        }
        Ok(ExecResult::success(""))
    }
}
