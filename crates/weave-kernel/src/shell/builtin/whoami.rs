//! whoami: Print the current user.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, Tool, ToolArgs, ToolSchema};

pub struct Whoami;

#[async_trait]
impl Tool for Whoami {
    fn name(&self) -> &str {
        "whoami"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("whoami", "Print the current user name")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        Ok(ExecResult::success(format!("{}\n", ctx.user)))
    }
}
