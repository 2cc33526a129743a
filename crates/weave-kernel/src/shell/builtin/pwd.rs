//! pwd: Print working directory.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Pwd tool: print the current working directory.
pub struct Pwd;

#[async_trait]
impl Tool for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("pwd", "Print the current working directory")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        Ok(ExecResult::success(format!("{}\n", ctx.cwd)))
    }
}
