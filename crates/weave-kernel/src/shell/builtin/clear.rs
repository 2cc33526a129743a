//! clear: Clear the terminal.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Clear tool: asks the host to clear its display.
pub struct Clear;

#[async_trait]
impl Tool for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("clear", "Clear the terminal screen")
    }

    async fn execute(&self, _args: ToolArgs, _ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        Ok(ExecResult::clear_screen())
    }
}
