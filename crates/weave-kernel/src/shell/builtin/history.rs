//! history: Show command history.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct HistoryTool;

#[async_trait]
impl Tool for HistoryTool {
    fn name(&self) -> &str {
        "history"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("history", "Show numbered command history")
            .param(ParamSchema::flag("c", "Clear the history"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        if args.has_flag(&["c"]) {
            ctx.history.clear();
            return Ok(ExecResult::success(""));
        }
        let out: String = ctx
            .history
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>5}  {line}\n", i + 1))
            .collect();
        Ok(ExecResult::success(out))
    }
}
