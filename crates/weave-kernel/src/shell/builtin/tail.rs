//! tail: Print the last lines of a file.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::head::LINES;
use super::{lines_out, read_single_file};
use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Tail;

#[async_trait]
impl Tool for Tail {
    fn name(&self) -> &str {
        "tail"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("tail", "Print the last 10 lines of a file")
            .param(ParamSchema::required("file", "File to read"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let content = read_single_file(&args, ctx)?;
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(LINES);
        Ok(ExecResult::success(lines_out(&lines[start..])))
    }
}
