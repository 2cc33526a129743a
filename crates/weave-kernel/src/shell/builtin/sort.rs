//! sort: Sort the lines of a file.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::{lines_out, read_single_file};
use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Sort;

#[async_trait]
impl Tool for Sort {
    fn name(&self) -> &str {
        "sort"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("sort", "Print the lines of a file in sorted order")
            .param(ParamSchema::flag("r", "Reverse the order"))
            .param(ParamSchema::required("file", "File to sort"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let content = read_single_file(&args, ctx)?;
        let mut lines: Vec<&str> = content.lines().collect();
        lines.sort_unstable();
        if args.has_flag(&["r", "reverse"]) {
            lines.reverse();
        }
        Ok(ExecResult::success(lines_out(lines)))
    }
}
