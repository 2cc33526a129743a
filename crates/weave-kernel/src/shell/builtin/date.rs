//! date: Print the current date and time.

use async_trait::async_trait;
use chrono::Utc;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Date;

#[async_trait]
impl Tool for Date {
    fn name(&self) -> &str {
        "date"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("date", "Print the current date and time (UTC)")
            .param(ParamSchema::flag("I", "ISO 8601 date only"))
    }

    async fn execute(&self, args: ToolArgs, _ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let now = Utc::now();
        let text = if args.has_flag(&["I", "iso-8601"]) {
            now.format("%Y-%m-%d").to_string()
        } else {
            now.format("%a %b %e %H:%M:%S UTC %Y").to_string()
        };
        Ok(ExecResult::success(format!("{text}\n")))
    }
}
