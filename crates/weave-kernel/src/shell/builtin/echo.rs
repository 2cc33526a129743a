//! echo: Print arguments.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Echo tool: prints arguments separated by spaces.
pub struct Echo;

#[async_trait]
impl Tool for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("echo", "Print arguments to standard output")
            .param(ParamSchema::flag("n", "Do not output the trailing newline"))
            .param(ParamSchema::optional("text", "Values to print").many())
    }

    async fn execute(&self, args: ToolArgs, _ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        // Only a leading -n is an option; anything else prints verbatim
        let mut words = args.raw.as_slice();
        let mut newline = true;
        while let Some((first, rest)) = words.split_first()
            && first == "-n"
        {
            newline = false;
            words = rest;
        }

        let mut output = words.join(" ");
        if newline {
            output.push('\n');
        }
        Ok(ExecResult::success(output))
    }
}
