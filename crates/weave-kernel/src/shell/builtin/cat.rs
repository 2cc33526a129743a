//! cat: Concatenate files.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Cat tool: print file contents. A missing file is reported and the
/// remaining files are still printed.
pub struct Cat;

#[async_trait]
impl Tool for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cat", "Concatenate and print files")
            .param(ParamSchema::required("file", "File to print").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        match args.positional.as_slice() {
            [] => Err(ShellError::MissingOperand),
            [only] => Ok(ExecResult::success(ctx.read_file(only)?)),
            paths => {
                let mut out = String::new();
                let mut errors = Vec::new();
                for path in paths {
                    match ctx.read_file(path) {
                        Ok(content) => out.push_str(&content),
                        Err(e) => errors.push(format!("cat: {e}")),
                    }
                }
                let code = if errors.is_empty() { 0 } else { 1 };
                Ok(ExecResult::from_output(code, out, errors.join("\n")))
            }
        }
    }
}
