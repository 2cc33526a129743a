//! which: Locate a command.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Which;

#[async_trait]
impl Tool for Which {
    fn name(&self) -> &str {
        "which"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("which", "Show whether a command is a builtin")
            .param(ParamSchema::required("command", "Command name").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        if args.positional.is_empty() {
            return Err(ShellError::MissingOperand);
        }

        let mut out = String::new();
        let mut missing = Vec::new();
        for name in &args.positional {
            if ctx.tool_schemas.iter().any(|s| &s.name == name) {
                out.push_str(&format!("{name}: shell built-in command\n"));
            } else {
                missing.push(format!("which: no {name} in (builtins)"));
            }
        }
        let code = if missing.is_empty() { 0 } else { 1 };
        Ok(ExecResult::from_output(code, out, missing.join("\n")))
    }
}
