//! man: Show the manual page for a builtin.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Man tool: renders a builtin's schema as a manual page.
pub struct Man;

fn render(schema: &ToolSchema) -> String {
    let mut out = format!(
        "NAME\n    {} - {}\n\nSYNOPSIS\n    {}\n",
        schema.name,
        schema.description,
        schema.synopsis()
    );

    let flags: Vec<&ParamSchema> = schema.params.iter().filter(|p| p.flag).collect();
    let operands: Vec<&ParamSchema> = schema.params.iter().filter(|p| !p.flag).collect();
    if !flags.is_empty() {
        out.push_str("\nOPTIONS\n");
        for p in flags {
            out.push_str(&format!("    -{:<10} {}\n", p.name, p.description));
        }
    }
    if !operands.is_empty() {
        out.push_str("\nOPERANDS\n");
        for p in operands {
            out.push_str(&format!("    {:<11} {}\n", p.name, p.description));
        }
    }
    out
}

#[async_trait]
impl Tool for Man {
    fn name(&self) -> &str {
        "man"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("man", "Show the manual page for a command")
            .param(ParamSchema::required("command", "Command to describe"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let name = args
            .get_positional(0)
            .ok_or_else(|| ShellError::usage("What manual page do you want?"))?;
        let schema = ctx
            .tool_schemas
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ShellError::failed(format!("No manual entry for {name}")))?;
        Ok(ExecResult::success(render(schema)))
    }
}
