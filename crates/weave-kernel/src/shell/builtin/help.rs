//! help: List available commands.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, Tool, ToolArgs, ToolSchema};

pub struct Help;

#[async_trait]
impl Tool for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("help", "List available commands")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let width = ctx
            .tool_schemas
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0);

        let mut out = String::from("Weave shell builtins:\n\n");
        for schema in &ctx.tool_schemas {
            out.push_str(&format!("  {:<width$}  {}\n", schema.name, schema.description));
        }
        out.push_str("\nUse 'man <command>' for details.\n");
        Ok(ExecResult::success(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::{empty_ctx, run};

    #[tokio::test]
    async fn lists_every_builtin() {
        let mut ctx = empty_ctx();
        let out = run(&Help, &mut ctx, &[]).await.unwrap().out;
        for name in ["pwd", "ls", "cd", "grep", "tree", "df", "clear"] {
            assert!(out.contains(&format!("  {name} ")), "{name}");
        }
    }
}
