//! head: Print the first lines of a file.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::{lines_out, read_single_file};
use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Lines shown by `head` and `tail`.
pub const LINES: usize = 10;

pub struct Head;

#[async_trait]
impl Tool for Head {
    fn name(&self) -> &str {
        "head"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("head", "Print the first 10 lines of a file")
            .param(ParamSchema::required("file", "File to read"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let content = read_single_file(&args, ctx)?;
        Ok(ExecResult::success(lines_out(content.lines().take(LINES))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SOURCE;
    use crate::shell::builtin::testing::{empty_ctx, run};

    #[tokio::test]
    async fn first_ten() {
        let mut ctx = empty_ctx();
        let content: String = (1..=15).map(|i| format!("{i}\n")).collect();
        ctx.vfs.create_file("/n", &content, SOURCE).await.unwrap();
        let result = run(&Head, &mut ctx, &["/n"]).await.unwrap();
        assert_eq!(result.out.lines().collect::<Vec<_>>(), ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
    }

    #[tokio::test]
    async fn short_file_is_whole() {
        let mut ctx = empty_ctx();
        ctx.vfs.create_file("/n", "a\nb", SOURCE).await.unwrap();
        assert_eq!(run(&Head, &mut ctx, &["/n"]).await.unwrap().out, "a\nb\n");
    }

    #[tokio::test]
    async fn needs_a_file() {
        let mut ctx = empty_ctx();
        assert!(matches!(
            run(&Head, &mut ctx, &[]).await,
            Err(ShellError::MissingOperand)
        ));
    }
}
