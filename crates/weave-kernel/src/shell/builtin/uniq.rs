//! uniq: Collapse adjacent duplicate lines.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::read_single_file;
use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Uniq;

#[async_trait]
impl Tool for Uniq {
    fn name(&self) -> &str {
        "uniq"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("uniq", "Collapse adjacent duplicate lines")
            .param(ParamSchema::flag("c", "Prefix lines with their repeat count"))
            .param(ParamSchema::required("file", "File to read"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let content = read_single_file(&args, ctx)?;
        let mut runs: Vec<(&str, usize)> = Vec::new();
        for line in content.lines() {
            match runs.last_mut() {
                Some((prev, count)) if *prev == line => *count += 1,
                _ => runs.push((line, 1)),
            }
        }

        let count = args.has_flag(&["c", "count"]);
        let mut out = String::new();
        for (line, n) in runs {
            if count {
                out.push_str(&format!("{n:>7} {line}\n"));
            } else {
                out.push_str(line);
                out.push('\n');
            }
        }
        Ok(ExecResult::success(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SOURCE;
    use crate::shell::builtin::testing::{empty_ctx, run};

    #[tokio::test]
    async fn collapses_adjacent_only() {
        let mut ctx = empty_ctx();
        ctx.vfs.create_file("/f", "a\na\nb\na\n", SOURCE).await.unwrap();
        assert_eq!(run(&Uniq, &mut ctx, &["/f"]).await.unwrap().out, "a\nb\na\n");
    }

    #[tokio::test]
    async fn counts() {
        let mut ctx = empty_ctx();
        ctx.vfs.create_file("/f", "a\na\nb\n", SOURCE).await.unwrap();
        assert_eq!(
            run(&Uniq, &mut ctx, &["-c", "/f"]).await.unwrap().out,
            "      2 a\n      1 b\n"
        );
    }
}
