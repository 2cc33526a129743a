//! grep: Search file contents with a regular expression.

use async_trait::async_trait;
use regex::RegexBuilder;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Grep tool: print matching lines with their line numbers.
pub struct Grep;

#[async_trait]
impl Tool for Grep {
    fn name(&self) -> &str {
        "grep"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("grep", "Print lines matching a pattern, with line numbers")
            .param(ParamSchema::flag("i", "Ignore case"))
            .param(ParamSchema::required("pattern", "Regular expression"))
            .param(ParamSchema::required("file", "File to search").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let (pattern, files) = match args.positional.split_first() {
            Some((pattern, files)) if !files.is_empty() => (pattern, files),
            _ => return Err(ShellError::MissingOperand),
        };
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(args.has_flag(&["i", "ignore-case"]))
            .build()
            .map_err(|e| ShellError::usage(format!("invalid pattern: {e}")))?;

        let mut out = String::new();
        let mut matched = false;
        for file in files {
            let content = ctx.read_file(file)?;
            for (n, line) in content.lines().enumerate() {
                if !regex.is_match(line) {
                    continue;
                }
                matched = true;
                if files.len() > 1 {
                    out.push_str(&format!("{file}:{}:{line}\n", n + 1));
                } else {
                    out.push_str(&format!("{}:{line}\n", n + 1));
                }
            }
        }

        // Like grep: no match is exit 1 without an error message
        let code = if matched { 0 } else { 1 };
        Ok(ExecResult::from_output(code, out, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::{run, sample_ctx};

    #[tokio::test]
    async fn numbered_matches() {
        let mut ctx = sample_ctx().await;
        let result = run(&Grep, &mut ctx, &["et", "/docs/a.txt"]).await.unwrap();
        assert_eq!(result.out, "2:beta\n");
    }

    #[tokio::test]
    async fn ignore_case() {
        let mut ctx = sample_ctx().await;
        let result = run(&Grep, &mut ctx, &["-i", "ALPHA", "/docs/a.txt"]).await.unwrap();
        assert_eq!(result.out, "1:alpha\n");
    }

    #[tokio::test]
    async fn regex_and_multiple_files() {
        let mut ctx = sample_ctx().await;
        ctx.cwd = "/docs".into();
        let result = run(&Grep, &mut ctx, &["^a", "a.txt", "a.txt"]).await.unwrap();
        assert_eq!(result.out, "a.txt:1:alpha\na.txt:1:alpha\n");
    }

    #[tokio::test]
    async fn no_match_is_exit_one() {
        let mut ctx = sample_ctx().await;
        let result = run(&Grep, &mut ctx, &["zzz", "/docs/a.txt"]).await.unwrap();
        assert_eq!(result.code, 1);
        assert!(result.err.is_empty());
    }

    #[tokio::test]
    async fn errors() {
        let mut ctx = sample_ctx().await;
        assert!(matches!(
            run(&Grep, &mut ctx, &["x"]).await,
            Err(ShellError::MissingOperand)
        ));
        assert!(run(&Grep, &mut ctx, &["(", "/docs/a.txt"]).await.is_err());
        assert!(run(&Grep, &mut ctx, &["x", "/nope"]).await.is_err());
    }
}
