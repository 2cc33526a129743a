//! find: Search for files by name.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::lines_out;
use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Find tool: `find <pattern> [path]`, depth-first, files only.
pub struct Find;

#[async_trait]
impl Tool for Find {
    fn name(&self) -> &str {
        "find"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("find", "Find files whose name matches a glob (* and ?)")
            .param(ParamSchema::required("pattern", "Name pattern, e.g. *.txt"))
            .param(ParamSchema::optional("path", "Directory to search (default .)"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        // Accept `find [path] -name <pattern>` as well
        let (pattern, start) = match args.raw.iter().position(|a| a == "-name") {
            Some(i) => {
                let pattern = args.raw.get(i + 1).ok_or(ShellError::MissingOperand)?;
                let start = if i > 0 { args.raw[0].as_str() } else { "." };
                (pattern.as_str(), start)
            }
            None => {
                let pattern = args.get_positional(0).ok_or(ShellError::MissingOperand)?;
                (pattern, args.get_positional(1).unwrap_or("."))
            }
        };

        let search = ctx.vfs.find_files(pattern, &ctx.resolve_path(start))?;
        Ok(ExecResult::success(lines_out(&search)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SOURCE;
    use crate::shell::builtin::testing::{empty_ctx, run};

    async fn search_ctx() -> ExecContext {
        let ctx = empty_ctx();
        for dir in ["/a", "/a/b"] {
            ctx.vfs.create_folder(dir, SOURCE).await.unwrap();
        }
        for file in ["/a/x.txt", "/a/b/y.txt", "/a/b/z.md"] {
            ctx.vfs.create_file(file, "", SOURCE).await.unwrap();
        }
        ctx
    }

    #[tokio::test]
    async fn depth_first_matches() {
        let mut ctx = search_ctx().await;
        let result = run(&Find, &mut ctx, &["*.txt", "/a"]).await.unwrap();
        assert_eq!(result.out, "/a/x.txt\n/a/b/y.txt\n");
    }

    #[tokio::test]
    async fn defaults_to_cwd() {
        let mut ctx = search_ctx().await;
        ctx.cwd = "/a/b".into();
        let result = run(&Find, &mut ctx, &["*"]).await.unwrap();
        assert_eq!(result.out, "/a/b/y.txt\n/a/b/z.md\n");
    }

    #[tokio::test]
    async fn name_form() {
        let mut ctx = search_ctx().await;
        let result = run(&Find, &mut ctx, &["/a", "-name", "?.md"]).await.unwrap();
        assert_eq!(result.out, "/a/b/z.md\n");
    }

    #[tokio::test]
    async fn no_match_is_empty() {
        let mut ctx = search_ctx().await;
        let result = run(&Find, &mut ctx, &["*.rs", "/"]).await.unwrap();
        assert!(result.ok());
        assert!(result.out.is_empty());
    }

    #[tokio::test]
    async fn missing_start() {
        let mut ctx = search_ctx().await;
        assert!(run(&Find, &mut ctx, &["*", "/nope"]).await.is_err());
        assert!(run(&Find, &mut ctx, &[]).await.is_err());
    }
}
