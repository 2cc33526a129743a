//! mkdir: Create directories.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::{ShellError, VfsError};
use crate::paths;
use crate::shell::{ExecContext, ParamSchema, SOURCE, Tool, ToolArgs, ToolSchema};

/// Mkdir tool: create directories.
pub struct Mkdir;

#[async_trait]
impl Tool for Mkdir {
    fn name(&self) -> &str {
        "mkdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mkdir", "Create directories")
            .param(ParamSchema::flag("p", "Create parent directories as needed"))
            .param(ParamSchema::required("path", "Directory to create").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        if args.positional.is_empty() {
            return Err(ShellError::MissingOperand);
        }
        let parents = args.has_flag(&["p", "parents"]);

        for path in &args.positional {
            let resolved = ctx.resolve_path(path);
            if parents {
                create_all(ctx, &resolved).await?;
            } else {
                ctx.vfs.create_folder(&resolved, SOURCE).await?;
            }
        }
        Ok(ExecResult::success(""))
    }
}

/// Create `path` and its missing ancestors. Existing folders are fine.
async fn create_all(ctx: &ExecContext, path: &str) -> Result<(), ShellError> {
    let mut current = String::from(paths::ROOT);
    for segment in paths::segments(path) {
        current = paths::join(&current, segment);
        if ctx.vfs.is_folder(&current) {
            continue;
        }
        if ctx.vfs.exists(&current) {
            return Err(VfsError::NotADirectory(current).into());
        }
        ctx.vfs.create_folder(&current, SOURCE).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::{empty_ctx, run, sample_ctx};

    #[tokio::test]
    async fn creates_folder() {
        let mut ctx = empty_ctx();
        run(&Mkdir, &mut ctx, &["/demo", "other"]).await.unwrap();
        assert!(ctx.vfs.is_folder("/demo"));
        assert!(ctx.vfs.is_folder("/other"));
    }

    #[tokio::test]
    async fn existing_fails_without_p() {
        let mut ctx = sample_ctx().await;
        let err = run(&Mkdir, &mut ctx, &["/docs"]).await.unwrap_err();
        assert_eq!(err.to_string(), "/docs: File exists");
    }

    #[tokio::test]
    async fn missing_parent_fails_without_p() {
        let mut ctx = empty_ctx();
        assert!(run(&Mkdir, &mut ctx, &["/a/b"]).await.is_err());
        assert!(!ctx.vfs.exists("/a"));
    }

    #[tokio::test]
    async fn p_creates_parents_and_tolerates_existing() {
        let mut ctx = sample_ctx().await;
        run(&Mkdir, &mut ctx, &["-p", "/docs/x/y/z"]).await.unwrap();
        assert!(ctx.vfs.is_folder("/docs/x/y/z"));
        run(&Mkdir, &mut ctx, &["-p", "/docs/x"]).await.unwrap();
    }

    #[tokio::test]
    async fn p_through_a_file_fails() {
        let mut ctx = sample_ctx().await;
        let err = run(&Mkdir, &mut ctx, &["-p", "/docs/a.txt/x"]).await.unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }

    #[tokio::test]
    async fn missing_operand() {
        let mut ctx = empty_ctx();
        assert!(matches!(
            run(&Mkdir, &mut ctx, &[]).await,
            Err(ShellError::MissingOperand)
        ));
    }
}
