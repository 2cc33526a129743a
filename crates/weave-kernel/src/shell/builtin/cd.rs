//! cd: Change working directory.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Cd tool: change current working directory.
pub struct Cd;

#[async_trait]
impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cd", "Change current working directory").param(ParamSchema::optional(
            "path",
            "Directory to change to (default home, - for previous directory)",
        ))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let target = args.get_positional(0);

        // Handle `cd -` for previous directory
        let resolved = match target {
            Some("-") => ctx
                .get_prev_cwd()
                .map(str::to_string)
                .ok_or_else(|| ShellError::failed("OLDPWD not set"))?,
            Some(path) => ctx.require_folder(path)?,
            None => ctx.home.clone(),
        };
        if !ctx.vfs.is_folder(&resolved) {
            ctx.require_folder(&resolved)?;
        }

        ctx.set_cwd(resolved.clone());
        // For `cd -`, output the new directory (like bash)
        if target == Some("-") {
            Ok(ExecResult::success(format!("{resolved}\n")))
        } else {
            Ok(ExecResult::success(""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::{run, sample_ctx};

    #[tokio::test]
    async fn cd_subdir_and_relative() {
        let mut ctx = sample_ctx().await;
        assert!(run(&Cd, &mut ctx, &["/docs"]).await.unwrap().ok());
        assert_eq!(ctx.cwd, "/docs");
        run(&Cd, &mut ctx, &["sub"]).await.unwrap();
        assert_eq!(ctx.cwd, "/docs/sub");
        run(&Cd, &mut ctx, &["../.."]).await.unwrap();
        assert_eq!(ctx.cwd, "/");
    }

    #[tokio::test]
    async fn cd_file_fails() {
        let mut ctx = sample_ctx().await;
        let err = run(&Cd, &mut ctx, &["/docs/a.txt"]).await.unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
        assert_eq!(ctx.cwd, "/");
    }

    #[tokio::test]
    async fn cd_nonexistent() {
        let mut ctx = sample_ctx().await;
        let err = run(&Cd, &mut ctx, &["/nonexistent"]).await.unwrap_err();
        assert_eq!(err.to_string(), "/nonexistent: No such file or directory");
    }

    #[tokio::test]
    async fn cd_dash_toggles() {
        let mut ctx = sample_ctx().await;
        run(&Cd, &mut ctx, &["/docs"]).await.unwrap();
        let result = run(&Cd, &mut ctx, &["-"]).await.unwrap();
        assert_eq!(ctx.cwd, "/");
        assert_eq!(result.out, "/\n");
        run(&Cd, &mut ctx, &["-"]).await.unwrap();
        assert_eq!(ctx.cwd, "/docs");
    }

    #[tokio::test]
    async fn cd_dash_no_previous() {
        let mut ctx = sample_ctx().await;
        let err = run(&Cd, &mut ctx, &["-"]).await.unwrap_err();
        assert!(err.to_string().contains("OLDPWD not set"));
    }

    #[tokio::test]
    async fn bare_cd_goes_home() {
        let mut ctx = sample_ctx().await;
        ctx.vfs.create_folder("/home", crate::shell::SOURCE).await.unwrap();
        ctx.vfs.create_folder("/home/ada", crate::shell::SOURCE).await.unwrap();
        run(&Cd, &mut ctx, &[]).await.unwrap();
        assert_eq!(ctx.cwd, "/home/ada");
        run(&Cd, &mut ctx, &["~/.."]).await.unwrap();
        assert_eq!(ctx.cwd, "/home");
    }

    #[tokio::test]
    async fn bare_cd_without_home_fails() {
        let mut ctx = sample_ctx().await;
        assert!(run(&Cd, &mut ctx, &[]).await.is_err());
    }
}
