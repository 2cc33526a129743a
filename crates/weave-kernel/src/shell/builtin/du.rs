//! du: Size of a directory's files.

use async_trait::async_trait;
use weave_types::{ExecResult, Node};

use crate::error::{ShellError, VfsError};
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Du tool: total bytes of a folder's direct file children. Subfolders
/// are not descended into.
pub struct Du;

#[async_trait]
impl Tool for Du {
    fn name(&self) -> &str {
        "du"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("du", "Show the total size of the files in a directory")
            .param(ParamSchema::optional("path", "Directory (default .)"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let target = args.get_positional(0).unwrap_or(".");
        let resolved = ctx.resolve_path(target);
        let total: u64 = match ctx.vfs.get_node(&resolved) {
            Some(Node::Folder(folder)) => folder
                .children
                .iter()
                .filter_map(Node::as_file)
                .map(|f| f.size)
                .sum(),
            Some(Node::File(file)) => file.size,
            None => return Err(VfsError::NotFound(resolved).into()),
        };
        Ok(ExecResult::success(format!("{total}\t{target}\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SOURCE;
    use crate::shell::builtin::testing::{run, sample_ctx};

    #[tokio::test]
    async fn shallow_total() {
        let mut ctx = sample_ctx().await;
        ctx.vfs.create_file("/docs/sub/deep.txt", "ignored", SOURCE).await.unwrap();
        ctx.vfs.create_file("/docs/b.txt", "1234", SOURCE).await.unwrap();
        let result = run(&Du, &mut ctx, &["/docs"]).await.unwrap();
        assert_eq!(result.out, "15\t/docs\n");
    }

    #[tokio::test]
    async fn defaults_to_cwd() {
        let mut ctx = sample_ctx().await;
        ctx.cwd = "/docs/sub".into();
        assert_eq!(run(&Du, &mut ctx, &[]).await.unwrap().out, "0\t.\n");
    }
}
