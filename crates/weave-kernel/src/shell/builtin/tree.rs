//! tree: Render a directory tree.

use async_trait::async_trait;
use weave_types::{ExecResult, FolderNode, Node};

use crate::error::{ShellError, VfsError};
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Tree tool: ASCII rendering in store order.
pub struct TreeTool;

#[async_trait]
impl Tool for TreeTool {
    fn name(&self) -> &str {
        "tree"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("tree", "Display a directory as a tree")
            .param(ParamSchema::optional("path", "Directory (default .)"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let target = args.get_positional(0).unwrap_or(".");
        let resolved = ctx.resolve_path(target);
        let folder = match ctx.vfs.get_node(&resolved) {
            Some(Node::Folder(folder)) => folder,
            Some(Node::File(_)) => return Err(VfsError::NotADirectory(resolved).into()),
            None => return Err(VfsError::NotFound(resolved).into()),
        };

        let mut out = format!("{target}\n");
        let mut counts = (0usize, 0usize);
        render(&folder, "", &mut out, &mut counts);
        let (dirs, files) = counts;
        out.push_str(&format!(
            "\n{dirs} {}, {files} {}\n",
            if dirs == 1 { "directory" } else { "directories" },
            if files == 1 { "file" } else { "files" },
        ));
        Ok(ExecResult::success(out))
    }
}

fn render(folder: &FolderNode, prefix: &str, out: &mut String, counts: &mut (usize, usize)) {
    let last = folder.children.len().saturating_sub(1);
    for (i, child) in folder.children.iter().enumerate() {
        let (branch, indent) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(child.name());
        out.push('\n');
        match child {
            Node::Folder(sub) => {
                counts.0 += 1;
                render(sub, &format!("{prefix}{indent}"), out, counts);
            }
            Node::File(_) => counts.1 += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SOURCE;
    use crate::shell::builtin::testing::{run, sample_ctx};

    #[tokio::test]
    async fn renders_in_store_order() {
        let mut ctx = sample_ctx().await;
        ctx.vfs.create_file("/docs/sub/deep.txt", "", SOURCE).await.unwrap();
        let result = run(&TreeTool, &mut ctx, &["/docs"]).await.unwrap();
        assert_eq!(
            result.out,
            "/docs\n\
             ├── sub\n\
             │   └── deep.txt\n\
             └── a.txt\n\
             \n\
             1 directory, 2 files\n"
        );
    }

    #[tokio::test]
    async fn file_is_rejected() {
        let mut ctx = sample_ctx().await;
        let err = run(&TreeTool, &mut ctx, &["/docs/a.txt"]).await.unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }
}
