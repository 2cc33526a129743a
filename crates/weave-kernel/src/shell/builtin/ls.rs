//! ls: List directory contents.

use std::cmp::Ordering;

use async_trait::async_trait;
use weave_types::{ExecResult, Node};

use crate::error::{ShellError, VfsError};
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Ls tool: list directory contents.
pub struct Ls;

#[async_trait]
impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List directory contents")
            .param(ParamSchema::flag("a", "Show hidden entries starting with ."))
            .param(ParamSchema::flag("l", "Use long format with details"))
            .param(ParamSchema::optional("path", "Directory or file to list").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let all = args.has_flag(&["a", "all"]);
        let long = args.has_flag(&["l"]);

        let targets: Vec<String> = if args.positional.is_empty() {
            vec![".".to_string()]
        } else {
            args.positional.clone()
        };

        let mut sections = Vec::new();
        for target in &targets {
            let resolved = ctx.resolve_path(target);
            let node = ctx
                .vfs
                .get_node(&resolved)
                .ok_or_else(|| VfsError::NotFound(resolved.clone()))?;

            let entries = match node {
                Node::File(_) => vec![node],
                Node::Folder(folder) => {
                    let mut children: Vec<Node> = folder
                        .children
                        .into_iter()
                        .filter(|n| all || !n.name().starts_with('.'))
                        .collect();
                    children.sort_by(display_order);
                    children
                }
            };

            let body = if long {
                format_long(&entries, &ctx.user)
            } else {
                format_columns(&entries, ctx.columns)
            };
            if targets.len() > 1 {
                sections.push(format!("{target}:\n{body}"));
            } else {
                sections.push(body);
            }
        }
        Ok(ExecResult::success(sections.join("\n")))
    }
}

/// Folders first, then case-insensitive by name.
fn display_order(a: &Node, b: &Node) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
        .then_with(|| a.name().cmp(b.name()))
}

fn display_name(node: &Node) -> String {
    match node {
        Node::Folder(f) => format!("{}/", f.name),
        Node::File(f) => f.name.clone(),
    }
}

/// Names in columns, filled top to bottom, fitting `width`.
fn format_columns(entries: &[Node], width: usize) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let names: Vec<String> = entries.iter().map(display_name).collect();
    let one_line: usize = names.iter().map(|n| n.chars().count() + 2).sum();
    if one_line <= width {
        return format!("{}\n", names.join("  "));
    }

    let col_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 2;
    let cols = (width / col_width).max(1);
    let rows = names.len().div_ceil(cols);

    let mut out = String::new();
    for row in 0..rows {
        let mut line = String::new();
        for col in 0..cols {
            if let Some(name) = names.get(col * rows + row) {
                line.push_str(&format!("{name:<col_width$}"));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// `drwxr-xr-x  user  4096 Oct 17 12:34 name` per entry.
fn format_long(entries: &[Node], user: &str) -> String {
    let mut out = String::new();
    for node in entries {
        let (perms, links, size) = match node {
            Node::Folder(f) => ("drwxr-xr-x", f.children.len() + 2, 4096),
            Node::File(f) => ("-rw-r--r--", 1, f.size),
        };
        out.push_str(&format!(
            "{perms} {links:>3} {user:<8} {user:<8} {size:>8} {} {}\n",
            node.modified().format("%b %e %H:%M"),
            display_name(node),
        ));
    }
    out
}
