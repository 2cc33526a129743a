//! Built-in tools.
//!
//! These are the shell's only commands; there is no external process model.

mod cat;
mod cd;
mod clear;
mod cp;
mod date;
mod df;
mod du;
mod echo;
mod env;
mod export;
mod find;
mod grep;
mod head;
mod help;
mod history;
mod ls;
mod man;
mod mkdir;
mod mv;
mod pwd;
mod rm;
mod rmdir;
mod sort;
mod tail;
mod touch;
mod tree;
mod uniq;
mod wc;
mod which;
mod whoami;

use super::ToolRegistry;

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(cat::Cat);
    registry.register(cd::Cd);
    registry.register(clear::Clear);
    registry.register(cp::Cp);
    registry.register(date::Date);
    registry.register(df::Df);
    registry.register(du::Du);
    registry.register(echo::Echo);
    registry.register(env::Env);
    registry.register(export::Export);
    registry.register(find::Find);
    registry.register(grep::Grep);
    registry.register(head::Head);
    registry.register(help::Help);
    registry.register(history::HistoryTool);
    registry.register(ls::Ls);
    registry.register(man::Man);
    registry.register(mkdir::Mkdir);
    registry.register(mv::Mv);
    registry.register(pwd::Pwd);
    registry.register(rm::Rm);
    registry.register(rmdir::Rmdir);
    registry.register(sort::Sort);
    registry.register(tail::Tail);
    registry.register(touch::Touch);
    registry.register(tree::TreeTool);
    registry.register(uniq::Uniq);
    registry.register(wc::Wc);
    registry.register(which::Which);
    registry.register(whoami::Whoami);
}

/// Join lines with a trailing newline, or nothing when empty.
fn lines_out<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Resolve the first positional as a file and read it.
fn read_single_file(
    args: &super::ToolArgs,
    ctx: &super::ExecContext,
) -> Result<String, crate::error::ShellError> {
    let path = args
        .get_positional(0)
        .ok_or(crate::error::ShellError::MissingOperand)?;
    ctx.read_file(path)
}

/// Split `cp`/`mv` operands into resolved sources and targets.
///
/// With several sources, or when the last operand is an existing folder,
/// each source lands inside that folder under its own name.
fn transfer_plan(
    args: &super::ToolArgs,
    ctx: &super::ExecContext,
) -> Result<Vec<(String, String)>, crate::error::ShellError> {
    use crate::error::{ShellError, VfsError};
    use crate::paths;

    let (dest, sources) = match args.positional.split_last() {
        None => return Err(ShellError::MissingOperand),
        Some((only, [])) => {
            return Err(ShellError::usage(format!(
                "missing destination file operand after '{only}'"
            )));
        }
        Some(split) => split,
    };

    let dest = ctx.resolve_path(dest);
    let into_folder = ctx.vfs.is_folder(&dest);
    if sources.len() > 1 && !into_folder {
        return Err(VfsError::NotADirectory(dest).into());
    }

    Ok(sources
        .iter()
        .map(|src| {
            let src = ctx.resolve_path(src);
            let target = if into_folder {
                paths::join(&dest, &paths::file_name(&src))
            } else {
                dest.clone()
            };
            (src, target)
        })
        .collect())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use weave_types::ExecResult;

    use super::super::{ExecContext, Tool, ToolArgs, ToolRegistry};
    use crate::error::ShellError;
    use crate::persist::KvPersistence;
    use crate::sync::VfsSync;
    use crate::vfs::{Tree, TreeStore};

    /// A context over an empty tree, at `/`, user `ada`.
    pub fn empty_ctx() -> ExecContext {
        ctx_over(Tree::new())
    }

    pub fn ctx_over(tree: Tree) -> ExecContext {
        let store = TreeStore::new(tree, Arc::new(KvPersistence::in_memory()));
        let mut ctx = ExecContext::new(Arc::new(VfsSync::new(Arc::new(store))), "ada", "/home/ada");
        let mut registry = ToolRegistry::new();
        super::register_builtins(&mut registry);
        ctx.tool_schemas = registry.schemas();
        ctx
    }

    /// A context with `/docs/a.txt` ("alpha\nbeta\n") and `/docs/sub/`.
    pub async fn sample_ctx() -> ExecContext {
        let ctx = empty_ctx();
        ctx.vfs.create_folder("/docs", crate::shell::SOURCE).await.unwrap();
        ctx.vfs.create_folder("/docs/sub", crate::shell::SOURCE).await.unwrap();
        ctx.vfs
            .create_file("/docs/a.txt", "alpha\nbeta\n", crate::shell::SOURCE)
            .await
            .unwrap();
        ctx
    }

    pub async fn run(
        tool: &dyn Tool,
        ctx: &mut ExecContext,
        words: &[&str],
    ) -> Result<ExecResult, ShellError> {
        tool.execute(ToolArgs::parse(words.iter().copied()), ctx).await
    }
}
