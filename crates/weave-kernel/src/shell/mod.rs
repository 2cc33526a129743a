//! The command shell.
//!
//! A line interpreter over the shared VFS. Each call to [`Shell::execute`]
//! runs one line through a fixed pipeline:
//!
//! ```text
//! line ─▶ history ─▶ lexer (quotes, $VARS, > >>) ─▶ ToolRegistry lookup
//!      ─▶ Tool::execute(args, &mut ExecContext) ─▶ redirection ─▶ ExecResult
//! ```
//!
//! Bad input never escapes as an error: unknown commands exit 127, lexer
//! errors exit 2, and builtin errors become `<name>: <message>` with exit 1.

mod builtin;
mod completion;
mod context;
mod history;
mod lexer;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use completion::{Completer, Completions};
pub use context::{DEFAULT_COLUMNS, ExecContext, SOURCE};
pub use history::{DEFAULT_HISTORY_LIMIT, History};
pub use lexer::{CommandLine, LexError, Redirect, parse_line};
pub use registry::ToolRegistry;
pub use traits::{ParamSchema, Tool, ToolArgs, ToolSchema};

use std::sync::Arc;

use weave_types::ExecResult;

use crate::sync::VfsSync;

/// Exit code for a command that is not a builtin.
pub const EXIT_NOT_FOUND: i64 = 127;

/// Exit code for a line that cannot be parsed.
pub const EXIT_SYNTAX: i64 = 2;

/// An interactive shell session.
pub struct Shell {
    registry: Arc<ToolRegistry>,
    ctx: ExecContext,
}

impl Shell {
    /// Create a shell with every builtin registered, starting in `home` if
    /// it exists and at `/` otherwise.
    pub fn new(vfs: Arc<VfsSync>, user: impl Into<String>, home: impl Into<String>) -> Self {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry);
        Self::with_registry(vfs, user, home, registry)
    }

    /// Create a shell with a custom tool set.
    pub fn with_registry(
        vfs: Arc<VfsSync>,
        user: impl Into<String>,
        home: impl Into<String>,
        registry: ToolRegistry,
    ) -> Self {
        let mut ctx = ExecContext::new(vfs, user, home);
        ctx.tool_schemas = registry.schemas();
        if ctx.vfs.is_folder(&ctx.home) {
            let home = ctx.home.clone();
            ctx.set_cwd(home);
            ctx.prev_cwd = None;
            ctx.env.remove("OLDPWD");
        }
        Self {
            registry: Arc::new(registry),
            ctx,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.ctx.history = History::new(limit);
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.ctx.columns = columns.max(1);
        self
    }

    pub fn cwd(&self) -> &str {
        &self.ctx.cwd
    }

    pub fn user(&self) -> &str {
        &self.ctx.user
    }

    pub fn env(&self, name: &str) -> Option<&str> {
        self.ctx.env.get(name).map(String::as_str)
    }

    pub fn vfs(&self) -> &Arc<VfsSync> {
        &self.ctx.vfs
    }

    pub fn history(&self) -> &History {
        &self.ctx.history
    }

    /// History navigation (up/down arrows).
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.ctx.history
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Prompt string: `user@weave:cwd$ ` with the home shown as `~`.
    pub fn prompt(&self) -> String {
        let cwd = &self.ctx.cwd;
        let shown = if cwd == &self.ctx.home {
            "~".to_string()
        } else if let Some(rest) = cwd.strip_prefix(&self.ctx.home)
            && rest.starts_with('/')
            && !crate::paths::is_root(&self.ctx.home)
        {
            format!("~{rest}")
        } else {
            cwd.clone()
        };
        format!("{}@weave:{}$ ", self.ctx.user, shown)
    }

    /// A completion snapshot for the current state.
    pub fn completer(&self) -> Completer {
        Completer::new(
            self.registry.names(),
            self.ctx.vfs.clone(),
            self.ctx.cwd.clone(),
            self.ctx.home.clone(),
        )
    }

    /// Missing suffix for `partial` when exactly one completion matches.
    pub fn complete(&self, partial: &str) -> Option<String> {
        self.completer().complete(partial)
    }

    /// Run one line.
    #[tracing::instrument(level = "debug", skip(self), fields(cwd = %self.ctx.cwd))]
    pub async fn execute(&mut self, line: &str) -> ExecResult {
        let line = line.trim();
        if line.is_empty() {
            return ExecResult::default();
        }
        self.ctx.history.push(line);

        let command = match parse_line(line, &self.ctx.env) {
            Ok(command) => command,
            Err(e) => return ExecResult::failure(EXIT_SYNTAX, format!("weave: {e}")),
        };
        let Some((name, words)) = command.words.split_first() else {
            return ExecResult::default();
        };

        let Some(tool) = self.registry.get(name) else {
            tracing::debug!(command = %name, "command not found");
            return ExecResult::failure(EXIT_NOT_FOUND, format!("{name}: command not found"));
        };

        let args = ToolArgs::parse(words.iter().cloned());
        let mut result = match tool.execute(args, &mut self.ctx).await {
            Ok(result) => result,
            Err(e) => ExecResult::failure(1, format!("{name}: {e}")),
        };

        if let Some(redirect) = &command.redirect {
            let out = std::mem::take(&mut result.out);
            let written = if redirect.append {
                self.ctx.append_file(&redirect.target, &out).await
            } else {
                self.ctx.write_file(&redirect.target, &out).await
            };
            if let Err(e) = written {
                result.code = 1;
                result.err = join_lines(&result.err, &format!("weave: {e}"));
            }
        }
        result
    }
}

fn join_lines(a: &str, b: &str) -> String {
    if a.is_empty() {
        b.to_string()
    } else {
        format!("{}\n{b}", a.trim_end_matches('\n'))
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("user", &self.ctx.user)
            .field("cwd", &self.ctx.cwd)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::KvPersistence;
    use crate::vfs::{Tree, TreeStore, seed};

    fn shell() -> Shell {
        let tree: Tree = seed::default_tree("ada", "/home/ada").unwrap();
        let store = TreeStore::new(tree, Arc::new(KvPersistence::in_memory()));
        Shell::new(Arc::new(VfsSync::new(Arc::new(store))), "ada", "/home/ada")
    }

    #[tokio::test]
    async fn starts_in_home() {
        let shell = shell();
        assert_eq!(shell.cwd(), "/home/ada");
        assert_eq!(shell.prompt(), "ada@weave:~$ ");
        assert_eq!(shell.env("PWD"), Some("/home/ada"));
    }

    #[tokio::test]
    async fn unknown_command_is_127() {
        let mut shell = shell();
        let result = shell.execute("frobnicate --now").await;
        assert_eq!(result.code, EXIT_NOT_FOUND);
        assert_eq!(result.err, "frobnicate: command not found");
    }

    #[tokio::test]
    async fn errors_are_prefixed_with_command_name() {
        let mut shell = shell();
        let result = shell.execute("cat /missing").await;
        assert!(!result.ok());
        assert_eq!(result.err, "cat: /missing: No such file or directory");
    }

    #[tokio::test]
    async fn syntax_errors_do_not_panic() {
        let mut shell = shell();
        let result = shell.execute("echo \"unterminated").await;
        assert_eq!(result.code, EXIT_SYNTAX);
        assert!(result.err.starts_with("weave: "));
    }

    #[tokio::test]
    async fn blank_line_is_a_no_op() {
        let mut shell = shell();
        let result = shell.execute("   ").await;
        assert!(result.ok());
        assert!(shell.history().is_empty());
    }

    #[tokio::test]
    async fn redirection_writes_and_appends() {
        let mut shell = shell();
        assert!(shell.execute("echo one > out.txt").await.ok());
        assert!(shell.execute("echo two >> out.txt").await.ok());
        let result = shell.execute("cat ~/out.txt").await;
        assert_eq!(result.out, "one\ntwo\n");
    }

    #[tokio::test]
    async fn redirection_into_missing_folder_fails() {
        let mut shell = shell();
        let result = shell.execute("echo x > /nope/out.txt").await;
        assert_eq!(result.code, 1);
        assert!(result.out.is_empty());
        assert!(result.err.contains("No such file or directory"));
    }

    #[tokio::test]
    async fn prompt_abbreviates_home() {
        let mut shell = shell();
        shell.execute("cd Documents").await;
        assert_eq!(shell.prompt(), "ada@weave:~/Documents$ ");
        shell.execute("cd /etc").await;
        assert_eq!(shell.prompt(), "ada@weave:/etc$ ");
    }

    #[tokio::test]
    async fn complete_uses_current_directory() {
        let mut shell = shell();
        assert_eq!(shell.complete("cd Desk").as_deref(), Some("top/"));
        shell.execute("cd /").await;
        assert_eq!(shell.complete("cd ho").as_deref(), Some("me/"));
    }
}
