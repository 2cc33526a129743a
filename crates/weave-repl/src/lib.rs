//! weave REPL: interactive terminal over the Weave OS shell.
//!
//! This REPL provides a line-editor front end to one [`Kernel`].
//! It handles:
//! - Meta-commands: `/help`, `/quit`, `/stats`, `/log`, `/cwd`
//! - Command execution via the kernel's [`Shell`]
//! - Tab completion and persistent line history via rustyline

pub mod config;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Editor, Helper, Highlighter, Hinter, Validator};
use tokio::runtime::Runtime;

use weave_kernel::paths;
use weave_kernel::shell::Completer as ShellCompleter;
use weave_kernel::{ExecResult, Kernel, KernelConfig, Shell};

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Entries shown by `/log` without an argument.
const DEFAULT_LOG_ENTRIES: usize = 20;

/// What the REPL should do with one line of input.
#[derive(Debug)]
pub enum Step {
    /// A shell command ran.
    Exec(ExecResult),
    /// A meta-command produced text.
    Meta(String),
    /// Leave the REPL.
    Exit,
    /// Nothing to show.
    Empty,
}

/// REPL state: the kernel, one shell session over it, and a runtime to
/// drive both.
pub struct Repl {
    kernel: Kernel,
    shell: Shell,
    runtime: Runtime,
}

impl Repl {
    /// Create a REPL over a new kernel built from `config`.
    pub fn new(config: KernelConfig) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let kernel = runtime
            .block_on(Kernel::new(config))
            .context("Failed to create kernel")?;
        let shell = kernel.shell();

        Ok(Self {
            kernel,
            shell,
            runtime,
        })
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn prompt(&self) -> String {
        self.shell.prompt()
    }

    /// A completion snapshot for the current working directory.
    pub fn completer(&self) -> ShellCompleter {
        self.shell.completer()
    }

    /// Process a single line of input.
    pub fn process_line(&mut self, line: &str) -> Step {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Step::Empty;
        }
        if trimmed.starts_with('/') {
            return self.handle_meta_command(trimmed);
        }
        if matches!(trimmed, "quit" | "exit") {
            return Step::Exit;
        }

        Step::Exec(self.runtime.block_on(self.shell.execute(trimmed)))
    }

    /// Handle a meta-command (starts with /).
    fn handle_meta_command(&mut self, cmd: &str) -> Step {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let command = parts.first().copied().unwrap_or("");

        match command {
            "/quit" | "/q" | "/exit" => Step::Exit,
            "/help" | "/h" | "/?" => Step::Meta(HELP_TEXT.trim_end().to_string()),
            "/cwd" => Step::Meta(self.shell.cwd().to_string()),
            "/stats" => {
                let stats = self.kernel.stats();
                Step::Meta(format!(
                    "Kernel: {}\nFiles: {}\nFolders: {}\nBytes: {}",
                    self.kernel.name(),
                    stats.file_count,
                    stats.folder_count,
                    stats.total_size
                ))
            }
            "/log" => {
                let n = match parts.get(1).map(|s| s.parse::<usize>()) {
                    None => DEFAULT_LOG_ENTRIES,
                    Some(Ok(n)) => n,
                    Some(Err(_)) => return Step::Meta("Usage: /log [count]".to_string()),
                };
                Step::Meta(format_log(&self.kernel, n))
            }
            _ => Step::Meta(format!(
                "Unknown command: {command}\nType /help for available commands."
            )),
        }
    }
}

/// Recent Sync operations, oldest first.
fn format_log(kernel: &Kernel, n: usize) -> String {
    let ops = kernel.vfs().recent(n);
    if ops.is_empty() {
        return "(no operations)".to_string();
    }
    let mut out = String::new();
    for op in ops {
        let _ = write!(
            out,
            "{} {:<12} {:<14} {}",
            op.timestamp.format("%H:%M:%S"),
            op.source.as_str(),
            op.kind.to_string(),
            op.path
        );
        if let Some(new_path) = &op.new_path {
            let _ = write!(out, " -> {new_path}");
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Text for stdout: the command output with a guaranteed final newline.
pub fn render_output(result: &ExecResult) -> String {
    let mut out = String::new();
    if result.clears_screen() {
        out.push_str(CLEAR_SCREEN);
    }
    out.push_str(&result.out);
    if !result.out.is_empty() && !result.out.ends_with('\n') {
        out.push('\n');
    }
    out
}

const HELP_TEXT: &str = r#"weave REPL

Meta Commands:
  /help, /?         Show this help
  /quit, /q         Exit the REPL (also: quit, exit)
  /cwd              Show current working directory
  /stats            File, folder and byte counts
  /log [count]      Recent filesystem operations

Shell:
  help              List shell commands
  man <command>     Show a command's manual
  cmd > file        Write output to a file (>> appends)
  $NAME, ${NAME}    Environment variables (see env, export)
  Tab               Complete commands and paths
"#;

/// Line-editor glue: completion from a shell snapshot.
#[derive(Helper, Highlighter, Hinter, Validator)]
struct ShellHelper {
    completer: Option<ShellCompleter>,
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some(completer) = &self.completer else {
            return Ok((pos, Vec::new()));
        };
        let completions = completer.candidates(&line[..pos]);
        let pairs = completions
            .candidates
            .into_iter()
            .map(|c| Pair {
                display: c.trim_end().to_string(),
                replacement: c,
            })
            .collect();
        Ok((completions.start, pairs))
    }
}

fn history_path() -> PathBuf {
    paths::data_dir().join("history.txt")
}

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<ShellHelper, DefaultHistory>, path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        tracing::warn!("Failed to create history directory: {}", e);
    }
    if let Err(e) = rl.save_history(path) {
        tracing::warn!("Failed to save history: {}", e);
    }
}

/// Run the interactive REPL.
pub fn run(config: KernelConfig) -> Result<()> {
    let mut repl = Repl::new(config)?;

    println!("weave v{}", env!("CARGO_PKG_VERSION"));
    println!("Type /help for commands, /quit to exit.");
    println!();

    let mut rl: Editor<ShellHelper, DefaultHistory> =
        Editor::new().context("Failed to create editor")?;
    rl.set_helper(Some(ShellHelper { completer: None }));

    let history_path = history_path();
    if let Err(e) = rl.load_history(&history_path) {
        // Not found is expected on first run
        let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
        if !is_not_found {
            tracing::warn!("Failed to load history: {}", e);
        }
    }

    loop {
        if let Some(helper) = rl.helper_mut() {
            helper.completer = Some(repl.completer());
        }

        match rl.readline(&repl.prompt()) {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::warn!("Failed to add history entry: {}", e);
                }

                match repl.process_line(&line) {
                    Step::Exec(result) => {
                        print!("{}", render_output(&result));
                        if !result.err.is_empty() {
                            eprintln!("{}", result.err);
                        }
                    }
                    Step::Meta(text) => println!("{text}"),
                    Step::Empty => {}
                    Step::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);
    Ok(())
}

/// Execute one command line and return its exit code.
pub fn run_command(config: KernelConfig, line: &str) -> Result<i64> {
    let mut repl = Repl::new(config)?;
    match repl.process_line(line) {
        Step::Exec(result) => {
            print!("{}", render_output(&result));
            if !result.err.is_empty() {
                eprintln!("{}", result.err);
            }
            Ok(result.code)
        }
        Step::Meta(text) => {
            println!("{text}");
            Ok(0)
        }
        Step::Exit | Step::Empty => Ok(0),
    }
}
