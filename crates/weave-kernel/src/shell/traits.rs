//! Core tool traits and types.

use std::collections::BTreeSet;

use async_trait::async_trait;
use weave_types::ExecResult;

use super::context::ExecContext;
use crate::error::ShellError;

/// Schema for a tool parameter or flag.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    /// Parameter name, or the flag letter for flags.
    pub name: String,
    pub description: String,
    pub required: bool,
    /// A `-x` switch rather than a positional value.
    pub flag: bool,
    /// Accepts one or more values.
    pub variadic: bool,
}

impl ParamSchema {
    /// A positional parameter that must be supplied.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
            flag: false,
            variadic: false,
        }
    }

    /// A positional parameter that may be omitted.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }

    /// A boolean switch, written `-<name>`.
    pub fn flag(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            flag: true,
            ..Self::required(name, description)
        }
    }

    /// Mark the parameter as repeatable.
    pub fn many(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Schema describing a tool's interface, used by `help`, `man` and `which`.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    /// Short description.
    pub description: String,
    pub params: Vec<ParamSchema>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// One-line usage, e.g. `ls [-a] [-l] [path]...`.
    pub fn synopsis(&self) -> String {
        let mut parts = vec![self.name.clone()];
        for p in &self.params {
            let mut part = if p.flag {
                format!("[-{}]", p.name)
            } else if p.required {
                format!("<{}>", p.name)
            } else {
                format!("[{}]", p.name)
            };
            if p.variadic {
                part.push_str("...");
            }
            parts.push(part);
        }
        parts.join(" ")
    }
}

/// Parsed arguments ready for tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Positional arguments in order.
    pub positional: Vec<String>,
    /// Flags from `-x` (each letter) and `--name` syntax.
    pub flags: BTreeSet<String>,
    /// Every argument as typed, for tools that parse their own.
    pub raw: Vec<String>,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort words into flags and positionals. `--` ends flag parsing; a
    /// lone `-` is positional.
    pub fn parse<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Self::new();
        let mut flags_done = false;
        for word in words {
            let word = word.into();
            args.raw.push(word.clone());
            if flags_done || word == "-" || !word.starts_with('-') {
                args.positional.push(word);
            } else if word == "--" {
                flags_done = true;
            } else if let Some(long) = word.strip_prefix("--") {
                args.flags.insert(long.to_string());
            } else {
                for c in word[1..].chars() {
                    args.flags.insert(c.to_string());
                }
            }
        }
        args
    }

    pub fn get_positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// True if any of the given spellings was passed.
    pub fn has_flag(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.flags.contains(*n))
    }
}

/// A shell builtin.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's name (used for lookup).
    fn name(&self) -> &str;

    fn schema(&self) -> ToolSchema;

    /// Run the tool. Errors are reported by the dispatcher as
    /// `<name>: <error>` with exit code 1.
    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError>;
}
