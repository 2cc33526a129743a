//! wc: Count lines, words and characters.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Wc;

#[derive(Default)]
struct Counts {
    lines: usize,
    words: usize,
    chars: usize,
}

impl Counts {
    fn of(text: &str) -> Self {
        Self {
            lines: text.lines().count(),
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }

    fn row(&self, label: &str) -> String {
        format!("{:>7} {:>7} {:>7} {label}\n", self.lines, self.words, self.chars)
    }
}

#[async_trait]
impl Tool for Wc {
    fn name(&self) -> &str {
        "wc"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("wc", "Print line, word and character counts")
            .param(ParamSchema::required("file", "File to count").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        if args.positional.is_empty() {
            return Err(ShellError::MissingOperand);
        }

        let mut out = String::new();
        let mut total = Counts::default();
        for file in &args.positional {
            let counts = Counts::of(&ctx.read_file(file)?);
            out.push_str(&counts.row(file));
            total.lines += counts.lines;
            total.words += counts.words;
            total.chars += counts.chars;
        }
        if args.positional.len() > 1 {
            out.push_str(&total.row("total"));
        }
        Ok(ExecResult::success(out))
    }
}
