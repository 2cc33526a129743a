//! export: Set environment variables.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::lines_out;
use crate::error::ShellError;
use crate::shell::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Export;

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl Tool for Export {
    fn name(&self) -> &str {
        "export"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("export", "Set environment variables")
            .param(ParamSchema::optional("KEY=VALUE", "Assignment").many())
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        if args.raw.is_empty() {
            return Ok(ExecResult::success(lines_out(
                ctx.env.iter().map(|(k, v)| format!("declare -x {k}=\"{v}\"")),
            )));
        }

        for assignment in &args.raw {
            let (name, value) = match assignment.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (assignment.as_str(), None),
            };
            if !valid_name(name) {
                return Err(ShellError::failed(format!(
                    "`{assignment}': not a valid identifier"
                )));
            }
            match value {
                Some(value) => {
                    ctx.env.insert(name.to_string(), value.to_string());
                }
                None => {
                    ctx.env.entry(name.to_string()).or_default();
                }
            }
        }
        Ok(ExecResult::success(""))
    }
}
