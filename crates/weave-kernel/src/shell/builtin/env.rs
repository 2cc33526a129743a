//! env: Print the environment.

use async_trait::async_trait;
use weave_types::ExecResult;

use super::lines_out;
use crate::error::ShellError;
use crate::shell::{ExecContext, Tool, ToolArgs, ToolSchema};

pub struct Env;

#[async_trait]
impl Tool for Env {
    fn name(&self) -> &str {
        "env"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("env", "Print environment variables")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        Ok(ExecResult::success(lines_out(
            ctx.env.iter().map(|(k, v)| format!("{k}={v}")),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::builtin::testing::{empty_ctx, run};

    #[tokio::test]
    async fn lists_sorted_pairs() {
        let mut ctx = empty_ctx();
        let out = run(&Env, &mut ctx, &[]).await.unwrap().out;
        assert!(out.contains("USER=ada\n"));
        assert!(out.contains("HOME=/home/ada\n"));
        let keys: Vec<&str> = out.lines().map(|l| l.split('=').next().unwrap()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
