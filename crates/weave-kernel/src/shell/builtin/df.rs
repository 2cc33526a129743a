//! df: Report VFS usage.

use async_trait::async_trait;
use weave_types::ExecResult;

use crate::error::ShellError;
use crate::shell::{ExecContext, Tool, ToolArgs, ToolSchema};

pub struct Df;

#[async_trait]
impl Tool for Df {
    fn name(&self) -> &str {
        "df"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("df", "Show file, folder and byte counts for the filesystem")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> Result<ExecResult, ShellError> {
        let stats = ctx.vfs.stats();
        Ok(ExecResult::success(format!(
            "Filesystem      Files  Folders      Bytes  Mounted on\nweavefs    {:>10} {:>8} {:>10}  /\n",
            stats.file_count, stats.folder_count, stats.total_size
        )))
    }
}
