//! ExecResult: the result of running one shell line.

use serde::{Deserialize, Serialize};

/// Instruction to the host display, returned alongside output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Directive {
    /// Clear the terminal display.
    ClearScreen,
}

/// The result of executing a command line.
///
/// `out` is the text block to show; `err` carries the one-line,
/// command-prefixed error message when `code != 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i64,
    pub out: String,
    pub err: String,
    pub directive: Option<Directive>,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            ..Self::default()
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            err: err.into(),
            ..Self::default()
        }
    }

    /// Create a result carrying both output and errors (e.g. `cat a missing b`).
    pub fn from_output(code: i64, out: impl Into<String>, err: impl Into<String>) -> Self {
        Self {
            code,
            out: out.into(),
            err: err.into(),
            directive: None,
        }
    }

    /// Successful result asking the host to clear its display.
    pub fn clear_screen() -> Self {
        Self {
            directive: Some(Directive::ClearScreen),
            ..Self::default()
        }
    }

    /// True if the command succeeded (exit code 0).
    pub fn ok(&self) -> bool {
        self.code == 0
    }

    /// True if the host should clear its display.
    pub fn clears_screen(&self) -> bool {
        self.directive == Some(Directive::ClearScreen)
    }
}
