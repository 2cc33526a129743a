//! Stamps `weave --version` with the commit and build date.
//!
//! Packagers building without a checkout can preset `WEAVE_GIT_HASH` or
//! `WEAVE_BUILD_DATE` in the environment.

use std::env;
use std::path::Path;
use std::process::Command;

const HEAD: &str = "../../.git/HEAD";

fn main() {
    println!("cargo::rerun-if-env-changed=WEAVE_GIT_HASH");
    println!("cargo::rerun-if-env-changed=WEAVE_BUILD_DATE");
    if Path::new(HEAD).exists() {
        println!("cargo::rerun-if-changed={HEAD}");
    }

    let commit = preset("WEAVE_GIT_HASH")
        .or_else(short_commit)
        .unwrap_or_else(|| "unknown".into());
    let date = preset("WEAVE_BUILD_DATE")
        .unwrap_or_else(|| chrono::Utc::now().date_naive().to_string());

    println!("cargo::rustc-env=WEAVE_GIT_HASH={commit}");
    println!("cargo::rustc-env=WEAVE_BUILD_DATE={date}");
}

fn preset(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn short_commit() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let hash = String::from_utf8(out.stdout).ok()?;
    Some(hash.trim().to_owned()).filter(|h| !h.is_empty())
}
