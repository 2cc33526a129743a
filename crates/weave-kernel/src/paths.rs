//! Canonical VFS paths and host data directories.
//!
//! VFS paths are plain strings. A canonical path always starts with `/`,
//! has no empty, `.` or `..` segments, and no trailing slash, except the
//! root which is exactly `"/"`. Every function here is a pure string
//! transform; none of them fail.
//!
//! ```
//! use weave_kernel::paths::{normalize, resolve};
//!
//! assert_eq!(normalize("//a//b/"), "/a/b");
//! assert_eq!(resolve("../c", "/a/b"), "/a/c");
//! ```

use std::path::PathBuf;

use directories::BaseDirs;

/// The root path.
pub const ROOT: &str = "/";

/// Collapse repeated slashes and resolve `.` and `..`.
///
/// `..` above the root is absorbed. Relative input is treated as if it
/// were rooted, so the result always starts with `/`.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    if parts.is_empty() {
        ROOT.to_string()
    } else {
        let mut out = String::with_capacity(path.len() + 1);
        for part in parts {
            out.push('/');
            out.push_str(part);
        }
        out
    }
}

/// Resolve `path` against `cwd`.
///
/// Absolute paths ignore `cwd`. The empty string resolves to the root.
pub fn resolve(path: &str, cwd: &str) -> String {
    if path.is_empty() {
        ROOT.to_string()
    } else if path.starts_with('/') {
        normalize(path)
    } else {
        normalize(&format!("{cwd}/{path}"))
    }
}

/// True if `path` is the root.
pub fn is_root(path: &str) -> bool {
    normalize(path) == ROOT
}

/// Iterate over the segments of a path, skipping empty ones.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Split a canonical path into (parent, final segment).
///
/// Returns `None` for the root.
pub fn split(path: &str) -> Option<(String, String)> {
    let canonical = normalize(path);
    let (parent, name) = canonical.rsplit_once('/')?;
    if name.is_empty() {
        return None;
    }
    let parent = if parent.is_empty() { ROOT } else { parent };
    Some((parent.to_string(), name.to_string()))
}

/// Parent of a path; the root is its own parent.
pub fn parent(path: &str) -> String {
    split(path)
        .map(|(parent, _)| parent)
        .unwrap_or_else(|| ROOT.to_string())
}

/// Final segment of a path; empty for the root.
pub fn file_name(path: &str) -> String {
    split(path).map(|(_, name)| name).unwrap_or_default()
}

/// Join a name onto a directory path.
pub fn join(dir: &str, name: &str) -> String {
    normalize(&format!("{dir}/{name}"))
}

/// True if `path` equals `ancestor` or lies beneath it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    let path = normalize(path);
    let ancestor = normalize(ancestor);
    if ancestor == ROOT || path == ancestor {
        return true;
    }
    path.strip_prefix(&ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}

// ═══════════════════════════════════════════════════════════════════════════
// Host directories: where the file-backed store keeps its data
// ═══════════════════════════════════════════════════════════════════════════

/// Get the user's home directory on the host.
///
/// Returns `$HOME` or falls back to `/tmp` if not set.
pub fn host_home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

/// Get XDG data home directory.
pub fn xdg_data_home() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| host_home_dir().join(".local").join("share"))
}

/// Get XDG config home directory.
pub fn xdg_config_home() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| host_home_dir().join(".config"))
}

/// Where the file-backed store keeps the serialized tree.
pub fn data_dir() -> PathBuf {
    xdg_data_home().join("weave")
}

/// Where the REPL looks for `weave.toml`.
pub fn config_dir() -> PathBuf {
    xdg_config_home().join("weave")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_root_forms() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("///"), "/");
        assert_eq!(normalize("/.."), "/");
    }

    #[test]
    fn normalize_is_idempotent() {
        for p in ["/a/../b", "//a//b/", "./x/./y", "/../../z"] {
            let once = normalize(p);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn split_root_is_none() {
        assert_eq!(split("/"), None);
        assert_eq!(split("/a"), Some(("/".into(), "a".into())));
        assert_eq!(split("/a/b/"), Some(("/a".into(), "b".into())));
    }

    #[test]
    fn parent_and_file_name() {
        assert_eq!(parent("/a/b/c.txt"), "/a/b");
        assert_eq!(parent("/a"), "/");
        assert_eq!(parent("/"), "/");
        assert_eq!(file_name("/a/b/c.txt"), "c.txt");
        assert_eq!(file_name("/"), "");
    }

    #[test]
    fn is_within_respects_segment_boundaries() {
        assert!(is_within("/a/b", "/a"));
        assert!(is_within("/a", "/a"));
        assert!(is_within("/anything", "/"));
        assert!(!is_within("/ab", "/a"));
        assert!(!is_within("/a", "/a/b"));
    }

    #[test]
    fn weave_dirs_are_under_weave() {
        assert!(data_dir().ends_with("weave"));
        assert!(config_dir().ends_with("weave"));
    }
}
