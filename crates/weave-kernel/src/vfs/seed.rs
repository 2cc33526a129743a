//! The directory structure created when no saved tree exists.

use super::tree::Tree;
use crate::error::{VfsError, VfsResult};
use crate::paths;

/// Top-level folders present in every fresh tree.
pub const TOP_LEVEL: &[&str] = &["/bin", "/etc", "/home", "/tmp", "/var"];

/// Folders created inside the user's home.
pub const HOME_FOLDERS: &[&str] = &["Desktop", "Documents", "Downloads", "Pictures"];

const MOTD: &str = "Welcome to Weave OS.\nType 'help' to see the available commands.\n";

/// Build the default tree for `user` with home directory `home`.
pub fn default_tree(user: &str, home: &str) -> VfsResult<Tree> {
    let mut tree = Tree::new();
    for dir in TOP_LEVEL {
        tree.create_folder(dir)?;
    }

    let home = paths::normalize(home);
    ensure_folder(&mut tree, &home)?;
    for dir in HOME_FOLDERS {
        tree.create_folder(&paths::join(&home, dir))?;
    }

    tree.create_file("/etc/hostname", "weave\n")?;
    tree.create_file("/etc/motd", MOTD)?;
    tree.create_file(
        &paths::join(&home, "Documents/welcome.txt"),
        &format!(
            "Hello, {user}!\n\nThis is your Documents folder. Files you create here\nare saved automatically.\n"
        ),
    )?;
    tree.create_file(
        &paths::join(&home, "Desktop/notes.md"),
        "# Notes\n\n- Try `ls -l` in the terminal\n- Use `tree ~` to see your home\n",
    )?;

    tracing::info!(user, home = %home, "seeded default tree");
    Ok(tree)
}

/// Create `path` and any missing ancestors.
fn ensure_folder(tree: &mut Tree, path: &str) -> VfsResult<()> {
    let mut current = String::from(paths::ROOT);
    for segment in paths::segments(path) {
        current = paths::join(&current, segment);
        match tree.create_folder(&current) {
            Ok(()) | Err(VfsError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
