//! `weave.toml`: user-level REPL configuration.
//!
//! ```toml
//! user = "ada"
//! home = "/home/ada"
//! backend = "file"            # or "memory"
//! data_dir = "/srv/weave"     # file backend only
//! history_limit = 500
//! ```
//!
//! Every field is optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use weave_kernel::paths;
use weave_kernel::shell::DEFAULT_HISTORY_LIMIT;
use weave_kernel::{KernelConfig, PersistenceConfig};

/// Where the tree is kept between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub user: String,
    pub home: Option<String>,
    pub backend: Backend,
    pub data_dir: Option<PathBuf>,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: default_user(),
            home: None,
            backend: Backend::default(),
            data_dir: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn default_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "user".to_string())
}

impl Config {
    /// Default location of `weave.toml`.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "weave")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(paths::config_dir)
            .join("weave.toml")
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::data_dir)
    }

    /// Kernel configuration for an interactive session.
    pub fn kernel_config(&self) -> KernelConfig {
        let base = match self.backend {
            Backend::Memory => KernelConfig::named("repl"),
            Backend::File => KernelConfig::persistent(self.data_dir()),
        };
        let mut config = base
            .with_user(self.user.clone())
            .with_history_limit(self.history_limit);
        if let Some(home) = &self.home {
            config = config.with_home(home.clone());
        }
        config
    }

    /// Same as [`Config::kernel_config`] but never touches the host disk.
    pub fn transient_kernel_config(&self) -> KernelConfig {
        self.kernel_config()
            .with_persistence(PersistenceConfig::Memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend, Backend::File);
    }

    #[test]
    fn fields_parse() {
        let config = Config::parse(
            r#"
            user = "ada"
            home = "/u/ada"
            backend = "memory"
            history_limit = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.user, "ada");
        assert_eq!(config.backend, Backend::Memory);

        let kernel = config.kernel_config();
        assert_eq!(kernel.home_dir(), "/u/ada");
        assert_eq!(kernel.history_limit, 20);
        assert!(matches!(kernel.persistence, PersistenceConfig::Memory));
    }

    #[test]
    fn file_backend_uses_data_dir() {
        let config = Config::parse(r#"data_dir = "/srv/weave""#).unwrap();
        match config.kernel_config().persistence {
            PersistenceConfig::File { dir } => assert_eq!(dir, PathBuf::from("/srv/weave")),
            other => panic!("unexpected backend {other:?}"),
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::parse("colour = true").is_err());
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("weave.toml")).unwrap();
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }
}
