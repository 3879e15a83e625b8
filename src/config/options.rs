use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::filesystem::FileTree;

/// Where a relative root directory is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootBase {
    /// Under the given temporary-files directory.
    TempDir(PathBuf),
    /// Under the given working directory.
    WorkingDir(PathBuf),
}

impl RootBase {
    /// The process-wide temporary directory.
    pub fn temp_dir() -> Self {
        RootBase::TempDir(env::temp_dir())
    }

    /// The current working directory of the process.
    pub fn working_dir() -> io::Result<Self> {
        env::current_dir().map(RootBase::WorkingDir)
    }

    pub fn path(&self) -> &Path {
        match self {
            RootBase::TempDir(path) | RootBase::WorkingDir(path) => path,
        }
    }
}

impl Default for RootBase {
    fn default() -> Self {
        Self::temp_dir()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeardownOptions {
    /// Absolute root, or a name resolved against `base`.
    pub root_dir: PathBuf,
    /// Tree materialized by `prepare` and restored by `reset`.
    pub paths: Option<FileTree>,
    pub base: RootBase,
}

impl TeardownOptions {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_paths(mut self, paths: FileTree) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_base(mut self, base: RootBase) -> Self {
        self.base = base;
        self
    }
}
