use std::io;
use std::path::PathBuf;

use fs_teardown::RootBase;

use crate::cli::{BaseKind, Cli, Command};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Prepare { tree: Option<PathBuf> },
    Cleanup,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub step: Step,
    pub root: PathBuf,
    pub base: BaseKind,
}

impl RuntimeConfig {
    pub fn root_base(&self) -> io::Result<RootBase> {
        match self.base {
            BaseKind::Temp => Ok(RootBase::temp_dir()),
            BaseKind::Cwd => RootBase::working_dir(),
        }
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        match cli.command {
            Command::Prepare { root, tree, base } => Self {
                step: Step::Prepare { tree },
                root,
                base,
            },
            Command::Cleanup { root, base } => Self {
                step: Step::Cleanup,
                root,
                base,
            },
        }
    }
}
