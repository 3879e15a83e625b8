use std::path::{Path, PathBuf};

use snafu::ResultExt;
use tracing::{debug, info};

use crate::config::TeardownOptions;
use crate::filesystem::{CompioFilesystem, FileTree, FilesystemService};
use crate::materializer::Materializer;
use crate::paths::PathResolver;
use crate::teardown::RuntimeLedger;
use crate::teardown::error::{
    Action, DecodeSnafu, IoSnafu, IsADirectorySnafu, Lifecycle, MaterializeSnafu, MisuseSnafu,
    NotFoundSnafu, TeardownError,
};

/// Owns one fixture root directory for the lifetime of a test suite.
///
/// Call [`prepare`](Teardown::prepare) in a suite setup hook and
/// [`cleanup`](Teardown::cleanup) in the matching teardown hook.
/// [`reset`](Teardown::reset) fits a per-test teardown hook.
pub struct Teardown<F = CompioFilesystem> {
    resolver: PathResolver,
    paths: Option<FileTree>,
    fs: F,
    ledger: RuntimeLedger,
    state: Lifecycle,
}

impl Teardown<CompioFilesystem> {
    pub fn new(options: TeardownOptions) -> Self {
        Self::with_filesystem(options, CompioFilesystem)
    }
}

impl<F: FilesystemService> Teardown<F> {
    pub fn with_filesystem(options: TeardownOptions, fs: F) -> Self {
        let resolver = PathResolver::new(&options.root_dir, &options.base);
        debug!("Teardown root resolved to {}", resolver.root().display());

        Self {
            resolver,
            paths: options.paths,
            fs,
            ledger: RuntimeLedger::new(),
            state: Lifecycle::Unprepared,
        }
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Paths created by [`create`](Teardown::create) since the last reset.
    pub fn runtime_paths(&self) -> &RuntimeLedger {
        &self.ledger
    }

    /// Creates the root directory along with the declared tree.
    pub async fn prepare(&mut self) -> Result<PathBuf, TeardownError> {
        self.ensure_state(Action::Prepare, &[Lifecycle::Unprepared])?;

        info!("Preparing {}", self.root().display());
        self.materialize_declared(Action::Prepare).await?;
        self.state = Lifecycle::Prepared;

        Ok(self.root().to_path_buf())
    }

    /// Absolute path of `segments` relative to the root.
    pub fn resolve<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        self.resolver.resolve(segments)
    }

    /// Adds `tree` to the root. Everything it creates is undone by `reset`.
    pub async fn create(&mut self, tree: &FileTree) -> Result<(), TeardownError> {
        self.ensure_state(Action::Create, &[Lifecycle::Prepared])?;

        let created = Materializer::new(&self.fs)
            .emit(tree, self.root().to_path_buf())
            .await
            .context(MaterializeSnafu {
                action: Action::Create,
            })?;

        debug!("Runtime create added {:?}", created);
        self.ledger.record(created);
        Ok(())
    }

    pub async fn read_file(&self, file_path: impl AsRef<Path>) -> Result<Vec<u8>, TeardownError> {
        let file_path = file_path.as_ref();
        self.ensure_state(Action::Read, &[Lifecycle::Prepared])?;

        let absolute_path = self.existing_file(Action::Read, file_path).await?;
        self.fs
            .read_file(&absolute_path)
            .await
            .context(IoSnafu {
                action: Action::Read,
                path: &absolute_path,
            })
    }

    /// Reads a file and decodes it as UTF-8.
    pub async fn read_file_to_string(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<String, TeardownError> {
        let file_path = file_path.as_ref();
        let bytes = self.read_file(file_path).await?;
        String::from_utf8(bytes).context(DecodeSnafu {
            action: Action::Read,
            path: file_path.display().to_string(),
        })
    }

    /// Replaces the content of an existing file.
    pub async fn edit(
        &self,
        file_path: impl AsRef<Path>,
        content: impl AsRef<str>,
    ) -> Result<(), TeardownError> {
        let file_path = file_path.as_ref();
        self.ensure_state(Action::Edit, &[Lifecycle::Prepared])?;

        let absolute_path = self.existing_file(Action::Edit, file_path).await?;
        debug!("Editing {}", absolute_path.display());
        self.fs
            .write_file(&absolute_path, content.as_ref().as_bytes())
            .await
            .context(IoSnafu {
                action: Action::Edit,
                path: &absolute_path,
            })
    }

    /// Removes a file, or a directory with all its contents.
    pub async fn remove(&self, file_path: impl AsRef<Path>) -> Result<(), TeardownError> {
        let file_path = file_path.as_ref();
        self.ensure_state(Action::Remove, &[Lifecycle::Prepared])?;

        let absolute_path = self.existing_path(Action::Remove, file_path).await?;
        debug!("Removing {}", absolute_path.display());
        self.fs
            .remove_all(&absolute_path)
            .await
            .context(IoSnafu {
                action: Action::Remove,
                path: &absolute_path,
            })
    }

    /// Brings the root back to the state right after `prepare`.
    ///
    /// Runtime-created paths are deleted, then the declared tree is written
    /// again so edited and removed declared entries get their original content.
    pub async fn reset(&mut self) -> Result<(), TeardownError> {
        self.ensure_state(Action::Reset, &[Lifecycle::Prepared])?;

        let runtime_paths = self.ledger.drain();
        info!(
            "Resetting {} ({} runtime paths)",
            self.root().display(),
            runtime_paths.len()
        );
        for path in runtime_paths {
            self.fs.remove_all(&path).await.context(IoSnafu {
                action: Action::Reset,
                path: &path,
            })?;
        }

        self.materialize_declared(Action::Reset).await
    }

    /// Deletes the root directory and everything in it.
    pub async fn cleanup(&mut self) -> Result<(), TeardownError> {
        info!("Cleaning up {}", self.root().display());
        self.fs
            .remove_all(self.resolver.root())
            .await
            .context(IoSnafu {
                action: Action::Cleanup,
                path: self.resolver.root(),
            })?;

        self.ledger.clear();
        self.state = Lifecycle::TornDown;
        Ok(())
    }

    async fn materialize_declared(&self, action: Action) -> Result<(), TeardownError> {
        match &self.paths {
            Some(tree) => Materializer::new(&self.fs)
                .emit(tree, self.root().to_path_buf())
                .await
                .map(|_| ())
                .context(MaterializeSnafu { action }),
            None => self
                .fs
                .create_dir_all(self.root())
                .await
                .context(IoSnafu {
                    action,
                    path: self.root(),
                }),
        }
    }

    fn ensure_state(&self, action: Action, allowed: &[Lifecycle]) -> Result<(), TeardownError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            MisuseSnafu {
                action,
                state: self.state,
            }
            .fail()
        }
    }

    async fn existing_path(
        &self,
        action: Action,
        file_path: &Path,
    ) -> Result<PathBuf, TeardownError> {
        let absolute_path = self.resolve([file_path]);
        let exists = self
            .fs
            .exists(&absolute_path)
            .await
            .context(IoSnafu {
                action,
                path: &absolute_path,
            })?;

        if !exists {
            return NotFoundSnafu {
                action,
                path: file_path.display().to_string(),
            }
            .fail();
        }
        Ok(absolute_path)
    }

    async fn existing_file(
        &self,
        action: Action,
        file_path: &Path,
    ) -> Result<PathBuf, TeardownError> {
        let absolute_path = self.existing_path(action, file_path).await?;
        let is_dir = self
            .fs
            .is_dir(&absolute_path)
            .await
            .context(IoSnafu {
                action,
                path: &absolute_path,
            })?;

        if is_dir {
            return IsADirectorySnafu {
                action,
                path: file_path.display().to_string(),
            }
            .fail();
        }
        Ok(absolute_path)
    }
}
