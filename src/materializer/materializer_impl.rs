use std::io;
use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::{LocalBoxFuture, try_join_all};
use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::filesystem::{EntryKind, FileTree, FilesystemService, TreeNode, classify};
use crate::paths::resolve_from;

/// Turns a [`FileTree`] into files and directories on disk.
pub struct Materializer<'fs, F> {
    fs: &'fs F,
}

impl<'fs, F: FilesystemService> Materializer<'fs, F> {
    pub fn new(fs: &'fs F) -> Self {
        Self { fs }
    }

    /// Materializes `tree` inside `current_dir` and returns the paths this call
    /// brought into existence.
    ///
    /// For every entry only the outermost newly created path is reported, so
    /// deleting the returned paths removes exactly what was added. Entries that
    /// already existed report whatever their nested trees created.
    pub fn emit<'a>(
        &'a self,
        tree: &'a FileTree,
        current_dir: PathBuf,
    ) -> LocalBoxFuture<'a, Result<Vec<PathBuf>, MaterializeError>> {
        async move {
            self.fs
                .create_dir_all(&current_dir)
                .await
                .context(CreateDirectorySnafu { path: &current_dir })?;

            debug!(
                "Emitting {} entries into {}",
                tree.len(),
                current_dir.display()
            );

            let created = try_join_all(
                tree.iter()
                    .map(|(key, node)| self.emit_entry(&current_dir, key, node)),
            )
            .await?;

            Ok(created.into_iter().flatten().collect())
        }
        .boxed_local()
    }

    async fn emit_entry(
        &self,
        current_dir: &Path,
        key: &str,
        node: &TreeNode,
    ) -> Result<Vec<PathBuf>, MaterializeError> {
        let absolute_path = resolve_from(current_dir, [key]);
        let created = self
            .first_missing(current_dir, &absolute_path)
            .await
            .context(InspectSnafu {
                path: &absolute_path,
            })?;

        let kind = classify(key, node);
        let nested_created = match kind {
            EntryKind::Directory => {
                if matches!(node, TreeNode::Content(_)) {
                    warn!("Ignoring content declared for directory '{}'", key);
                }
                self.fs
                    .create_dir_all(&absolute_path)
                    .await
                    .context(CreateDirectorySnafu {
                        path: &absolute_path,
                    })?;
                Vec::new()
            }
            EntryKind::NestedTree(nested) => self.emit(nested, absolute_path.clone()).await?,
            EntryKind::EmptyFile | EntryKind::FileWithContent(_) => {
                if matches!(node, TreeNode::Tree(_)) {
                    warn!("Ignoring nested entries declared for file '{}'", key);
                }
                self.write_file(&absolute_path, kind).await?;
                Vec::new()
            }
        };

        Ok(match created {
            Some(path) => vec![path],
            None => nested_created,
        })
    }

    async fn write_file(&self, path: &Path, kind: EntryKind<'_>) -> Result<(), MaterializeError> {
        self.fs
            .create_file(path)
            .await
            .context(CreateFileSnafu { path })?;

        let content = match kind {
            EntryKind::FileWithContent(content) => content,
            _ => "",
        };
        self.fs
            .write_file(path, content.as_bytes())
            .await
            .context(WriteFileSnafu { path })
    }

    /// The shallowest path between `current_dir` (exclusive) and `target`
    /// (inclusive) that does not exist yet.
    async fn first_missing(
        &self,
        current_dir: &Path,
        target: &Path,
    ) -> io::Result<Option<PathBuf>> {
        let Ok(relative) = target.strip_prefix(current_dir) else {
            return Ok((!self.fs.exists(target).await?).then(|| target.to_path_buf()));
        };

        let mut candidate = current_dir.to_path_buf();
        for component in relative.components() {
            candidate.push(component);
            if !self.fs.exists(&candidate).await? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Snafu)]
pub enum MaterializeError {
    #[snafu(display("Failed to create directory {}", path.display()))]
    CreateDirectoryError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to create file {}", path.display()))]
    CreateFileError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to write file {}", path.display()))]
    WriteFileError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to inspect {}", path.display()))]
    InspectError { path: PathBuf, source: io::Error },
}

impl MaterializeError {
    pub fn path(&self) -> &Path {
        match self {
            MaterializeError::CreateDirectoryError { path, .. }
            | MaterializeError::CreateFileError { path, .. }
            | MaterializeError::WriteFileError { path, .. }
            | MaterializeError::InspectError { path, .. } => path,
        }
    }
}
