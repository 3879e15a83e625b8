use std::io;
use std::path::{Path, PathBuf};

use compio::fs::{self, OpenOptions};
use compio::runtime::spawn_blocking;
use tracing::debug;

/// Primitive filesystem operations the teardown engine is built on.
///
/// Every operation may fail; failures are handed back unchanged.
pub trait FilesystemService {
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    async fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Creates the directory and all missing parents. Existing directories are fine.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Makes sure a file exists at `path`, creating missing parents.
    /// Content of an existing file is left untouched.
    async fn create_file(&self, path: &Path) -> io::Result<()>;

    /// Replaces the whole file content with `content`.
    async fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Deletes a file, or a directory with everything beneath it.
    /// A path that is already gone is not an error.
    async fn remove_all(&self, path: &Path) -> io::Result<()>;
}

/// [`FilesystemService`] backed by the `compio` runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompioFilesystem;

impl FilesystemService for CompioFilesystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(err) if is_missing(&err) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(fs::metadata(path).await?.is_dir())
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!("Creating directory {}", path.display());
        fs::create_dir_all(path).await
    }

    async fn create_file(&self, path: &Path) -> io::Result<()> {
        debug!("Creating file {}", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let _file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .await?;
        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        debug!("Writing {} bytes to {}", content.len(), path.display());
        fs::write(path, content.to_vec()).await.0
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn remove_all(&self, path: &Path) -> io::Result<()> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(err) if is_missing(&err) => {
                debug!("Nothing to remove at {}", path.display());
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        debug!("Removing {}", path.display());
        let result = if metadata.is_dir() {
            remove_dir_all_blocking(path.to_path_buf()).await
        } else {
            fs::remove_file(path).await
        };

        match result {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// A path below a regular file cannot exist, so `ENOTDIR` counts as missing.
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

async fn remove_dir_all_blocking(path: PathBuf) -> io::Result<()> {
    spawn_blocking(move || std::fs::remove_dir_all(path))
        .await
        .unwrap_or_else(|_| Err(io::Error::other("directory removal task panicked")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[compio::test]
    async fn create_file_builds_missing_parents() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("a/b/c.txt");

        CompioFilesystem.create_file(&path).await.unwrap();

        assert!(path.is_file());
        assert!(temp_dir.path().join("a/b").is_dir());
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[compio::test]
    async fn create_file_keeps_existing_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("keep.txt");
        std::fs::write(&path, "kept").unwrap();

        CompioFilesystem.create_file(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept");
    }

    #[compio::test]
    async fn write_file_replaces_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("file.txt");
        std::fs::write(&path, "a much longer previous content").unwrap();

        CompioFilesystem.write_file(&path, b"short").await.unwrap();

        assert_eq!(CompioFilesystem.read_file(&path).await.unwrap(), b"short");
    }

    #[compio::test]
    async fn create_dir_all_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("x/y/z");

        CompioFilesystem.create_dir_all(&path).await.unwrap();
        CompioFilesystem.create_dir_all(&path).await.unwrap();

        assert!(CompioFilesystem.is_dir(&path).await.unwrap());
    }

    #[compio::test]
    async fn exists_reports_missing_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        assert!(CompioFilesystem.exists(temp_dir.path()).await.unwrap());
        assert!(
            !CompioFilesystem
                .exists(&temp_dir.path().join("missing"))
                .await
                .unwrap()
        );
    }

    #[compio::test]
    async fn paths_below_a_file_are_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let below = file.join("child.txt");

        assert!(!CompioFilesystem.exists(&below).await.unwrap());
        CompioFilesystem.remove_all(&below).await.unwrap();
        assert!(file.is_file());
    }

    #[compio::test]
    async fn remove_all_handles_files_directories_and_missing_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        let dir = temp_dir.path().join("dir");
        std::fs::write(&file, "x").unwrap();
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested/inner.txt"), "y").unwrap();

        CompioFilesystem.remove_all(&file).await.unwrap();
        CompioFilesystem.remove_all(&dir).await.unwrap();
        CompioFilesystem
            .remove_all(&temp_dir.path().join("never-existed"))
            .await
            .unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
    }
}
