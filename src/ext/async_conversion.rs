/// Async counterpart to the standard library's `TryFrom<T>` trait.
///
/// Useful when building a value requires I/O, such as loading a
/// [`FileTree`](crate::FileTree) from a file on disk.
pub trait AsyncTryFrom<T>: Sized {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `T` to `Self`.
    async fn async_try_from(value: T) -> Result<Self, Self::Error>;
}

/// Async counterpart to `TryInto<T>`.
pub trait AsyncTryInto<T> {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `Self` to `T`.
    async fn async_try_into(self) -> Result<T, Self::Error>;
}

/// Blanket implementation for `AsyncTryInto<U>` when `U` implements `AsyncTryFrom<T>`.
impl<T, U> AsyncTryInto<U> for T
where
    U: AsyncTryFrom<T>,
{
    type Error = U::Error;

    async fn async_try_into(self) -> Result<U, Self::Error> {
        U::async_try_from(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileTree;
    use crate::config::FileTreeParseError;
    use std::path::Path;
    use tempfile::TempDir;

    #[compio::test]
    async fn async_try_into_loads_a_tree_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("tree.yaml");
        std::fs::write(&path, "dir:\n  file.txt: content\n").expect("Failed to write tree file");

        let tree: Result<FileTree, _> = path.as_path().async_try_into().await;

        assert_eq!(tree.unwrap().len(), 1);
    }

    #[compio::test]
    async fn async_try_into_forwards_errors() {
        let result: Result<FileTree, FileTreeParseError> =
            Path::new("/this/path/does/not/exist.yaml").async_try_into().await;

        assert!(matches!(result, Err(FileTreeParseError::ReadError { .. })));
    }
}
