//! Disposable on-disk directory trees for test fixtures.
//!
//! A [`Teardown`] owns one root directory. It materializes a declared
//! [`FileTree`] on [`prepare`](Teardown::prepare), lets tests create, read,
//! edit and remove entries, rolls everything back on
//! [`reset`](Teardown::reset), and deletes the root on
//! [`cleanup`](Teardown::cleanup).
//!
//! ```no_run
//! use fs_teardown::{Teardown, TeardownOptions, file_tree};
//!
//! # async fn run() -> Result<(), fs_teardown::TeardownError> {
//! let mut teardown = Teardown::new(TeardownOptions::new("my-suite").with_paths(file_tree! {
//!     "package.json" => "{}",
//!     "src" => { "index.js" => null },
//! }));
//!
//! teardown.prepare().await?;
//! teardown.edit("package.json", "{\"private\": true}").await?;
//! teardown.reset().await?;
//! teardown.cleanup().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod ext;
mod filesystem;
mod materializer;
mod paths;
mod teardown;

pub use config::{FileTreeParseError, RootBase, TeardownOptions};
pub use ext::{AsyncTryFrom, AsyncTryInto};
pub use filesystem::{
    CompioFilesystem, EntryKind, FileTree, FilesystemService, TreeNode, classify, extension,
    is_directory_key,
};
pub use materializer::{MaterializeError, Materializer};
pub use paths::{PathResolver, normalize_path, resolve_from};
pub use teardown::{Action, ErrorKind, Lifecycle, RuntimeLedger, Teardown, TeardownError};
