//! Declarative file tree representation and the filesystem primitives used to
//! realize it on disk.
//!
//! A [`FileTree`] maps keys to [`TreeNode`]s. Keys carry no explicit type tag,
//! so [`classify`] decides whether each entry is a file or a directory.

mod service;
mod tree;

pub use service::{CompioFilesystem, FilesystemService};
pub use tree::{EntryKind, FileTree, TreeNode, classify, extension, is_directory_key};
