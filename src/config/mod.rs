//! Construction-time configuration and loading declared trees from YAML files.

mod options;
mod tree_file;

pub use options::{RootBase, TeardownOptions};
pub use tree_file::FileTreeParseError;
