use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::ext::AsyncTryFrom;
use crate::filesystem::{FileTree, TreeNode};

impl FileTree {
    /// Loads a declared tree from a YAML file.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, FileTreeParseError> {
        FileTree::async_try_from(path.as_ref()).await
    }

    fn from_yaml_mapping(
        mapping: &LinkedHashMap<Yaml, Yaml>,
        parent: &str,
    ) -> Result<Self, FileTreeParseError> {
        let mut tree = FileTree::new();
        for (key, value) in mapping {
            let key = scalar_text(key).context(InvalidKeySnafu {
                parent: parent.to_string(),
            })?;
            let path = join_key(parent, &key);
            let node = match value {
                Yaml::Mapping(nested) => TreeNode::Tree(Self::from_yaml_mapping(nested, &path)?),
                Yaml::Value(Scalar::Null) => TreeNode::Empty,
                other => TreeNode::Content(
                    scalar_text(other).context(InvalidValueSnafu { key: path.clone() })?,
                ),
            };
            tree.insert(key, node);
        }
        Ok(tree)
    }
}

impl AsyncTryFrom<&Path> for FileTree {
    type Error = FileTreeParseError;

    async fn async_try_from(path: &Path) -> Result<Self, Self::Error> {
        debug!("Reading tree file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu { file_path: path })?;
        debug!("Successfully read tree file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu { file_path: path })?;
        contents.as_str().try_into()
    }
}

impl TryFrom<&str> for FileTree {
    type Error = FileTreeParseError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            return Ok(FileTree::new());
        };

        match document {
            Yaml::Mapping(mapping) => Self::from_yaml_mapping(mapping, ""),
            Yaml::Value(Scalar::Null) => Ok(FileTree::new()),
            _ => Err(FileTreeParseError::TopLevelNotMap),
        }
    }
}

/// Text of a scalar node, `None` for anything that is not a plain scalar.
fn scalar_text(node: &Yaml) -> Option<String> {
    match node {
        Yaml::Value(Scalar::String(text)) => Some(text.to_string()),
        Yaml::Value(Scalar::Integer(value)) => Some(value.to_string()),
        Yaml::Value(Scalar::FloatingPoint(value)) => Some(value.to_string()),
        Yaml::Value(Scalar::Boolean(value)) => Some(value.to_string()),
        _ => None,
    }
}

fn join_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}/{key}")
    }
}

#[derive(Debug, Snafu)]
pub enum FileTreeParseError {
    #[snafu(display("Failed to read the tree file: {}", file_path.display()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Tree file {} is not valid UTF-8", file_path.display()))]
    EncodingError {
        file_path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the tree file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of a tree file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Keys under '{}' should be plain scalars", parent))]
    InvalidKey { parent: String },
    #[snafu(display(
        "Entry '{}' should be null, a scalar or a map of nested entries",
        key
    ))]
    InvalidValue { key: String },
}
