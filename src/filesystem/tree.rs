use hashlink::LinkedHashMap;
use hashlink::linked_hash_map::Iter;

/// A single value inside a [`FileTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// An empty file or an empty directory, depending on the key.
    Empty,
    /// A file with exactly this content.
    Content(String),
    /// A directory populated with the nested tree.
    Tree(FileTree),
}

impl From<&str> for TreeNode {
    fn from(content: &str) -> Self {
        TreeNode::Content(content.to_string())
    }
}

impl From<String> for TreeNode {
    fn from(content: String) -> Self {
        TreeNode::Content(content)
    }
}

impl From<FileTree> for TreeNode {
    fn from(tree: FileTree) -> Self {
        TreeNode::Tree(tree)
    }
}

impl<T: Into<TreeNode>> From<Option<T>> for TreeNode {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(TreeNode::Empty)
    }
}

/// Declarative description of files and directories relative to some directory.
///
/// Keys are single names or relative multi-segment paths such as
/// `"dir/nested/file.txt"`. Whether a key denotes a file or a directory is
/// decided by [`classify`].
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    entries: LinkedHashMap<String, TreeNode>,
}

// Sibling order carries no meaning, so equality ignores it.
impl PartialEq for FileTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, node)| other.get(key) == Some(node))
    }
}

impl Eq for FileTree {}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous value stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TreeNode>) -> &mut Self {
        self.entries.insert(key.into(), node.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, TreeNode> {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<TreeNode>> FromIterator<(K, V)> for FileTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a FileTree {
    type Item = (&'a String, &'a TreeNode);
    type IntoIter = Iter<'a, String, TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// What the materializer has to do for one tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind<'a> {
    Directory,
    NestedTree(&'a FileTree),
    EmptyFile,
    FileWithContent(&'a str),
}

impl EntryKind<'_> {
    pub fn is_directory(&self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::NestedTree(_))
    }
}

/// Decides what a `(key, node)` pair stands for.
///
/// A key is a directory when it does not start with a dot and its last segment
/// has no extension. The node then only matters for picking between the
/// directory and file variants: content under a directory key and a nested tree
/// under a file key are both dropped.
pub fn classify<'a>(key: &str, node: &'a TreeNode) -> EntryKind<'a> {
    if is_directory_key(key) {
        match node {
            TreeNode::Tree(tree) => EntryKind::NestedTree(tree),
            _ => EntryKind::Directory,
        }
    } else {
        match node {
            TreeNode::Content(content) => EntryKind::FileWithContent(content),
            _ => EntryKind::EmptyFile,
        }
    }
}

pub fn is_directory_key(key: &str) -> bool {
    !key.starts_with('.') && extension(key).is_none()
}

/// Extension of the last segment of `key`, including the leading dot.
///
/// A segment has an extension when it holds a dot anywhere past its first
/// character, so `.eslintrc` has none while `a.` has `"."`. `..` never has one.
pub fn extension(key: &str) -> Option<&str> {
    let trimmed = key.trim_end_matches(is_separator);
    let segment = match trimmed.rfind(is_separator) {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    };
    if segment == ".." {
        return None;
    }
    match segment.rfind('.') {
        Some(index) if index > 0 => Some(&segment[index..]),
        _ => None,
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || std::path::is_separator(c)
}

/// Builds a [`FileTree`] literal.
///
/// Values are `null` for an empty entry, a `{ ... }` block for a nested tree,
/// or any single token convertible into a [`TreeNode`].
///
/// ```
/// use fs_teardown::file_tree;
///
/// let tree = file_tree! {
///     ".eslintrc" => null,
///     "src" => {
///         "main.rs" => "fn main() {}",
///     },
/// };
/// assert_eq!(tree.len(), 2);
/// ```
#[macro_export]
macro_rules! file_tree {
    (@node null) => {
        $crate::TreeNode::Empty
    };
    (@node { $($inner:tt)* }) => {
        $crate::TreeNode::Tree($crate::file_tree!($($inner)*))
    };
    (@node $value:tt) => {
        $crate::TreeNode::from($value)
    };
    () => {
        $crate::FileTree::new()
    };
    ($($key:literal => $value:tt),+ $(,)?) => {{
        let mut tree = $crate::FileTree::new();
        $(
            tree.insert($key, $crate::file_tree!(@node $value));
        )+
        tree
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("dir", true)]
    #[case("dir-empty", true)]
    #[case("dir-deeply/nested/directory", true)]
    #[case("file.txt", false)]
    #[case("dir/nested/file.txt", false)]
    #[case(".eslintrc", false)]
    #[case(".config/settings", false)]
    #[case("dir/.hidden", true)]
    #[case("archive.tar.gz", false)]
    #[case("trailing.", false)]
    #[case("version.d/file", true)]
    #[case("dir/", true)]
    #[case("..", false)]
    #[case("nested/..", true)]
    fn directory_keys_are_detected(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(is_directory_key(key), expected, "key: {key:?}");
    }

    #[rstest]
    #[case("file.txt", Some(".txt"))]
    #[case("archive.tar.gz", Some(".gz"))]
    #[case(".eslintrc", None)]
    #[case(".eslintrc.json", Some(".json"))]
    #[case("..foo", Some(".foo"))]
    #[case("a.", Some("."))]
    #[case("a.b/c", None)]
    #[case("dir/file.md/", Some(".md"))]
    #[case("", None)]
    fn extension_follows_last_segment(#[case] key: &str, #[case] expected: Option<&str>) {
        assert_eq!(extension(key), expected);
    }

    #[test]
    fn classify_covers_every_variant() {
        let nested = file_tree! { "one.txt" => "first" };

        assert_eq!(classify("dir", &TreeNode::Empty), EntryKind::Directory);
        assert_eq!(
            classify("dir", &TreeNode::Tree(nested.clone())),
            EntryKind::NestedTree(&nested)
        );
        assert_eq!(classify("file.txt", &TreeNode::Empty), EntryKind::EmptyFile);
        assert_eq!(
            classify("file.txt", &TreeNode::from("hello")),
            EntryKind::FileWithContent("hello")
        );
    }

    #[test]
    fn classify_drops_mismatched_values() {
        assert_eq!(classify("dir", &TreeNode::from("ignored")), EntryKind::Directory);
        assert_eq!(
            classify("file.txt", &TreeNode::Tree(FileTree::new())),
            EntryKind::EmptyFile
        );
    }

    #[test]
    fn empty_content_is_still_content() {
        assert_eq!(
            classify("empty.txt", &TreeNode::from("")),
            EntryKind::FileWithContent("")
        );
    }

    #[test]
    fn macro_builds_nested_trees() {
        let tree = file_tree! {
            "empty.txt" => null,
            "text.txt" => "hello world",
            "dir-nested" => {
                "one.txt" => "first",
                "two.txt" => "second",
            },
        };

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get("empty.txt"), Some(&TreeNode::Empty));
        assert_eq!(tree.get("text.txt"), Some(&TreeNode::from("hello world")));
        match tree.get("dir-nested") {
            Some(TreeNode::Tree(nested)) => {
                assert_eq!(nested.get("two.txt"), Some(&TreeNode::from("second")));
            }
            other => panic!("Expected nested tree, got {other:?}"),
        }
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut tree = FileTree::new();
        tree.insert("file.txt", "one").insert("file.txt", "two");

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("file.txt"), Some(&TreeNode::from("two")));
    }

    #[test]
    fn equality_ignores_sibling_order() {
        let first = file_tree! { "a.txt" => "a", "b" => null };
        let second = file_tree! { "b" => null, "a.txt" => "a" };

        assert_eq!(first, second);
        assert_ne!(first, file_tree! { "a.txt" => "changed", "b" => null });
    }

    #[test]
    fn collects_from_pairs() {
        let tree: FileTree = [("a.txt", Some("a")), ("b", None)].into_iter().collect();

        assert_eq!(tree.get("a.txt"), Some(&TreeNode::from("a")));
        assert_eq!(tree.get("b"), Some(&TreeNode::Empty));
    }
}
