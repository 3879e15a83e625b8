use std::path::{Component, Path, PathBuf};

use crate::config::RootBase;

/// Resolves root-relative segments into absolute paths under one fixed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Absolute roots are kept verbatim, relative ones are placed under `base`.
    pub fn new(root: impl AsRef<Path>, base: &RootBase) -> Self {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            resolve_from(base.path(), [root])
        };
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        resolve_from(&self.root, segments)
    }
}

/// Applies `segments` to `base` left to right, the way a shell `cd` chain would.
///
/// Empty segments are skipped and an absolute segment restarts from itself.
/// The result is normalized lexically; symlinks are not consulted.
pub fn resolve_from<I, S>(base: &Path, segments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = base.to_path_buf();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.as_os_str().is_empty() {
            continue;
        }
        joined.push(segment);
    }
    normalize_path(&joined)
}

/// Collapses `.` and `..` components. `..` never climbs above the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_) | Component::CurDir) => {}
                Some(Component::ParentDir) | None => components.push(component),
            },
            _ => components.push(component),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use rstest::*;

    fn resolver() -> PathResolver {
        PathResolver::new("/tmp/root", &RootBase::TempDir(PathBuf::from("/unused")))
    }

    #[test]
    fn absolute_root_is_kept() {
        assert_eq!(resolver().root(), Path::new("/tmp/root"));
    }

    #[test]
    fn relative_root_goes_under_temp_base() {
        let resolver = PathResolver::new("test-dir", &RootBase::TempDir("/var/tmp".into()));
        assert_eq!(resolver.root(), Path::new("/var/tmp/test-dir"));
    }

    #[test]
    fn relative_root_goes_under_working_dir_base() {
        let resolver = PathResolver::new(
            "./fixtures/../sandbox",
            &RootBase::WorkingDir("/home/user/project".into()),
        );
        assert_eq!(resolver.root(), Path::new("/home/user/project/sandbox"));
    }

    #[rstest]
    #[case(&[], "/tmp/root")]
    #[case(&["file.txt"], "/tmp/root/file.txt")]
    #[case(&["dir", "nested/file.txt"], "/tmp/root/dir/nested/file.txt")]
    #[case(&["."], "/tmp/root")]
    #[case(&["./a/./b"], "/tmp/root/a/b")]
    #[case(&["a/../b"], "/tmp/root/b")]
    #[case(&[".."], "/tmp")]
    #[case(&["../../../../.."], "/")]
    #[case(&["dir", "/etc", "hosts"], "/etc/hosts")]
    #[case(&["", "file.txt", ""], "/tmp/root/file.txt")]
    #[case(&["dir/"], "/tmp/root/dir")]
    fn resolves_segments(#[case] segments: &[&str], #[case] expected: &str) {
        assert_eq!(resolver().resolve(segments), PathBuf::from(expected));
    }

    #[rstest]
    #[case("/foo/././bar", "/foo/bar")]
    #[case("/foo/./../bar", "/bar")]
    #[case("foo/./../bar", "bar")]
    #[case("../foo", "../foo")]
    #[case("foo/..", ".")]
    #[case("./../foo", "../foo")]
    #[case("./.", ".")]
    fn normalizes_paths(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(Path::new(path)), PathBuf::from(expected));
    }
}
