//! Lexical path utilities.
//!
//! Resolution works on an immutable snapshot of the filesystem, so paths are
//! normalized lexically (no symlink resolution) and rendered with forward
//! slashes for use in generated URLs.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root. A relative path keeps leading `..`
/// components it cannot collapse.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use namedpath_core::util::paths::normalize;
///
/// assert_eq!(normalize(Path::new("/proj/a/./b/../c")), PathBuf::from("/proj/a/c"));
/// assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
/// assert_eq!(normalize(Path::new("../x/..")), PathBuf::from(".."));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Make `path` absolute against the working directory, then normalize it.
///
/// Does not touch the filesystem beyond reading the working directory.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path).map(|p| normalize(&p))
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        rendered.into_owned()
    } else {
        rendered.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Whether `path` lies at or below `ancestor`, compared lexically.
pub fn is_within(path: &Path, ancestor: &Path) -> bool {
    normalize(path).starts_with(normalize(ancestor))
}
