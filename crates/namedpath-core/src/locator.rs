//! Marker-file locator.
//!
//! Walks a directory upward toward a boundary directory, testing each
//! ancestor's listing against a [`MarkerMatcher`]. The boundary itself is
//! never tested: it carries the project-root marker, which uses a different
//! matcher than module markers.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use namedpath_core::locator::{find_marker_dir, ModuleMarker};
//!
//! let root = find_marker_dir(
//!     Path::new("/proj/packages/pkg-a/src"),
//!     Path::new("/proj"),
//!     &ModuleMarker,
//! );
//! assert_eq!(root.as_deref(), Some(Path::new("/proj/packages/pkg-a")));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::util::paths::normalize;

/// Package manifest filename.
pub const PACKAGE_JSON: &str = "package.json";

/// Readme filename, matched case-insensitively.
pub const README_MD: &str = "README.md";

/// Predicate deciding whether a file marks its directory as a root.
pub trait MarkerMatcher {
    /// Stable identifier, used as part of the cache key.
    fn id(&self) -> &str;

    /// Whether `file_name` inside `dir` is a marker.
    fn matches(&self, dir: &Path, file_name: &str) -> bool;
}

/// Module-root marker: `README.md` (any case) or `package.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleMarker;

impl MarkerMatcher for ModuleMarker {
    fn id(&self) -> &str {
        "module"
    }

    fn matches(&self, _dir: &Path, file_name: &str) -> bool {
        file_name == PACKAGE_JSON || file_name.eq_ignore_ascii_case(README_MD)
    }
}

/// Project-root marker: exactly `package.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootMarker;

impl MarkerMatcher for RootMarker {
    fn id(&self) -> &str {
        "root"
    }

    fn matches(&self, _dir: &Path, file_name: &str) -> bool {
        file_name == PACKAGE_JSON
    }
}

/// Find the nearest ancestor of `start` (inclusive) holding a marker file.
///
/// The search stops at `boundary` without testing it, so `start == boundary`
/// always returns `None`. A `start` outside `boundary` also returns `None`.
pub fn find_marker_dir(
    start: &Path,
    boundary: &Path,
    matcher: &dyn MarkerMatcher,
) -> Option<PathBuf> {
    let boundary = normalize(boundary);
    let mut current = normalize(start);

    if !current.starts_with(&boundary) {
        return None;
    }

    while current != boundary {
        if dir_has_marker(&current, matcher) {
            return Some(current);
        }
        if !current.pop() {
            break;
        }
    }

    None
}

/// Whether `dir`'s listing contains a file accepted by `matcher`.
///
/// Unreadable directories count as holding no marker.
pub fn dir_has_marker(dir: &Path, matcher: &dyn MarkerMatcher) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    entries.filter_map(|entry| entry.ok()).any(|entry| {
        let path = entry.path();
        path.is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| matcher.matches(dir, name))
    })
}
