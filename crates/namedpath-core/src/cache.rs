//! Per-run resolution cache.
//!
//! One `ResolutionCache` lives for one generation run. Entries are never
//! invalidated: the filesystem is treated as an immutable snapshot, so a key
//! computed once keeps its value for the rest of the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::locator::{MarkerMatcher, find_marker_dir};
use crate::resolver::ResolvedPath;
use crate::util::paths::normalize;

/// Key for memoized locator outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LocatorKey {
    start: PathBuf,
    boundary: PathBuf,
    matcher: String,
}

/// Key identifying a workspace: its name and declared root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceKey {
    name: String,
    root_dir: PathBuf,
}

impl WorkspaceKey {
    /// Build a key from a workspace name and root directory.
    pub fn new(name: &str, root_dir: &Path) -> Self {
        Self {
            name: name.to_string(),
            root_dir: normalize(root_dir),
        }
    }
}

/// Key for memoized full resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolveKey {
    source_file: PathBuf,
    project_root: PathBuf,
    workspace_root: Option<PathBuf>,
    container: Option<String>,
    spec: String,
}

impl ResolveKey {
    /// Build a key from the inputs of one resolve call.
    pub fn new(
        source_file: &Path,
        project_root: &Path,
        workspace_root: Option<&Path>,
        container: Option<&str>,
        spec: &str,
    ) -> Self {
        Self {
            source_file: normalize(source_file),
            project_root: normalize(project_root),
            workspace_root: workspace_root.map(normalize),
            container: container.map(str::to_string),
            spec: spec.to_string(),
        }
    }
}

/// Memo tables for one run.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    locator: HashMap<LocatorKey, Option<PathBuf>>,
    module_roots: HashMap<WorkspaceKey, PathBuf>,
    resolved: HashMap<ResolveKey, ResolvedPath>,
    hits: usize,
    misses: usize,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the marker-file locator, memoized on `(start, boundary, matcher)`.
    pub fn locate(
        &mut self,
        start: &Path,
        boundary: &Path,
        matcher: &dyn MarkerMatcher,
    ) -> Option<PathBuf> {
        let key = LocatorKey {
            start: normalize(start),
            boundary: normalize(boundary),
            matcher: matcher.id().to_string(),
        };

        if let Some(found) = self.locator.get(&key) {
            self.hits += 1;
            log::trace!("locator cache hit for {}", key.start.display());
            return found.clone();
        }

        self.misses += 1;
        let found = find_marker_dir(&key.start, &key.boundary, matcher);
        log::debug!(
            "located {} marker for {}: {:?}",
            key.matcher,
            key.start.display(),
            found
        );
        self.locator.insert(key, found.clone());
        found
    }

    /// Previously computed module root for a workspace.
    pub fn module_root(&mut self, key: &WorkspaceKey) -> Option<PathBuf> {
        let found = self.module_roots.get(key).cloned();
        self.record(found.is_some());
        found
    }

    /// Remember the module root for a workspace.
    pub fn insert_module_root(&mut self, key: WorkspaceKey, root: PathBuf) {
        self.module_roots.entry(key).or_insert(root);
    }

    /// Previously computed resolution.
    pub fn resolved(&mut self, key: &ResolveKey) -> Option<ResolvedPath> {
        let found = self.resolved.get(key).cloned();
        self.record(found.is_some());
        found
    }

    /// Remember a successful resolution.
    pub fn insert_resolved(&mut self, key: ResolveKey, path: ResolvedPath) {
        self.resolved.entry(key).or_insert(path);
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of lookups that had to be computed.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Total number of memoized entries.
    pub fn len(&self) -> usize {
        self.locator.len() + self.module_roots.len() + self.resolved.len()
    }

    /// Whether nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}
