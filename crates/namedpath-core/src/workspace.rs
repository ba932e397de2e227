//! Workspace registry.
//!
//! A project is a root directory holding a `package.json` plus any number of
//! sub-packages declared through its `workspaces` field. The registry keeps
//! them in discovery order so diagnostics are reproducible from run to run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::locator::{MarkerMatcher, PACKAGE_JSON, RootMarker, dir_has_marker};
use crate::util::paths::{absolute, is_within, normalize};

/// A named, independently rooted package, or the unnamed project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Workspace {
    /// Package name; empty for the project root.
    pub name: String,
    /// Absolute root directory.
    pub root_dir: PathBuf,
}

impl Workspace {
    /// Create a workspace from a name and root directory.
    pub fn new(name: impl Into<String>, root_dir: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            root_dir: normalize(root_dir.as_ref()),
        }
    }

    /// The unnamed project-root workspace.
    pub fn project_root(root_dir: impl AsRef<Path>) -> Self {
        Self::new("", root_dir)
    }
}

/// Subset of `package.json` read during discovery.
#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    workspaces: Option<WorkspacesField>,
}

/// `workspaces` is either a list of globs or `{ "packages": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkspacesField {
    Patterns(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    fn patterns(&self) -> &[String] {
        match self {
            WorkspacesField::Patterns(p) => p,
            WorkspacesField::Object { packages } => packages,
        }
    }
}

fn read_manifest(path: &Path) -> Result<PackageManifest> {
    let content = fs::read_to_string(path).map_err(|e| Error::manifest(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| Error::manifest(path, e.to_string()))
}

/// All workspaces of one project, built once per run.
#[derive(Debug, Clone)]
pub struct WorkspaceRegistry {
    project_root: Workspace,
    members: Vec<Workspace>,
}

impl WorkspaceRegistry {
    /// Build a registry from an explicit member list.
    ///
    /// Fails with `MissingProjectRoot` if `project_root` holds no
    /// `package.json`, and with `WorkspaceOutsideProject` if a member's root
    /// does not lie under it. Duplicate names are kept; they surface as
    /// `AmbiguousWorkspace` on lookup. Relative roots are taken against the
    /// working directory.
    pub fn new(project_root: impl AsRef<Path>, members: Vec<Workspace>) -> Result<Self> {
        let project_root = project_root.as_ref();
        let root_dir = absolute(project_root)
            .map_err(|_| Error::missing_project_root(project_root.join(PACKAGE_JSON)))?;
        if !dir_has_marker(&root_dir, &RootMarker) {
            return Err(Error::missing_project_root(root_dir.join(PACKAGE_JSON)));
        }

        let members = members
            .into_iter()
            .map(|member| match absolute(&member.root_dir) {
                Ok(root_dir) => Ok(Workspace { root_dir, ..member }),
                Err(_) => Err(Error::WorkspaceOutsideProject {
                    name: member.name,
                    root_dir: member.root_dir,
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        for member in &members {
            if !is_within(&member.root_dir, &root_dir) {
                return Err(Error::WorkspaceOutsideProject {
                    name: member.name.clone(),
                    root_dir: member.root_dir.clone(),
                });
            }
        }

        Ok(Self {
            project_root: Workspace::project_root(root_dir),
            members,
        })
    }

    /// Discover the registry from the project's root `package.json`.
    ///
    /// Each `workspaces` pattern is expanded relative to the project root in
    /// declaration order; patterns starting with `!` exclude directories.
    /// Every matched directory holding a `package.json` becomes a workspace
    /// named after the manifest's `name`, or after the directory when the
    /// manifest has none.
    pub fn from_root_marker(marker_file: impl AsRef<Path>) -> Result<Self> {
        let marker_file = marker_file.as_ref();
        let marker_file =
            absolute(marker_file).map_err(|_| Error::missing_project_root(marker_file))?;
        let root_dir = marker_file
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::missing_project_root(&marker_file))?;

        let is_root_marker = marker_file.is_file()
            && marker_file
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| RootMarker.matches(&root_dir, n));
        if !is_root_marker {
            return Err(Error::missing_project_root(&marker_file));
        }

        let manifest = read_manifest(&marker_file)?;
        let patterns = manifest
            .workspaces
            .as_ref()
            .map(WorkspacesField::patterns)
            .unwrap_or_default();

        let excluded = patterns
            .iter()
            .filter_map(|p| p.strip_prefix('!'))
            .map(|p| exclusion_pattern(&root_dir, p))
            .collect::<Result<Vec<_>>>()?;

        let mut members: Vec<Workspace> = Vec::new();
        for pattern in patterns.iter().filter(|p| !p.starts_with('!')) {
            for dir in expand_pattern(&root_dir, pattern)? {
                if dir == root_dir
                    || members.iter().any(|m| m.root_dir == dir)
                    || excluded.iter().any(|ex| ex.matches_path(&dir))
                {
                    continue;
                }
                let manifest_path = dir.join(PACKAGE_JSON);
                if !manifest_path.is_file() {
                    continue;
                }
                let name = read_manifest(&manifest_path)?
                    .name
                    .or_else(|| dir_name(&dir))
                    .unwrap_or_default();
                log::debug!("discovered workspace '{}' at {}", name, dir.display());
                members.push(Workspace::new(name, &dir));
            }
        }

        Self::new(root_dir, members)
    }

    /// Walk up from `start` and discover the enclosing project.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let root = find_project_root(start.as_ref())?;
        Self::from_root_marker(root.join(PACKAGE_JSON))
    }

    /// The project-root workspace.
    pub fn project_root(&self) -> &Workspace {
        &self.project_root
    }

    /// Non-root workspaces in discovery order.
    pub fn members(&self) -> &[Workspace] {
        &self.members
    }

    /// The project root followed by every member, in discovery order.
    pub fn workspaces(&self) -> impl Iterator<Item = &Workspace> {
        std::iter::once(&self.project_root).chain(self.members.iter())
    }

    /// Look up a non-root workspace by exact name.
    pub fn lookup(&self, name: &str) -> Result<&Workspace> {
        let matches: Vec<&Workspace> = self.members.iter().filter(|w| w.name == name).collect();

        match matches.as_slice() {
            [] => Err(Error::unknown_workspace(name)),
            [single] => Ok(*single),
            many => Err(Error::AmbiguousWorkspace {
                name: name.to_string(),
                matches: many.iter().map(|w| w.root_dir.clone()).collect(),
            }),
        }
    }

    /// The deepest workspace whose root contains `file`.
    ///
    /// Falls back to the project root when no member contains it.
    pub fn owning_workspace(&self, file: impl AsRef<Path>) -> &Workspace {
        let file = normalize(file.as_ref());
        self.members
            .iter()
            .filter(|w| file.starts_with(&w.root_dir))
            .max_by_key(|w| w.root_dir.components().count())
            .unwrap_or(&self.project_root)
    }
}

/// Find the project root enclosing `start`.
///
/// Prefers the nearest ancestor whose `package.json` declares `workspaces`,
/// then the nearest ancestor holding any `package.json`.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let start =
        absolute(start).map_err(|_| Error::missing_project_root(start.join(PACKAGE_JSON)))?;
    let mut nearest: Option<PathBuf> = None;

    for dir in start.ancestors() {
        let manifest_path = dir.join(PACKAGE_JSON);
        if !manifest_path.is_file() {
            continue;
        }
        let declares_workspaces = read_manifest(&manifest_path)
            .map(|m| m.workspaces.is_some())
            .unwrap_or(false);
        if declares_workspaces {
            return Ok(dir.to_path_buf());
        }
        if nearest.is_none() {
            nearest = Some(dir.to_path_buf());
        }
    }

    nearest.ok_or_else(|| Error::missing_project_root(start.join(PACKAGE_JSON)))
}

/// Glob text for `pattern` under `root_dir`, with the root's own
/// metacharacters escaped.
fn rooted_pattern(root_dir: &Path, pattern: &str) -> String {
    let pattern = pattern.trim_start_matches("./").trim_end_matches('/');
    let root = glob::Pattern::escape(&root_dir.to_string_lossy());
    Path::new(&root).join(pattern).to_string_lossy().into_owned()
}

fn expand_pattern(root_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(&rooted_pattern(root_dir, pattern))
        .map_err(|e| Error::manifest(root_dir.join(PACKAGE_JSON), e.to_string()))?;

    Ok(paths
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_dir())
        .map(|path| normalize(&path))
        .collect())
}

fn exclusion_pattern(root_dir: &Path, pattern: &str) -> Result<glob::Pattern> {
    glob::Pattern::new(&rooted_pattern(root_dir, pattern))
        .map_err(|e| Error::manifest(root_dir.join(PACKAGE_JSON), e.to_string()))
}

fn dir_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}
