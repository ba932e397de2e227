//! Named-path resolver.
//!
//! `PathResolver` turns an origin, an optional container folder, and a raw
//! specifier into an existence-checked absolute path. It owns the workspace
//! registry and the per-run cache; build one per generation run.
//!
//! # Example
//!
//! ```no_run
//! use namedpath_core::{OriginContext, PathResolver, WorkspaceRegistry};
//!
//! let registry = WorkspaceRegistry::from_root_marker("/proj/package.json")?;
//! let origin = OriginContext::from_registry(&registry, "/proj/packages/pkg-a/src/index.ts");
//! let mut resolver = PathResolver::new(registry);
//!
//! let path = resolver.resolve(&origin, Some("examples"), "~pkg-b:test.json")?;
//! assert_eq!(path.as_str(), "/proj/packages/pkg-b/examples/test.json");
//! # Ok::<(), namedpath_core::Error>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::cache::{ResolutionCache, ResolveKey, WorkspaceKey};
use crate::error::{Error, Result};
use crate::locator::{MarkerMatcher, ModuleMarker};
use crate::syntax::{NamedPathSpec, SpecKind, parse};
use crate::util::paths::{is_within, normalize, to_slash};
use crate::workspace::{Workspace, WorkspaceRegistry};

/// Identity of the site a specifier was written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginContext {
    source_file: PathBuf,
    owning_workspace: Option<Workspace>,
    project_root: Workspace,
}

impl OriginContext {
    /// Origin inside a known workspace.
    pub fn new(
        source_file: impl AsRef<Path>,
        owning_workspace: Workspace,
        project_root: Workspace,
    ) -> Self {
        Self {
            source_file: normalize(source_file.as_ref()),
            owning_workspace: Some(owning_workspace),
            project_root,
        }
    }

    /// Origin whose owning workspace is unknown; module roots are searched
    /// from the source file's directory instead.
    pub fn detached(source_file: impl AsRef<Path>, project_root: Workspace) -> Self {
        Self {
            source_file: normalize(source_file.as_ref()),
            owning_workspace: None,
            project_root,
        }
    }

    /// Origin for `source_file`, owned by its deepest enclosing workspace.
    pub fn from_registry(registry: &WorkspaceRegistry, source_file: impl AsRef<Path>) -> Self {
        let owner = registry.owning_workspace(source_file.as_ref()).clone();
        Self::new(source_file, owner, registry.project_root().clone())
    }

    /// Absolute path of the source file.
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// Owning workspace, if known.
    pub fn owning_workspace(&self) -> Option<&Workspace> {
        self.owning_workspace.as_ref()
    }

    /// The project-root workspace.
    pub fn project_root(&self) -> &Workspace {
        &self.project_root
    }

    /// Directory containing the source file.
    pub fn source_dir(&self) -> PathBuf {
        self.source_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.source_file.clone())
    }
}

/// A normalized, existence-checked absolute path with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(pub(crate) String);

impl ResolvedPath {
    /// The path as a forward-slash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path as a native `PathBuf`.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Consume into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolver for one generation run.
pub struct PathResolver {
    registry: WorkspaceRegistry,
    cache: ResolutionCache,
    module_marker: Box<dyn MarkerMatcher>,
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .field("module_marker", &self.module_marker.id())
            .finish()
    }
}

impl PathResolver {
    /// Create a resolver with a fresh cache and the default module marker.
    pub fn new(registry: WorkspaceRegistry) -> Self {
        Self {
            registry,
            cache: ResolutionCache::new(),
            module_marker: Box::new(ModuleMarker),
        }
    }

    /// Use a caller-provided cache.
    pub fn with_cache(mut self, cache: ResolutionCache) -> Self {
        self.cache = cache;
        self
    }

    /// Use a different matcher for module-root discovery.
    pub fn with_module_marker(mut self, matcher: impl MarkerMatcher + 'static) -> Self {
        self.module_marker = Box::new(matcher);
        self
    }

    /// The workspace registry.
    pub fn registry(&self) -> &WorkspaceRegistry {
        &self.registry
    }

    /// The run cache.
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Give the cache back to the caller at the end of a run.
    pub fn into_cache(self) -> ResolutionCache {
        self.cache
    }

    /// Resolve a raw specifier.
    ///
    /// Successful results are memoized for the rest of the run, so repeated
    /// calls with the same inputs return the same path without re-checking
    /// the filesystem. Failures are recomputed on every call.
    pub fn resolve(
        &mut self,
        origin: &OriginContext,
        container: Option<&str>,
        raw: &str,
    ) -> Result<ResolvedPath> {
        let key = ResolveKey::new(
            origin.source_file(),
            &origin.project_root().root_dir,
            origin.owning_workspace().map(|w| w.root_dir.as_path()),
            container,
            raw,
        );
        if let Some(hit) = self.cache.resolved(&key) {
            return Ok(hit);
        }

        let spec = parse(raw)?;
        let resolved = self.resolve_spec(origin, container, &spec)?;
        self.cache.insert_resolved(key, resolved.clone());
        Ok(resolved)
    }

    /// Resolve an already parsed specifier.
    pub fn resolve_spec(
        &mut self,
        origin: &OriginContext,
        container: Option<&str>,
        spec: &NamedPathSpec,
    ) -> Result<ResolvedPath> {
        let joined = if spec.is_relative() {
            origin.source_dir().join(&spec.remainder)
        } else {
            let mut joined = self.base_dir(origin, spec)?;
            if let Some(folder) = container.map(trim_slashes).filter(|f| !f.is_empty()) {
                joined.push(folder);
            }
            joined.push(spec.remainder.trim_start_matches('/'));
            joined
        };

        let normalized = normalize(&joined);
        let rendered = to_slash(&normalized);
        if !normalized.exists() {
            return Err(Error::not_found(rendered));
        }

        log::trace!("resolved '{spec}' to {rendered}");
        Ok(ResolvedPath(rendered))
    }

    /// Base directory for a non-relative spec.
    fn base_dir(&mut self, origin: &OriginContext, spec: &NamedPathSpec) -> Result<PathBuf> {
        let project_dir = origin.project_root().root_dir.clone();

        match &spec.kind {
            SpecKind::ProjectRoot => Ok(project_dir),
            SpecKind::ExplicitModule(name) => {
                let workspace = self.registry.lookup(name)?.clone();
                self.module_root(&workspace, &project_dir)
            }
            SpecKind::CurrentModule => match origin.owning_workspace() {
                Some(workspace) => self.module_root(workspace, &project_dir),
                None => {
                    let source_dir = origin.source_dir();
                    match self
                        .cache
                        .locate(&source_dir, &project_dir, self.module_marker.as_ref())
                    {
                        Some(root) => Ok(root),
                        None if is_within(&source_dir, &project_dir) => Ok(project_dir),
                        None => Err(Error::ModuleRootNotFound {
                            workspace: String::new(),
                            searched_from: source_dir,
                        }),
                    }
                }
            },
            SpecKind::Relative => Ok(origin.source_dir()),
        }
    }

    /// Module root of a workspace, searched upward from its declared root.
    ///
    /// The project-root workspace is its own module root.
    pub fn module_root(&mut self, workspace: &Workspace, project_dir: &Path) -> Result<PathBuf> {
        if normalize(&workspace.root_dir) == normalize(project_dir) {
            return Ok(normalize(project_dir));
        }

        let key = WorkspaceKey::new(&workspace.name, &workspace.root_dir);
        if let Some(root) = self.cache.module_root(&key) {
            return Ok(root);
        }

        let root = self
            .cache
            .locate(&workspace.root_dir, project_dir, self.module_marker.as_ref())
            .ok_or_else(|| Error::ModuleRootNotFound {
                workspace: workspace.name.clone(),
                searched_from: workspace.root_dir.clone(),
            })?;

        self.cache.insert_module_root(key, root.clone());
        Ok(root)
    }
}

fn trim_slashes(s: &str) -> &str {
    s.trim_matches('/')
}
