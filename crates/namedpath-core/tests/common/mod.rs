//! Common test utilities for namedpath-core integration tests.

use std::fs;
use std::path::PathBuf;

use namedpath_core::util::paths::{normalize, to_slash};
use namedpath_core::{OriginContext, PathResolver, WorkspaceRegistry};
use tempfile::TempDir;

/// A monorepo laid out under a temporary directory.
///
/// ```text
/// <root>/package.json            workspaces: ["packages/*"]
/// <root>/examples/test.json
/// <root>/packages/pkg-a/...      src/index.ts, src/local.json, examples/test.json
/// <root>/packages/pkg-b/...      examples/test.json
/// ```
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Creates the standard two-package project.
    pub fn new() -> Self {
        let project = Self::empty();
        project.write("package.json", r#"{"name": "proj", "workspaces": ["packages/*"]}"#);
        project.write("README.md", "# proj");
        project.write("examples/test.json", "{}");
        project.write("packages/pkg-a/package.json", r#"{"name": "pkg-a"}"#);
        project.write("packages/pkg-a/src/index.ts", "export {};");
        project.write("packages/pkg-a/src/local.json", "{}");
        project.write("packages/pkg-a/examples/test.json", "{}");
        project.write("packages/pkg-b/package.json", r#"{"name": "pkg-b"}"#);
        project.write("packages/pkg-b/src/main.ts", "export {};");
        project.write("packages/pkg-b/examples/test.json", "{}");
        project
    }

    /// Creates an empty temporary directory.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Writes a file relative to the project root, creating parents.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Removes a file relative to the project root.
    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.dir.path().join(rel)).unwrap();
    }

    /// Normalized project root.
    pub fn root(&self) -> PathBuf {
        normalize(self.dir.path())
    }

    /// Absolute path of a project-relative file.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Forward-slash rendering of a project-relative path.
    pub fn slash(&self, rel: &str) -> String {
        to_slash(&self.path(rel))
    }

    /// Registry discovered from the root manifest.
    pub fn registry(&self) -> WorkspaceRegistry {
        WorkspaceRegistry::from_root_marker(self.path("package.json")).unwrap()
    }

    /// Fresh resolver for one run.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.registry())
    }

    /// Origin for a project-relative source file.
    pub fn origin(&self, resolver: &PathResolver, rel: &str) -> OriginContext {
        OriginContext::from_registry(resolver.registry(), self.path(rel))
    }
}
