//! End-to-end resolution in a two-package project, called from
//! `packages/pkg-a/src/index.ts` with the `examples` container folder.

use namedpath_core::Error;

use crate::common::TestProject;

const ORIGIN: &str = "packages/pkg-a/src/index.ts";
const CONTAINER: Option<&str> = Some("examples");

#[test]
fn test_bare_spec_uses_current_module() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, ORIGIN);

    let path = resolver.resolve(&origin, CONTAINER, "test.json").unwrap();
    assert_eq!(path.as_str(), project.slash("packages/pkg-a/examples/test.json"));
}

#[test]
fn test_explicit_module_spec() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, ORIGIN);

    let path = resolver.resolve(&origin, CONTAINER, "~pkg-b:test.json").unwrap();
    assert_eq!(path.as_str(), project.slash("packages/pkg-b/examples/test.json"));
}

#[test]
fn test_project_root_spec() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, ORIGIN);

    let path = resolver.resolve(&origin, CONTAINER, "~~:test.json").unwrap();
    assert_eq!(path.as_str(), project.slash("examples/test.json"));
}

#[test]
fn test_relative_spec_ignores_container() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, ORIGIN);

    let path = resolver.resolve(&origin, CONTAINER, "./local.json").unwrap();
    assert_eq!(path.as_str(), project.slash("packages/pkg-a/src/local.json"));
}

#[test]
fn test_unknown_workspace_spec() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, ORIGIN);

    let err = resolver
        .resolve(&origin, CONTAINER, "~nonexistent:test.json")
        .unwrap_err();
    assert_eq!(err, Error::unknown_workspace("nonexistent"));
    assert!(!err.is_fatal());
}

#[test]
fn test_missing_file_spec() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, ORIGIN);

    let err = resolver
        .resolve(&origin, CONTAINER, "~pkg-b:missing.json")
        .unwrap_err();
    assert_eq!(
        err.tried_path(),
        Some(project.slash("packages/pkg-b/examples/missing.json").as_str())
    );
}

#[test]
fn test_missing_project_root_is_fatal() {
    let project = TestProject::empty();
    let err = namedpath_core::WorkspaceRegistry::from_root_marker(project.path("package.json"))
        .unwrap_err();
    assert!(matches!(err, Error::MissingProjectRoot { .. }));
    assert!(err.is_fatal());
}
