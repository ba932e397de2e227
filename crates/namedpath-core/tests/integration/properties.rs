//! Resolution properties that hold across origins and runs.

use namedpath_core::locator::{ModuleMarker, find_marker_dir};
use namedpath_core::util::paths::{normalize, to_slash};
use namedpath_core::{Error, OriginContext, PathResolver, Workspace, WorkspaceRegistry};

use crate::common::TestProject;

// -------------------------------------------------------------------------
// Relative specifiers
// -------------------------------------------------------------------------

#[test]
fn test_relative_equals_join_with_source_dir() {
    let project = TestProject::new();
    project.write("packages/pkg-a/docs/intro.md", "");
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, "packages/pkg-a/src/index.ts");

    for container in [None, Some("examples"), Some("elsewhere")] {
        for spec in ["./local.json", "../docs/intro.md", "../../pkg-b/examples/test.json"] {
            let expected = to_slash(&normalize(&origin.source_dir().join(spec)));
            let path = resolver.resolve(&origin, container, spec).unwrap();
            assert_eq!(path.as_str(), expected, "spec {spec} container {container:?}");
        }
    }
}

// -------------------------------------------------------------------------
// Project-root specifiers
// -------------------------------------------------------------------------

#[test]
fn test_project_root_independent_of_origin() {
    let project = TestProject::new();
    let mut resolver = project.resolver();

    let results: Vec<String> = [
        "packages/pkg-a/src/index.ts",
        "packages/pkg-b/src/main.ts",
        "README.md",
    ]
    .iter()
    .map(|file| {
        let origin = project.origin(&resolver, file);
        resolver
            .resolve(&origin, Some("examples"), "~~:test.json")
            .unwrap()
            .into_string()
    })
    .collect();

    assert!(results.iter().all(|r| r == &results[0]));
    assert_eq!(results[0], project.slash("examples/test.json"));
}

// -------------------------------------------------------------------------
// Ambiguity
// -------------------------------------------------------------------------

#[test]
fn test_duplicate_names_are_ambiguous() {
    let project = TestProject::new();
    project.write("packages/pkg-c/package.json", r#"{"name": "pkg-b"}"#);
    project.write("packages/pkg-c/examples/test.json", "{}");
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, "packages/pkg-a/src/index.ts");

    let err = resolver
        .resolve(&origin, Some("examples"), "~pkg-b:test.json")
        .unwrap_err();
    assert_eq!(
        err,
        Error::AmbiguousWorkspace {
            name: "pkg-b".to_string(),
            matches: vec![project.path("packages/pkg-b"), project.path("packages/pkg-c")],
        }
    );
}

#[test]
fn test_unambiguous_name_still_resolves_with_duplicates_elsewhere() {
    let project = TestProject::new();
    project.write("packages/pkg-c/package.json", r#"{"name": "pkg-b"}"#);
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, "packages/pkg-b/src/main.ts");

    let path = resolver.resolve(&origin, Some("examples"), "~~:test.json").unwrap();
    assert_eq!(path.as_str(), project.slash("examples/test.json"));
}

// -------------------------------------------------------------------------
// Memoization
// -------------------------------------------------------------------------

#[test]
fn test_repeated_resolution_is_byte_identical() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, "packages/pkg-a/src/index.ts");

    let first = resolver.resolve(&origin, Some("examples"), "~pkg-b:test.json").unwrap();
    project.remove("packages/pkg-b/examples/test.json");
    project.remove("packages/pkg-b/package.json");
    let second = resolver.resolve(&origin, Some("examples"), "~pkg-b:test.json").unwrap();

    assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
}

#[test]
fn test_new_run_sees_filesystem_changes() {
    let project = TestProject::new();
    let mut resolver = project.resolver();
    let origin = project.origin(&resolver, "packages/pkg-a/src/index.ts");
    resolver.resolve(&origin, Some("examples"), "test.json").unwrap();

    project.remove("packages/pkg-a/examples/test.json");

    let mut next_run = project.resolver();
    let origin = project.origin(&next_run, "packages/pkg-a/src/index.ts");
    assert!(next_run.resolve(&origin, Some("examples"), "test.json").is_err());
}

// -------------------------------------------------------------------------
// Locator boundary
// -------------------------------------------------------------------------

#[test]
fn test_locator_never_matches_at_boundary() {
    let project = TestProject::new();
    let root = project.root();
    assert!(root.join("package.json").is_file());
    assert!(root.join("README.md").is_file());
    assert_eq!(find_marker_dir(&root, &root, &ModuleMarker), None);
}

#[test]
fn test_locator_finds_package_below_boundary() {
    let project = TestProject::new();
    let start = project.path("packages/pkg-a/src");
    assert_eq!(
        find_marker_dir(&start, &project.root(), &ModuleMarker),
        Some(project.path("packages/pkg-a"))
    );
}

// -------------------------------------------------------------------------
// Programmatic registries
// -------------------------------------------------------------------------

#[test]
fn test_programmatic_registry_resolves() {
    let project = TestProject::new();
    let root = project.root();
    let registry = WorkspaceRegistry::new(
        &root,
        vec![
            Workspace::new("alpha", root.join("packages/pkg-a")),
            Workspace::new("beta", root.join("packages/pkg-b")),
        ],
    )
    .unwrap();
    let mut resolver = PathResolver::new(registry);
    let origin = OriginContext::new(
        project.path("packages/pkg-a/src/index.ts"),
        Workspace::new("alpha", root.join("packages/pkg-a")),
        Workspace::project_root(&root),
    );

    let path = resolver.resolve(&origin, Some("examples"), "~beta:test.json").unwrap();
    assert_eq!(path.as_str(), project.slash("packages/pkg-b/examples/test.json"));
}
