//! Error types for namedpath-core.
//!
//! Per-specifier errors (`InvalidSyntax`, `UnknownWorkspace`,
//! `AmbiguousWorkspace`, `NotFound`, `ModuleRootNotFound`) are returned to the
//! caller, which attaches source location and decides severity. Errors raised
//! while building the workspace registry are fatal to the run.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for namedpath-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or resolving named paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The specifier does not match any grammar production.
    #[error("Invalid named path syntax: '{spec}'")]
    InvalidSyntax {
        /// The raw specifier as written by the user
        spec: String,
    },

    /// An explicit module reference names no registered workspace.
    #[error("Unknown workspace: '{name}'")]
    UnknownWorkspace {
        /// Workspace name from the specifier
        name: String,
    },

    /// An explicit module reference matches more than one workspace.
    #[error("Ambiguous workspace '{name}': matches {}", display_paths(.matches))]
    AmbiguousWorkspace {
        /// Workspace name from the specifier
        name: String,
        /// Root directories of every matching workspace, in discovery order
        matches: Vec<PathBuf>,
    },

    /// Resolution succeeded but the joined path does not exist on disk.
    #[error("Could not resolve path: {tried_path}")]
    NotFound {
        /// Normalized, forward-slash path that was checked
        tried_path: String,
    },

    /// No marker file was found for a workspace below the project root.
    #[error("No module root found for workspace '{workspace}' (searched from {})", .searched_from.display())]
    ModuleRootNotFound {
        /// Name of the workspace being resolved
        workspace: String,
        /// Directory the upward search started from
        searched_from: PathBuf,
    },

    /// The project root marker is missing. Fatal for the whole run.
    #[error("Missing project root marker: {}", .path.display())]
    MissingProjectRoot {
        /// Marker file or directory that was checked
        path: PathBuf,
    },

    /// A registered workspace does not live under the project root.
    #[error("Workspace '{name}' at {} is outside the project root", .root_dir.display())]
    WorkspaceOutsideProject {
        /// Workspace name
        name: String,
        /// Declared root directory
        root_dir: PathBuf,
    },

    /// A package manifest could not be read or parsed.
    #[error("Invalid package manifest {}: {message}", .path.display())]
    Manifest {
        /// Manifest file path
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Returns whether this error must abort the whole run.
    ///
    /// Registry construction failures are not attributable to a single
    /// specifier and cannot be recovered from within a run.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::MissingProjectRoot { .. } => true,
            Error::WorkspaceOutsideProject { .. } => true,
            Error::Manifest { .. } => true,
            Error::InvalidSyntax { .. } => false,
            Error::UnknownWorkspace { .. } => false,
            Error::AmbiguousWorkspace { .. } => false,
            Error::NotFound { .. } => false,
            Error::ModuleRootNotFound { .. } => false,
        }
    }

    /// Creates a new invalid-syntax error.
    pub fn invalid_syntax<S: Into<String>>(spec: S) -> Self {
        Error::InvalidSyntax { spec: spec.into() }
    }

    /// Creates a new unknown-workspace error.
    pub fn unknown_workspace<S: Into<String>>(name: S) -> Self {
        Error::UnknownWorkspace { name: name.into() }
    }

    /// Creates a new not-found error for the given tried path.
    pub fn not_found<S: Into<String>>(tried_path: S) -> Self {
        Error::NotFound {
            tried_path: tried_path.into(),
        }
    }

    /// Creates a new missing-project-root error.
    pub fn missing_project_root(path: impl AsRef<Path>) -> Self {
        Error::MissingProjectRoot {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a new manifest error.
    pub fn manifest<S: Into<String>>(path: impl AsRef<Path>, message: S) -> Self {
        Error::Manifest {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// The path that was tried, for errors that carry one.
    pub fn tried_path(&self) -> Option<&str> {
        match self {
            Error::NotFound { tried_path } => Some(tried_path),
            _ => None,
        }
    }

    /// The workspace name, for errors that carry one.
    pub fn workspace_name(&self) -> Option<&str> {
        match self {
            Error::UnknownWorkspace { name } => Some(name),
            Error::AmbiguousWorkspace { name, .. } => Some(name),
            Error::ModuleRootNotFound { workspace, .. } => Some(workspace),
            Error::WorkspaceOutsideProject { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_syntax_display() {
        let err = Error::invalid_syntax("~nocolon");
        assert_eq!(err.to_string(), "Invalid named path syntax: '~nocolon'");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_unknown_workspace_display() {
        let err = Error::unknown_workspace("nonexistent");
        assert_eq!(err.to_string(), "Unknown workspace: 'nonexistent'");
        assert_eq!(err.workspace_name(), Some("nonexistent"));
    }

    #[test]
    fn test_ambiguous_workspace_lists_matches() {
        let err = Error::AmbiguousWorkspace {
            name: "dup".to_string(),
            matches: vec![PathBuf::from("/proj/a"), PathBuf::from("/proj/b")],
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous workspace 'dup': matches /proj/a, /proj/b"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_not_found_carries_tried_path() {
        let err = Error::not_found("/proj/examples/missing.json");
        assert_eq!(err.tried_path(), Some("/proj/examples/missing.json"));
        assert_eq!(
            err.to_string(),
            "Could not resolve path: /proj/examples/missing.json"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(Error::missing_project_root("/proj/package.json").is_fatal());
        assert!(Error::manifest("/proj/package.json", "bad json").is_fatal());
        assert!(
            Error::WorkspaceOutsideProject {
                name: "x".to_string(),
                root_dir: PathBuf::from("/elsewhere"),
            }
            .is_fatal()
        );
        assert!(!Error::not_found("/x").is_fatal());
        assert!(!Error::unknown_workspace("x").is_fatal());
    }

    #[test]
    fn test_structural_errors_carry_no_path_or_name() {
        let err = Error::invalid_syntax("~");
        assert_eq!(err.tried_path(), None);
        assert_eq!(err.workspace_name(), None);
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
