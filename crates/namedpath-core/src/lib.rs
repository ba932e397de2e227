//! Namedpath Core — named-path parsing and resolution.
//!
//! Resolves specifiers such as `~pkg-b:test.json` or `~~:README.md` into
//! verified absolute paths inside a multi-package workspace.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`locator`]: Upward marker-file search
//! - [`workspace`]: Workspace registry and discovery
//! - [`syntax`]: Specifier grammar
//! - [`resolver`]: Path resolver and origin context
//! - [`cache`]: Per-run resolution cache
//! - [`util`]: Path utilities

#![doc = include_str!("../README.md")]

pub mod cache;
pub mod error;
pub mod locator;
pub mod resolver;
pub mod syntax;
pub mod util;
pub mod workspace;

// Re-export key types at crate root for convenience
pub use cache::ResolutionCache;
pub use error::{Error, Result};
pub use locator::{MarkerMatcher, ModuleMarker, RootMarker, find_marker_dir};
pub use resolver::{OriginContext, PathResolver, ResolvedPath};
pub use syntax::{NamedPathSpec, SpecKind, parse};
pub use workspace::{Workspace, WorkspaceRegistry, find_project_root};
