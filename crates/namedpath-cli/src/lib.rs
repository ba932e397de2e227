//! # namedpath-cli
//!
//! Command-line front end for named-path resolution.
//!
//! This crate embeds `namedpath-core` the way a documentation plugin would:
//! - Loads run configuration (container folder, severity policy)
//! - Builds the workspace registry once per run
//! - Resolves specifiers and reports diagnostics
//! - Lists workspaces and classifies specifiers for debugging

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
