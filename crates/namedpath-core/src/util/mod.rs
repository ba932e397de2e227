//! Utility modules for path handling.
//!
//! # Modules
//!
//! - [`paths`]: Lexical normalization and forward-slash rendering

pub mod paths;
