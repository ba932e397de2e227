//! Named-path specifier grammar.
//!
//! Productions, tried in order (first match wins):
//!
//! | Specifier              | Kind                    |
//! |------------------------|-------------------------|
//! | `~~:<rest>`            | [`SpecKind::ProjectRoot`]    |
//! | `~<name>:<rest>`       | [`SpecKind::ExplicitModule`] |
//! | `~:<rest>`             | [`SpecKind::CurrentModule`]  |
//! | `./<rest>`, `../<rest>`| [`SpecKind::Relative`]       |
//! | anything else          | [`SpecKind::CurrentModule`]  |
//!
//! Only the colon-delimited form is accepted. Slash-delimited anchors
//! (`~~/x`, `~pkg/x`) contain no colon and are rejected as invalid syntax.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The anchor a specifier is resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecKind {
    /// Relative to the directory of the source file.
    Relative,
    /// Relative to the module root of the calling workspace.
    CurrentModule,
    /// Relative to the module root of the named workspace.
    ExplicitModule(String),
    /// Relative to the project root.
    ProjectRoot,
}

/// A parsed specifier: its anchor plus the remaining relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedPathSpec {
    /// Anchor kind
    pub kind: SpecKind,
    /// Path below the anchor. For [`SpecKind::Relative`] this keeps the
    /// leading `./` or `../` segments verbatim.
    pub remainder: String,
}

impl NamedPathSpec {
    /// Build a spec from its parts.
    pub fn new(kind: SpecKind, remainder: impl Into<String>) -> Self {
        Self {
            kind,
            remainder: remainder.into(),
        }
    }

    /// Whether this spec is anchored at the source file's directory.
    pub fn is_relative(&self) -> bool {
        self.kind == SpecKind::Relative
    }
}

/// Classify a raw specifier.
///
/// # Examples
///
/// ```
/// use namedpath_core::syntax::{parse, SpecKind};
///
/// let spec = parse("~pkg-b:test.json").unwrap();
/// assert_eq!(spec.kind, SpecKind::ExplicitModule("pkg-b".to_string()));
/// assert_eq!(spec.remainder, "test.json");
///
/// assert_eq!(parse("test.json").unwrap().kind, SpecKind::CurrentModule);
/// assert!(parse("~pkg/test.json").is_err());
/// ```
pub fn parse(raw: &str) -> Result<NamedPathSpec> {
    if raw.is_empty() {
        return Err(Error::invalid_syntax(raw));
    }

    if let Some(rest) = raw.strip_prefix("~~:") {
        return Ok(NamedPathSpec::new(SpecKind::ProjectRoot, rest));
    }

    if let Some(anchored) = raw.strip_prefix('~') {
        let Some((name, rest)) = anchored.split_once(':') else {
            return Err(Error::invalid_syntax(raw));
        };
        if name.is_empty() {
            return Ok(NamedPathSpec::new(SpecKind::CurrentModule, rest));
        }
        return Ok(NamedPathSpec::new(
            SpecKind::ExplicitModule(name.to_string()),
            rest,
        ));
    }

    if raw.starts_with("./") || raw.starts_with("../") {
        return Ok(NamedPathSpec::new(SpecKind::Relative, raw));
    }

    Ok(NamedPathSpec::new(SpecKind::CurrentModule, raw))
}

impl FromStr for NamedPathSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl fmt::Display for NamedPathSpec {
    /// Canonical colon form. Implicit current-module specs render as `~:`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SpecKind::Relative => write!(f, "{}", self.remainder),
            SpecKind::CurrentModule => write!(f, "~:{}", self.remainder),
            SpecKind::ExplicitModule(name) => write!(f, "~{name}:{}", self.remainder),
            SpecKind::ProjectRoot => write!(f, "~~:{}", self.remainder),
        }
    }
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecKind::Relative => write!(f, "relative"),
            SpecKind::CurrentModule => write!(f, "current module"),
            SpecKind::ExplicitModule(name) => write!(f, "module '{name}'"),
            SpecKind::ProjectRoot => write!(f, "project root"),
        }
    }
}
