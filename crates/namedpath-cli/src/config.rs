//! CLI configuration.
//!
//! Looked up in order:
//! 1. `--config` flag
//! 2. `NAMEDPATH_CONFIG` environment variable
//! 3. `namedpath.toml` in the working directory
//! 4. `<config dir>/namedpath/config.toml`
//!
//! A missing file named by step 1 or 2 is an error; otherwise a missing file
//! means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "NAMEDPATH_CONFIG";

/// Config file looked for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "namedpath.toml";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root directory. Discovered from the source file when unset.
    pub project_root: Option<String>,

    /// Folder inserted between a module root and a specifier's remainder.
    pub container_folder: Option<String>,

    /// Fail the run when any specifier cannot be resolved.
    pub treat_warnings_as_errors: bool,

    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: None,
            container_folder: None,
            treat_warnings_as_errors: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration following the lookup order.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io_with_path(e, "."))?;
        let env = std::env::var(CONFIG_ENV_VAR).ok();
        let user = dirs::config_dir().map(|d| d.join("namedpath").join("config.toml"));

        match resolve_config_path(explicit, env.as_deref(), &cwd, user.as_deref())? {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Project root with `~` expanded.
    pub fn project_root_path(&self) -> Option<PathBuf> {
        self.project_root
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        project_root: Option<String>,
        container_folder: Option<String>,
        strict: bool,
    ) -> Self {
        if project_root.is_some() {
            self.project_root = project_root;
        }
        if container_folder.is_some() {
            self.container_folder = container_folder;
        }
        self.treat_warnings_as_errors |= strict;
        self
    }
}

/// Pick the config file to read, if any.
///
/// A path given by flag or environment must exist. The local and user files
/// are used only when present.
pub fn resolve_config_path(
    explicit: Option<&str>,
    env: Option<&str>,
    cwd: &Path,
    user: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let requested = explicit
        .map(|p| ("--config", p))
        .or_else(|| env.map(|p| (CONFIG_ENV_VAR, p)));

    if let Some((source, path)) = requested {
        let path = PathBuf::from(shellexpand::tilde(path).into_owned());
        if !path.is_file() {
            return Err(Error::config(format!(
                "Config file not found: {} (from {source})",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let candidates = [Some(cwd.join(LOCAL_CONFIG_FILE)), user.map(Path::to_path_buf)];
    Ok(candidates.into_iter().flatten().find(|p| p.is_file()))
}
