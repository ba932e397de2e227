//! Subcommand handlers.
//!
//! Handlers write results to `out` and per-specifier diagnostics to `err`,
//! so they can be driven from tests as well as from `main`.

use std::io::Write;
use std::path::{Path, PathBuf};

use namedpath_core::{OriginContext, PathResolver, WorkspaceRegistry, parse};

use crate::cli::Command;
use crate::config::Config;
use crate::error::{Error, Result};

/// Dispatch a parsed subcommand.
pub fn run(command: Command, config: Config, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    match command {
        Command::Resolve {
            from,
            container,
            strict,
            specs,
        } => {
            let config = config.with_overrides(None, container, strict);
            cmd_resolve(&config, Path::new(&from), &specs, out, err)
        }
        Command::Workspaces { from } => cmd_workspaces(&config, Path::new(&from), out),
        Command::Parse { specs } => cmd_parse(&specs, out, err),
    }
}

/// Build the registry for this run.
///
/// Uses the configured project root when set, otherwise walks up from
/// `start` to find it.
pub fn load_registry(config: &Config, start: &Path) -> Result<WorkspaceRegistry> {
    let registry = match config.project_root_path() {
        Some(root) => WorkspaceRegistry::from_root_marker(root.join("package.json"))?,
        None => WorkspaceRegistry::discover(start)?,
    };
    tracing::debug!(
        root = %registry.project_root().root_dir.display(),
        members = registry.members().len(),
        "Workspace registry built"
    );
    Ok(registry)
}

/// Resolve every spec as if written in `from`.
pub fn cmd_resolve(
    config: &Config,
    from: &Path,
    specs: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let from = absolute(from)?;
    let start = from.parent().unwrap_or(from.as_path());
    let registry = load_registry(config, start)?;
    let origin = OriginContext::from_registry(&registry, &from);
    let mut resolver = PathResolver::new(registry);

    let mut failed = 0;
    for spec in specs {
        match resolver.resolve(&origin, config.container_folder.as_deref(), spec) {
            Ok(path) => writeln!(out, "{path}").map_err(|e| Error::io_with_path(e, "<stdout>"))?,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                failed += 1;
                writeln!(err, "{}: {spec}: {e}", from.display())
                    .map_err(|e| Error::io_with_path(e, "<stderr>"))?;
            }
        }
    }

    let cache = resolver.cache();
    tracing::debug!(hits = cache.hits(), misses = cache.misses(), "Resolution finished");

    if failed > 0 && config.treat_warnings_as_errors {
        return Err(Error::Unresolved {
            failed,
            total: specs.len(),
        });
    }
    Ok(())
}

/// List the registry, project root first.
pub fn cmd_workspaces(config: &Config, from: &Path, out: &mut dyn Write) -> Result<()> {
    let start = absolute(from)?;
    let registry = load_registry(config, &start)?;

    for workspace in registry.workspaces() {
        let name = if workspace.name.is_empty() {
            "(root)"
        } else {
            workspace.name.as_str()
        };
        writeln!(out, "{name}\t{}", workspace.root_dir.display())
            .map_err(|e| Error::io_with_path(e, "<stdout>"))?;
    }
    Ok(())
}

/// Print the classification of each spec.
pub fn cmd_parse(specs: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    for raw in specs {
        match parse(raw) {
            Ok(spec) => writeln!(out, "{raw}\t{}\t{}", spec.kind, spec.remainder)
                .map_err(|e| Error::io_with_path(e, "<stdout>"))?,
            Err(e) => writeln!(err, "{raw}: {e}").map_err(|e| Error::io_with_path(e, "<stderr>"))?,
        }
    }
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::io_with_path(e, path))
}
