//! Namedpath CLI
//!
//! Resolves named paths the way a documentation plugin would.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use namedpath_cli::cli::Cli;
use namedpath_cli::config::Config;
use namedpath_cli::{commands, logging};

fn main() -> Result<()> {
    let args = Cli::parse();

    let config = Config::load(args.config.as_deref())?.with_overrides(
        args.project_root.clone(),
        None,
        false,
    );

    logging::init(&config.log_level, args.verbose);
    tracing::debug!(?config, "Configuration loaded");

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    commands::run(args.command, config, &mut stdout.lock(), &mut stderr.lock())?;

    Ok(())
}
