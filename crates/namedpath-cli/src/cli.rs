//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Resolve named paths in a multi-package project
#[derive(Parser, Debug)]
#[command(name = "namedpath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Project root directory (overrides config and discovery)
    #[arg(long, global = true)]
    pub project_root: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve specifiers as written in the given source file
    Resolve {
        /// Source file the specifiers appear in
        #[arg(long)]
        from: String,

        /// Container folder inserted below the module root
        #[arg(long)]
        container: Option<String>,

        /// Fail if any specifier cannot be resolved
        #[arg(long)]
        strict: bool,

        /// Specifiers to resolve
        #[arg(required = true)]
        specs: Vec<String>,
    },

    /// List discovered workspaces in discovery order
    Workspaces {
        /// Directory to discover the project from
        #[arg(long, default_value = ".")]
        from: String,
    },

    /// Show how specifiers are classified
    Parse {
        /// Specifiers to classify
        #[arg(required = true)]
        specs: Vec<String>,
    },
}
