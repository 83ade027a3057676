//! CLI argument definitions for converge.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "converge",
    version,
    about = "Dependency convergence checks for resolved Maven dependency trees",
    long_about = "converge reports every library that a project pulls in, transitively, \
                  at more than one version, and fails the build unless told to only report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a resolved dependency tree for convergence errors
    Check {
        /// Resolved dependency tree (JSON)
        #[arg(long)]
        tree: PathBuf,
        /// Rule descriptor; defaults to Converge.toml in the current directory
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Only report conflicts, never fail
        #[arg(long)]
        no_fail: bool,
        /// Treat every distinct resolved instance as a different version
        #[arg(long)]
        unique_versions: bool,
        /// Exclude artifacts matching groupId:artifactId:type:version:scope:classifier
        #[arg(short, long = "exclude", value_name = "PATTERN")]
        excludes: Vec<String>,
    },

    /// Print a resolved dependency tree
    Tree {
        /// Resolved dependency tree (JSON)
        #[arg(long)]
        tree: PathBuf,
        /// Maximum depth
        #[arg(long)]
        depth: Option<u32>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
