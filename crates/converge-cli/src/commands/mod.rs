//! Command dispatch and handler modules.

mod check;
mod tree;

use converge_util::errors::ConvergeResult;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> ConvergeResult<()> {
    match cli.command {
        Command::Check {
            tree,
            config,
            no_fail,
            unique_versions,
            excludes,
        } => check::exec(&check::CheckOptions {
            tree,
            config,
            no_fail,
            unique_versions,
            excludes,
        }),
        Command::Tree { tree, depth } => tree::exec(&tree, depth),
    }
}
