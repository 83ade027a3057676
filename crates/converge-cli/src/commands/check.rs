//! Handler for `converge check`.

use std::path::PathBuf;

use converge_core::config::{ConvergeConfig, RuleConfig, CONFIG_FILE};
use converge_core::tree::DependencyTree;
use converge_rules::rule::{DependencyConvergence, EnforcerRule, TracingLog};
use converge_util::errors::{ConvergeError, ConvergeResult};

/// Options for `converge check`.
pub struct CheckOptions {
    pub tree: PathBuf,
    pub config: Option<PathBuf>,
    pub no_fail: bool,
    pub unique_versions: bool,
    pub excludes: Vec<String>,
}

pub fn exec(opts: &CheckOptions) -> ConvergeResult<()> {
    let descriptor = match opts.config {
        Some(ref path) => ConvergeConfig::from_path(path)?,
        None => {
            let cwd = std::env::current_dir().map_err(ConvergeError::Io)?;
            ConvergeConfig::load(&cwd.join(CONFIG_FILE))?
        }
    };
    let settings = apply_overrides(descriptor.convergence, opts);
    tracing::debug!(
        "fail={}, unique-versions={}, {} exclude pattern(s)",
        settings.fail,
        settings.unique_versions,
        settings.excludes.len()
    );

    let tree = DependencyTree::from_path(&opts.tree)?;
    let rule = DependencyConvergence::new(settings);
    let verdict = rule.evaluate(&tree, &TracingLog)?.into_result()?;

    if verdict.is_converged() {
        println!("{} rule passed ({} nodes checked)", rule.name(), tree.len());
    } else {
        println!(
            "{} rule passed with {} conflict(s) reported ({} nodes checked)",
            rule.name(),
            verdict.conflicts.len(),
            tree.len()
        );
    }
    Ok(())
}

/// Flags given on the command line win over the descriptor; excludes add up.
fn apply_overrides(mut settings: RuleConfig, opts: &CheckOptions) -> RuleConfig {
    if opts.no_fail {
        settings.fail = false;
    }
    if opts.unique_versions {
        settings.unique_versions = true;
    }
    settings.excludes.extend(opts.excludes.iter().cloned());
    settings
}
