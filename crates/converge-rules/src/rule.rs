//! The dependency convergence rule: detect, report, and apply the
//! fail/report-only policy.

use std::sync::Mutex;

use converge_core::config::RuleConfig;
use converge_core::tree::DependencyTree;
use converge_util::errors::ConvergeError;

use crate::detector::{self, ConflictGroup};
use crate::filter::ArtifactFilter;
use crate::report;

/// Name the rule reports itself under.
pub const RULE_NAME: &str = "DependencyConvergence";

/// Summary error raised when conflicts are found and the rule is set to fail.
pub const FAILURE_MESSAGE: &str =
    "Failed while enforcing duplicated versions. See above detailed error message.";

/// Leveled sink the rule writes its findings to.
pub trait RuleLog {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards rule output to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl RuleLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// Keeps every line in memory, in the order it was logged.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, message.to_string()));
    }
}

impl RuleLog for MemoryLog {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub conflicts: Vec<ConflictGroup>,
    pub should_fail: bool,
}

impl Verdict {
    pub fn is_converged(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Turn a failing verdict into the rule's summary error.
    pub fn into_result(self) -> Result<Self, ConvergeError> {
        if self.should_fail {
            Err(ConvergeError::Convergence {
                message: FAILURE_MESSAGE.to_string(),
            })
        } else {
            Ok(self)
        }
    }
}

/// A build rule run by a host against one resolved dependency tree.
///
/// Results depend on a tree that can change between runs, so hosts must
/// neither cache nor reuse them.
pub trait EnforcerRule {
    fn name(&self) -> &str;

    /// Run the rule, failing with an error when the build must stop.
    fn execute(&self, tree: &DependencyTree, log: &dyn RuleLog) -> Result<(), ConvergeError>;

    fn cache_id(&self) -> &str {
        ""
    }

    fn is_cacheable(&self) -> bool {
        false
    }

    fn is_result_valid(&self, _cached: &dyn EnforcerRule) -> bool {
        false
    }
}

/// Requires every compile/runtime dependency to resolve to one version.
#[derive(Debug, Clone, Default)]
pub struct DependencyConvergence {
    config: RuleConfig,
}

impl DependencyConvergence {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Check `tree`, logging one warning per conflict.
    ///
    /// Malformed exclude patterns fail before the tree is walked. Conflicts
    /// are always warned about; they only make the verdict fail when
    /// `fail` is set.
    pub fn evaluate(
        &self,
        tree: &DependencyTree,
        log: &dyn RuleLog,
    ) -> Result<Verdict, ConvergeError> {
        let filter = ArtifactFilter::new(self.config.excludes.as_slice())?;
        let conflicts = detector::detect(tree, &filter, self.config.unique_versions)?;

        if conflicts.is_empty() {
            return Ok(Verdict {
                conflicts,
                should_fail: false,
            });
        }

        if !self.config.fail {
            log.info(&format!("{RULE_NAME} rule is running in reporting-only mode"));
        }
        for message in report::render_all(tree, &conflicts) {
            log.warn(&message);
        }

        Ok(Verdict {
            conflicts,
            should_fail: self.config.fail,
        })
    }
}

impl EnforcerRule for DependencyConvergence {
    fn name(&self) -> &str {
        RULE_NAME
    }

    fn execute(&self, tree: &DependencyTree, log: &dyn RuleLog) -> Result<(), ConvergeError> {
        self.evaluate(tree, log)?.into_result().map(|_| ())
    }
}
