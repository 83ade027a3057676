use std::path::Path;

use serde::{Deserialize, Serialize};

use converge_util::errors::ConvergeError;

/// Default file name of the rule descriptor.
pub const CONFIG_FILE: &str = "Converge.toml";

/// Rule descriptor loaded from `Converge.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvergeConfig {
    #[serde(default, rename = "dependency-convergence")]
    pub convergence: RuleConfig,
}

/// Settings from `[dependency-convergence]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Fail the build on conflicts; when `false` conflicts are only reported.
    #[serde(default = "default_fail")]
    pub fail: bool,
    /// Patterns of artifacts left out of the convergence check.
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Treat every distinct resolved instance as a different version.
    #[serde(default, rename = "unique-versions")]
    pub unique_versions: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            fail: default_fail(),
            excludes: Vec::new(),
            unique_versions: false,
        }
    }
}

fn default_fail() -> bool {
    true
}

impl ConvergeConfig {
    /// Load the descriptor at `path`, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> miette::Result<Self> {
        if path.is_file() {
            Self::from_path(path)
        } else {
            tracing::debug!("No {} found, using default rule settings", path.display());
            Ok(Self::default())
        }
    }

    /// Read and parse the descriptor at `path`.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvergeError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a descriptor from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            ConvergeError::Config {
                message: format!("Failed to parse {CONFIG_FILE}: {e}"),
            }
            .into()
        })
    }
}
