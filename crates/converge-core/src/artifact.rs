use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use converge_util::errors::ConvergeError;

/// Maven-compatible dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scope {
    Compile,
    Runtime,
    Provided,
    Test,
    System,
    Import,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Provided => "provided",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        }
    }

    /// Scopes whose artifacts end up on the runtime classpath.
    pub fn is_runtime_classpath(&self) -> bool {
        matches!(self, Self::Compile | Self::Runtime)
    }
}

impl FromStr for Scope {
    type Err = ConvergeError;

    /// Parse a scope name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "provided" => Ok(Self::Provided),
            "test" => Ok(Self::Test),
            "system" => Ok(Self::System),
            "import" => Ok(Self::Import),
            _ => Err(ConvergeError::Tree {
                message: format!("unknown dependency scope '{s}'"),
            }),
        }
    }
}

impl TryFrom<String> for Scope {
    type Error = ConvergeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.as_str().to_string()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved artifact as it appears in the dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
    pub kind: String,
    pub scope: Option<Scope>,
    pub optional: bool,
}

/// The version-independent part of a coordinate.
///
/// Two artifacts are the same library when their identities are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactIdentity {
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: Option<String>,
    pub kind: String,
}

impl ArtifactCoordinate {
    /// A `jar` coordinate with no classifier, scope or optional flag.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            kind: "jar".to_string(),
            scope: None,
            optional: false,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn identity(&self) -> ArtifactIdentity {
        ArtifactIdentity {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            classifier: self.classifier.clone(),
            kind: self.kind.clone(),
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with("-SNAPSHOT") || timestamp_snapshot_base(&self.version).is_some()
    }

    /// The version with a timestamped snapshot suffix folded back to `-SNAPSHOT`.
    ///
    /// `1.0-20230101.123456-1` becomes `1.0-SNAPSHOT`; every other version is
    /// returned unchanged.
    pub fn base_version(&self) -> String {
        match timestamp_snapshot_base(&self.version) {
            Some(base) => format!("{base}-SNAPSHOT"),
            None => self.version.clone(),
        }
    }
}

/// Strip a `-yyyyMMdd.HHmmss-N` suffix, returning the part before it.
fn timestamp_snapshot_base(version: &str) -> Option<&str> {
    let (rest, build) = version.rsplit_once('-')?;
    if build.is_empty() || !build.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (base, stamp) = rest.rsplit_once('-')?;
    let (date, time) = stamp.split_once('.')?;
    let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if base.is_empty() || !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    Some(base)
}

impl fmt::Display for ArtifactCoordinate {
    /// `group:artifact:type[:classifier]:version[:scope]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.kind)?;
        if let Some(ref classifier) = self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)?;
        if let Some(scope) = self.scope {
            write!(f, ":{scope}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.kind)?;
        if let Some(ref classifier) = self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}
