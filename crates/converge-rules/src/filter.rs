//! Eligibility filter: which tree nodes take part in the convergence check.

use std::fmt;

use globset::{Glob, GlobMatcher};

use converge_core::artifact::ArtifactCoordinate;
use converge_util::errors::ConvergeError;

use crate::version::{MavenVersion, VersionRange};

/// Field order of an exclude pattern.
const FIELDS: [&str; 6] = ["groupId", "artifactId", "type", "version", "scope", "classifier"];

#[derive(Debug, Clone)]
enum FieldMatcher {
    Any,
    Glob { text: String, matcher: GlobMatcher },
    Range(VersionRange),
}

impl FieldMatcher {
    fn parse(field: &str, name: &str, pattern: &str) -> Result<Self, ConvergeError> {
        if field.is_empty() || field == "*" {
            return Ok(Self::Any);
        }
        if name == "version" && VersionRange::is_range_spec(field) {
            return VersionRange::parse(field)
                .map(Self::Range)
                .map_err(|e| ConvergeError::Config {
                    message: format!("invalid exclude pattern '{pattern}': {e}"),
                });
        }
        let glob = Glob::new(field).map_err(|e| ConvergeError::Config {
            message: format!("invalid exclude pattern '{pattern}': bad {name} '{field}': {e}"),
        })?;
        Ok(Self::Glob {
            text: field.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Glob { text, matcher } => text == value || matcher.is_match(value),
            Self::Range(range) => range.contains(&MavenVersion::parse(value)),
        }
    }
}

/// One `groupId:artifactId:type:version:scope:classifier` exclude pattern.
///
/// Missing trailing fields, empty fields and `*` match anything. Fields
/// accept `*` and `?` wildcards; the version field also accepts a version
/// range such as `[1.0,2.0)`.
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    source: String,
    fields: Vec<FieldMatcher>,
}

impl ExcludePattern {
    pub fn parse(pattern: &str) -> Result<Self, ConvergeError> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(ConvergeError::Config {
                message: "exclude pattern must not be empty".to_string(),
            });
        }
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() > FIELDS.len() {
            return Err(ConvergeError::Config {
                message: format!(
                    "invalid exclude pattern '{pattern}': expected at most {} fields \
                     (groupId:artifactId:type:version:scope:classifier)",
                    FIELDS.len()
                ),
            });
        }

        let fields = parts
            .iter()
            .zip(FIELDS)
            .map(|(part, name)| FieldMatcher::parse(part.trim(), name, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: trimmed.to_string(),
            fields,
        })
    }

    pub fn matches(&self, artifact: &ArtifactCoordinate) -> bool {
        let scope = artifact.scope.map(|s| s.as_str()).unwrap_or("compile");
        let values = [
            artifact.group_id.as_str(),
            artifact.artifact_id.as_str(),
            artifact.kind.as_str(),
            artifact.version.as_str(),
            scope,
            artifact.classifier.as_deref().unwrap_or(""),
        ];
        self.fields
            .iter()
            .zip(values)
            .all(|(field, value)| field.matches(value))
    }
}

impl fmt::Display for ExcludePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Decides which artifacts are checked for convergence.
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    excludes: Vec<ExcludePattern>,
}

impl ArtifactFilter {
    /// Compile the exclude patterns. Any malformed pattern fails the whole filter.
    pub fn new<S: AsRef<str>>(excludes: &[S]) -> Result<Self, ConvergeError> {
        let excludes = excludes
            .iter()
            .map(|p| ExcludePattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { excludes })
    }

    /// Compile- or runtime-scoped, not optional, and not excluded.
    pub fn is_eligible(&self, artifact: &ArtifactCoordinate) -> bool {
        let in_scope = artifact
            .scope
            .is_some_and(|scope| scope.is_runtime_classpath());
        in_scope && !artifact.optional && !self.is_excluded(artifact)
    }

    pub fn is_excluded(&self, artifact: &ArtifactCoordinate) -> bool {
        match self.excludes.iter().find(|p| p.matches(artifact)) {
            Some(pattern) => {
                tracing::trace!("{artifact} excluded by pattern '{pattern}'");
                true
            }
            None => false,
        }
    }
}
