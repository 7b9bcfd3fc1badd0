//! Error taxonomy for report runs.
//!
//! Every failure carries an [`ErrorKind`]. Configuration, resource-access and
//! engine errors abort the run. Data-integrity errors are row-scoped: the
//! aggregator logs them and moves on to the next row.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ReportError> = std::result::Result<T, E>;

/// Broad class of a [`ReportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The profile, a rule reference, or the configuration file is invalid.
    Configuration,
    /// A profile, query file, or the bundled query collection could not be read.
    ResourceAccess,
    /// A result row is missing a required binding.
    DataIntegrity,
    /// The query engine rejected or failed to evaluate a rule query.
    Engine,
}

/// Errors raised while resolving, evaluating, or aggregating report rules.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A profile line names a level other than INFO, WARN, or ERROR.
    #[error("report level '{token}' on profile line {line} is not a valid reporting level")]
    InvalidLevel {
        /// The offending token, as written.
        token: String,
        /// 1-based line number in the profile.
        line: usize,
    },

    /// A profile line lacks the `<LEVEL> - <rule>` separator or a rule name.
    #[error("malformed profile line {line}: expected '<LEVEL> - <rule>', got '{text}'")]
    MalformedProfileLine {
        /// 1-based line number in the profile.
        line: usize,
        /// The raw line.
        text: String,
    },

    /// A rule requested by the profile has no query text in any source.
    #[error("no query found for rule '{0}'")]
    MissingQuery(String),

    /// A `file://` rule reference is not a valid local file URL.
    #[error("rule reference '{rule}' is not a local file URL: {message}")]
    InvalidRuleReference {
        /// The rule name as written in the profile.
        rule: String,
        /// Why the reference was rejected.
        message: String,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration in {}: {message}", .path.display())]
    InvalidConfig {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A file or bundled resource could not be read.
    #[error("cannot read {resource}: {source}")]
    ResourceAccess {
        /// Path or resource name that failed.
        resource: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bundled query collection is empty or could not be enumerated.
    #[error("cannot access report query files in {0}")]
    NoBundledQueries(String),

    /// A result row lacks a required field.
    #[error("result row for rule '{rule}' has no '{field}' binding")]
    MissingField {
        /// Rule whose query produced the row.
        rule: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The query engine failed while evaluating a rule.
    #[error("query for rule '{rule}' failed: {message}")]
    QueryFailed {
        /// Rule whose query failed.
        rule: String,
        /// Engine diagnostic.
        message: String,
    },
}

impl ReportError {
    /// Returns the class this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::InvalidLevel { .. }
            | ReportError::MalformedProfileLine { .. }
            | ReportError::MissingQuery(_)
            | ReportError::InvalidRuleReference { .. }
            | ReportError::InvalidConfig { .. } => ErrorKind::Configuration,
            ReportError::ResourceAccess { .. } | ReportError::NoBundledQueries(_) => {
                ErrorKind::ResourceAccess
            }
            ReportError::MissingField { .. } => ErrorKind::DataIntegrity,
            ReportError::QueryFailed { .. } => ErrorKind::Engine,
        }
    }

    pub(crate) fn io(resource: impl Into<String>, source: std::io::Error) -> Self {
        ReportError::ResourceAccess {
            resource: resource.into(),
            source,
        }
    }
}
