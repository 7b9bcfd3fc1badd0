//! Rule profiles.
//!
//! A profile lists the active rules and their reporting levels, one per line:
//!
//! ```text
//! ERROR - missing_label
//! warn  - file:///home/me/rules/my_rule.rq
//! ```
//!
//! The line is split at the first `-`. Blank lines and `#` comments are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::report::Severity;
use crate::resources;

/// Active rule set for one run: rule name → severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    rules: BTreeMap<String, Severity>,
}

impl Profile {
    /// Loads the profile at `path`, or the bundled default profile when `None`.
    ///
    /// # Errors
    ///
    /// Returns a resource-access error if the file cannot be read, and a
    /// configuration error if any line is malformed or names an unknown level.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                debug!(profile = %path.display(), "loading profile");
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ReportError::io(path.display().to_string(), e))?;
                Self::parse(&text)
            }
            None => {
                debug!(profile = resources::DEFAULT_PROFILE, "loading bundled profile");
                Self::parse(resources::default_profile())
            }
        }
    }

    /// Parses profile text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidLevel`] for an unknown level token and
    /// [`ReportError::MalformedProfileLine`] for a line without a separator or
    /// rule name.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rules = BTreeMap::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let lineno = idx + 1;
            let Some((level, rule)) = line.split_once('-') else {
                return Err(ReportError::MalformedProfileLine {
                    line: lineno,
                    text: raw.to_string(),
                });
            };
            let severity = Severity::parse(level).ok_or_else(|| ReportError::InvalidLevel {
                token: level.trim().to_string(),
                line: lineno,
            })?;
            let rule = rule.trim();
            if rule.is_empty() {
                return Err(ReportError::MalformedProfileLine {
                    line: lineno,
                    text: raw.to_string(),
                });
            }
            if let Some(previous) = rules.insert(rule.to_string(), severity) {
                debug!(rule, %previous, %severity, "profile entry overrides earlier line");
            }
        }
        Ok(Self { rules })
    }

    /// Builds a profile directly from `(rule, severity)` pairs.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, Severity)>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(|(r, s)| (r.into(), s)).collect(),
        }
    }

    /// Severity of `rule`, if the profile lists it.
    #[must_use]
    pub fn severity(&self, rule: &str) -> Option<Severity> {
        self.rules.get(rule).copied()
    }

    /// Rule names in order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Iterates `(rule, severity)` pairs in rule-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.rules.iter().map(|(r, s)| (r.as_str(), *s))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the profile lists no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_levels_case_insensitively() {
        let profile = Profile::parse("error - a\n  Warn-b  \ninfo -   c\n").unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.severity("a"), Some(Severity::Error));
        assert_eq!(profile.severity("b"), Some(Severity::Warn));
        assert_eq!(profile.severity("c"), Some(Severity::Info));
    }

    #[test]
    fn unknown_level_is_configuration_error() {
        let err = Profile::parse("ERROR - a\nFATAL - b\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        match err {
            ReportError::InvalidLevel { token, line } => {
                assert_eq!(token, "FATAL");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_separator_is_configuration_error() {
        let err = Profile::parse("ERROR missing_label").unwrap_err();
        assert!(matches!(err, ReportError::MalformedProfileLine { line: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn empty_rule_name_is_configuration_error() {
        let err = Profile::parse("WARN - ").unwrap_err();
        assert!(matches!(err, ReportError::MalformedProfileLine { .. }));
    }

    #[test]
    fn rule_names_keep_inner_dashes() {
        let profile = Profile::parse("ERROR - file:///tmp/my-rule.rq").unwrap();
        assert_eq!(
            profile.severity("file:///tmp/my-rule.rq"),
            Some(Severity::Error)
        );
    }

    #[test]
    fn last_duplicate_wins() {
        let profile = Profile::parse("ERROR - a\nINFO - a\n").unwrap();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.severity("a"), Some(Severity::Info));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let profile = Profile::parse("\n# comment\n\nWARN - a\n").unwrap();
        assert_eq!(profile.rule_names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn bundled_profile_parses() {
        let profile = Profile::load(None).unwrap();
        assert!(!profile.is_empty());
    }

    #[test]
    fn unreadable_profile_is_resource_error() {
        let err = Profile::load(Some(Path::new("/nonexistent/profile.txt"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceAccess);
    }
}
