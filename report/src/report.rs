//! Report types: severity levels, violations, per-rule results, and the
//! assembled report with its summary counts.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Reporting level assigned to a rule by the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational; worth a look but not a defect.
    Info,
    /// A likely defect that does not block release.
    Warn,
    /// A defect.
    Error,
}

impl Severity {
    /// All levels, lowest first.
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Warn, Severity::Error];

    /// Parses a level token case-insensitively, ignoring surrounding whitespace.
    ///
    /// Returns `None` for anything other than `INFO`, `WARN`, or `ERROR`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "INFO" => Some(Severity::Info),
            "WARN" => Some(Severity::Warn),
            "ERROR" => Some(Severity::Error),
            _ => None,
        }
    }

    /// Returns the canonical uppercase token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(property, value)` pair recorded against a violating entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// The property involved in the violation.
    pub property: String,
    /// The offending value, if the rule query bound one.
    pub value: Option<String>,
}

/// One entity's aggregated evidence of breaking one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The entity (IRI or blank node label) the violation concerns.
    pub entity: String,
    /// Statements collected from every row for this entity, in row order.
    pub statements: Vec<Statement>,
}

impl Violation {
    /// Creates a violation with no statements.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            statements: Vec::new(),
        }
    }

    /// Records a statement. An identical statement already present is not
    /// recorded twice.
    pub fn add_statement(&mut self, property: impl Into<String>, value: Option<String>) {
        let statement = Statement {
            property: property.into(),
            value,
        };
        if !self.statements.contains(&statement) {
            self.statements.push(statement);
        }
    }
}

/// Violations found by one rule, tagged with the rule's severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    /// Severity copied from the profile.
    pub severity: Severity,
    /// Distinct violations, ordered by entity.
    pub violations: Vec<Violation>,
}

/// The finished report. Read-only once built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    rules: BTreeMap<String, RuleResult>,
    skipped_rows: usize,
}

impl Report {
    /// Returns the per-rule results, ordered by rule name.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleResult)> {
        self.rules.iter().map(|(name, result)| (name.as_str(), result))
    }

    /// Returns the result for one rule, if it was evaluated.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&RuleResult> {
        self.rules.get(name)
    }

    /// Total number of violations across all rules.
    #[must_use]
    pub fn total_violations(&self) -> usize {
        self.rules.values().map(|r| r.violations.len()).sum()
    }

    /// Number of violations across rules whose severity is `level`.
    #[must_use]
    pub fn total_violations_at(&self, level: Severity) -> usize {
        self.rules
            .values()
            .filter(|r| r.severity == level)
            .map(|r| r.violations.len())
            .sum()
    }

    /// Returns `(rule, violation)` pairs for every rule at `level`.
    pub fn violations_at(&self, level: Severity) -> impl Iterator<Item = (&str, &Violation)> {
        self.rules
            .iter()
            .filter(move |(_, r)| r.severity == level)
            .flat_map(|(name, r)| r.violations.iter().map(move |v| (name.as_str(), v)))
    }

    /// Returns true if no rule produced a violation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_violations() == 0
    }

    /// Number of result rows dropped for lacking an `entity` binding.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Returns true if any violation has severity `level` or higher.
    #[must_use]
    pub fn has_violations_at_or_above(&self, level: Severity) -> bool {
        self.rules
            .values()
            .any(|r| r.severity >= level && !r.violations.is_empty())
    }
}

/// Assembles a [`Report`] rule by rule.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: Report,
}

impl ReportBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one rule's violations. A rule added twice keeps the later result.
    #[must_use]
    pub fn add_rule(
        mut self,
        name: impl Into<String>,
        severity: Severity,
        violations: Vec<Violation>,
    ) -> Self {
        self.report.rules.insert(
            name.into(),
            RuleResult {
                severity,
                violations,
            },
        );
        self
    }

    /// Adds to the count of rows skipped during aggregation.
    #[must_use]
    pub fn skipped_rows(mut self, count: usize) -> Self {
        self.report.skipped_rows += count;
        self
    }

    /// Finishes the report.
    #[must_use]
    pub fn build(self) -> Report {
        self.report
    }
}
