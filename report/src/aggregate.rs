//! Folding one rule's result rows into per-entity violations.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::ReportError;
use crate::report::Violation;
use crate::store::{ResultRow, ENTITY, PROPERTY, VALUE};

/// Namespace fragments of the RDF Schema and OWL vocabularies. Entities in
/// these namespaces describe the data model itself and are never reported.
pub const EXCLUDED_NAMESPACES: [&str; 2] = ["/rdf-schema#", "/owl#"];

/// Returns true if `entity` belongs to an excluded schema vocabulary.
#[must_use]
pub fn is_excluded(entity: &str) -> bool {
    EXCLUDED_NAMESPACES.iter().any(|ns| entity.contains(ns))
}

/// Violations for one rule, plus the number of rows dropped as malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Distinct violations ordered by entity.
    pub violations: Vec<Violation>,
    /// Rows skipped for lacking an `entity` binding.
    pub skipped_rows: usize,
}

/// Accumulates rows for a single rule.
#[derive(Debug)]
pub struct ViolationAggregator<'r> {
    rule: &'r str,
    by_entity: BTreeMap<String, Violation>,
    skipped_rows: usize,
}

impl<'r> ViolationAggregator<'r> {
    /// Starts an empty aggregation for `rule`.
    #[must_use]
    pub fn new(rule: &'r str) -> Self {
        Self {
            rule,
            by_entity: BTreeMap::new(),
            skipped_rows: 0,
        }
    }

    /// Folds one row in. A row without an `entity` binding is logged and
    /// skipped; rows for excluded entities are ignored.
    pub fn push(&mut self, row: &ResultRow) {
        let Some(entity) = row.get(ENTITY) else {
            let err = ReportError::MissingField {
                rule: self.rule.to_string(),
                field: ENTITY,
            };
            warn!(rule = self.rule, error = %err, "skipping result row");
            self.skipped_rows += 1;
            return;
        };
        if is_excluded(entity) {
            return;
        }
        let violation = self
            .by_entity
            .entry(entity.to_string())
            .or_insert_with(|| Violation::new(entity));
        if let Some(property) = row.get(PROPERTY) {
            violation.add_statement(property, row.get(VALUE).map(str::to_string));
        }
    }

    /// Finishes the aggregation.
    #[must_use]
    pub fn finish(self) -> Aggregation {
        Aggregation {
            violations: self.by_entity.into_values().collect(),
            skipped_rows: self.skipped_rows,
        }
    }
}

/// Aggregates a complete row sequence for `rule`.
pub fn aggregate<'a, I>(rule: &str, rows: I) -> Aggregation
where
    I: IntoIterator<Item = &'a ResultRow>,
{
    let mut aggregator = ViolationAggregator::new(rule);
    for row in rows {
        aggregator.push(row);
    }
    aggregator.finish()
}
