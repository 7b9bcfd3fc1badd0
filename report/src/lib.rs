//! Ontology quality reports.
//!
//! Validates an RDF graph against a profile of named rules. Each rule is a
//! SPARQL `SELECT` query binding `?entity` and, optionally, `?property` and
//! `?value`; each rule carries a severity. Result rows are merged into one
//! violation per entity per rule, and the report counts violations overall
//! and per severity.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Load the rule profile | [`profile`] |
//! | Resolve query text (bundled or `file://`) | [`queries`], [`resources`] |
//! | Evaluate queries against the graph | [`evaluator`], [`store`] |
//! | Merge rows into violations | [`aggregate`] |
//! | Assemble totals | [`report`] |
//! | Serialize | [`render`] |
//!
//! # Entry Point
//!
//! ```no_run
//! use ontocheck_report::{run_report, ReportOptions, Severity};
//! # fn demo(store: &dyn ontocheck_report::GraphStore) -> ontocheck_report::Result<()> {
//! let report = run_report(store, &ReportOptions::default())?;
//! println!("{} errors", report.total_violations_at(Severity::Error));
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod profile;
pub mod queries;
pub mod render;
pub mod report;
pub mod resources;
pub mod store;

pub use config::{FileConfig, ReportOptions, ResourceMode};
pub use error::{ErrorKind, ReportError, Result};
pub use profile::Profile;
pub use render::OutputFormat;
pub use report::{Report, ReportBuilder, RuleResult, Severity, Statement, Violation};
pub use store::{GraphStore, QueryFailure, ResultRow, RowStream};

use tracing::info;

/// Runs one validation: load the profile, resolve its queries, evaluate
/// every rule against `store`, and assemble the report.
///
/// # Errors
///
/// Returns the first configuration, resource-access, or engine error. No
/// partial report is produced.
pub fn run_report<S>(store: &S, options: &ReportOptions) -> Result<Report>
where
    S: GraphStore + ?Sized,
{
    let profile = Profile::load(options.profile.as_deref())?;
    let lister = options.resources.lister();
    let queries = queries::resolve_queries(profile.rule_names(), lister.as_ref())?;
    build_report(store, &profile, &queries, options.parallel)
}

/// Evaluates already-resolved queries and tags each rule with its profile
/// severity.
///
/// # Errors
///
/// Returns [`ReportError::MissingQuery`] if a profile rule has no query, and
/// any engine error raised during evaluation.
pub fn build_report<S>(
    store: &S,
    profile: &Profile,
    queries: &queries::QuerySources,
    parallel: bool,
) -> Result<Report>
where
    S: GraphStore + ?Sized,
{
    if let Some(missing) = profile.rule_names().find(|r| !queries.contains_key(*r)) {
        return Err(ReportError::MissingQuery(missing.to_string()));
    }
    let mut evaluated = evaluator::evaluate_all(store, queries, parallel)?;

    let mut builder = ReportBuilder::new();
    for (rule, severity) in profile.iter() {
        let Some(aggregation) = evaluated.remove(rule) else {
            continue;
        };
        builder = builder
            .add_rule(rule, severity, aggregation.violations)
            .skipped_rows(aggregation.skipped_rows);
    }
    let report = builder.build();
    info!(
        rules = profile.len(),
        violations = report.total_violations(),
        errors = report.total_violations_at(Severity::Error),
        warnings = report.total_violations_at(Severity::Warn),
        infos = report.total_violations_at(Severity::Info),
        "report complete"
    );
    Ok(report)
}
