//! Report serialization: tab-separated table or JSON document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::report::{Report, RuleResult, Severity};

/// Column header of the TSV rendering.
pub const TSV_HEADER: &str = "Level\tRule Name\tSubject\tProperty\tValue";

/// Serialization target for a finished report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One tab-separated line per statement.
    #[default]
    Tsv,
    /// Pretty-printed JSON document with summary counts.
    Json,
}

impl OutputFormat {
    /// Infers the format from an output path: `.json` selects JSON, anything
    /// else TSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Tsv,
        }
    }
}

/// Renders `report` in `format`.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(report: &Report, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Tsv => Ok(to_tsv(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Renders one line per statement, most severe rules first, then by rule
/// name and entity. A violation without statements gets one line with empty
/// property and value columns.
#[must_use]
pub fn to_tsv(report: &Report) -> String {
    let mut out = String::from(TSV_HEADER);
    out.push('\n');
    for level in Severity::ALL.iter().rev() {
        for (rule, violation) in report.violations_at(*level) {
            if violation.statements.is_empty() {
                push_row(&mut out, &[level.as_str(), rule, violation.entity.as_str(), "", ""]);
                continue;
            }
            for statement in &violation.statements {
                let value = statement.value.as_deref().unwrap_or("");
                push_row(
                    &mut out,
                    &[
                        level.as_str(),
                        rule,
                        violation.entity.as_str(),
                        statement.property.as_str(),
                        value,
                    ],
                );
            }
        }
    }
    out
}

fn push_row(out: &mut String, cells: &[&str]) {
    let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    out.push_str(&cells.join("\t"));
    out.push('\n');
}

/// Tabs and line breaks inside a cell would split the row.
fn escape_cell(cell: &str) -> String {
    cell.replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    violations: usize,
    counts: BTreeMap<Severity, usize>,
    skipped_rows: usize,
    rules: BTreeMap<&'a str, &'a RuleResult>,
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error only if serialization fails.
pub fn to_json(report: &Report) -> serde_json::Result<String> {
    let doc = JsonReport {
        violations: report.total_violations(),
        counts: Severity::ALL
            .iter()
            .map(|l| (*l, report.total_violations_at(*l)))
            .collect(),
        skipped_rows: report.skipped_rows(),
        rules: report.rules().collect(),
    };
    serde_json::to_string_pretty(&doc)
}
