//! Query-source resolution: map every profile rule to its query text.
//!
//! A rule name starting with [`USER_RULE_PREFIX`] is a reference to a query
//! file on disk. Any other rule name is the identifier of a bundled query.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use tracing::{debug, warn};
use url::Url;

use crate::error::{ReportError, Result};
use crate::resources::{self, ResourceLister};

/// Prefix marking a rule name as a user-supplied query file.
pub const USER_RULE_PREFIX: &str = "file://";

/// Rule name → query text.
pub type QuerySources = BTreeMap<String, String>;

/// Returns true if `rule` refers to a user query file rather than a bundled query.
#[must_use]
pub fn is_user_rule(rule: &str) -> bool {
    rule.starts_with(USER_RULE_PREFIX)
}

/// Resolves query text for exactly the given rule names.
///
/// # Errors
///
/// Returns a resource-access error if a user query file or the bundled
/// collection cannot be read, and [`ReportError::MissingQuery`] if any rule
/// is left without query text.
pub fn resolve_queries<'a, I>(rules: I, lister: &dyn ResourceLister) -> Result<QuerySources>
where
    I: IntoIterator<Item = &'a str>,
{
    let (user, default): (BTreeSet<&str>, BTreeSet<&str>) =
        rules.into_iter().partition(|rule| is_user_rule(rule));

    let mut queries = QuerySources::new();
    if !default.is_empty() {
        queries.extend(bundled_queries(lister, Some(&default))?);
    }
    queries.extend(user_queries(&user)?);

    if let Some(missing) = default.iter().chain(user.iter()).find(|r| !queries.contains_key(**r)) {
        return Err(ReportError::MissingQuery((*missing).to_string()));
    }
    Ok(queries)
}

/// Reads each user query file named by a `file://` rule reference, verbatim.
///
/// # Errors
///
/// Returns [`ReportError::InvalidRuleReference`] if a reference is not a
/// local file URL, and a resource-access error if any file cannot be read.
pub fn user_queries(rules: &BTreeSet<&str>) -> Result<QuerySources> {
    let mut queries = QuerySources::new();
    for rule in rules {
        let path = file_reference_path(rule)?;
        debug!(rule, path = %path.display(), "reading user query");
        let text = std::fs::read_to_string(&path)
            .map_err(|e| ReportError::io(path.display().to_string(), e))?;
        queries.insert((*rule).to_string(), text);
    }
    Ok(queries)
}

/// Reads bundled queries whose identifier is in `rules`, or every bundled
/// query when `rules` is `None`. Line terminators are normalized to `\n`.
///
/// # Errors
///
/// Returns [`ReportError::NoBundledQueries`] if the collection lists no query
/// entries, and a resource-access error if it cannot be enumerated or an
/// entry cannot be read.
pub fn bundled_queries(
    lister: &dyn ResourceLister,
    rules: Option<&BTreeSet<&str>>,
) -> Result<QuerySources> {
    let names = lister.list()?;
    let entries: Vec<(&str, &String)> = names
        .iter()
        .filter_map(|name| resources::rule_id(name).map(|id| (id, name)))
        .collect();
    if entries.is_empty() {
        return Err(ReportError::NoBundledQueries(lister.location()));
    }

    let mut queries = QuerySources::new();
    let mut sources: BTreeMap<&str, &str> = BTreeMap::new();
    for (id, name) in entries {
        if rules.is_some_and(|wanted| !wanted.contains(id)) {
            continue;
        }
        if let Some(first) = sources.get(id) {
            warn!(
                rule = id,
                kept = %first,
                ignored = %name,
                "duplicate query identifier; keeping the first entry"
            );
            continue;
        }
        let text = lister.read(name)?;
        sources.insert(id, name);
        queries.insert(id.to_string(), resources::normalize_newlines(&text));
    }
    debug!(
        location = %lister.location(),
        count = queries.len(),
        "resolved bundled queries"
    );
    Ok(queries)
}

/// Turns a `file://` reference into a filesystem path. Percent-escapes are
/// decoded; an explicit `localhost` authority is accepted.
fn file_reference_path(rule: &str) -> Result<PathBuf> {
    let invalid = |message: String| ReportError::InvalidRuleReference {
        rule: rule.to_string(),
        message,
    };
    let url = Url::parse(rule).map_err(|e| invalid(e.to_string()))?;
    url.to_file_path()
        .map_err(|()| invalid("URL does not name a local file path".to_string()))
}
