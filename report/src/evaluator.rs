//! Rule evaluation: run each rule's query and aggregate its rows.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::aggregate::{Aggregation, ViolationAggregator};
use crate::error::{ReportError, Result};
use crate::queries::QuerySources;
use crate::store::{GraphStore, QueryFailure};

/// Evaluates one rule's query and folds its rows into violations.
///
/// # Errors
///
/// Returns [`ReportError::QueryFailed`] if the store cannot evaluate the
/// query or fails while streaming solutions.
pub fn evaluate_rule<S>(store: &S, rule: &str, query: &str) -> Result<Aggregation>
where
    S: GraphStore + ?Sized,
{
    let failed = |e: QueryFailure| ReportError::QueryFailed {
        rule: rule.to_string(),
        message: e.0,
    };
    let mut aggregator = ViolationAggregator::new(rule);
    let mut rows = 0usize;
    for row in store.select(query).map_err(failed)? {
        aggregator.push(&row.map_err(failed)?);
        rows += 1;
    }
    let aggregation = aggregator.finish();
    debug!(
        rule,
        rows,
        violations = aggregation.violations.len(),
        skipped = aggregation.skipped_rows,
        "evaluated rule"
    );
    Ok(aggregation)
}

/// Evaluates every rule in `queries`, in rule-name order.
///
/// With `parallel` set, rules run on the rayon pool; the result is keyed by
/// rule name either way, so the outcome does not depend on scheduling. The
/// first failure stops evaluation: no further rule is started.
///
/// # Errors
///
/// Returns a query failure. Sequential runs report the first failing rule in
/// rule-name order; parallel runs report whichever failing rule the pool
/// reached first.
pub fn evaluate_all<S>(
    store: &S,
    queries: &QuerySources,
    parallel: bool,
) -> Result<BTreeMap<String, Aggregation>>
where
    S: GraphStore + ?Sized,
{
    if parallel {
        queries
            .par_iter()
            .map(|(rule, query)| evaluate_rule(store, rule, query).map(|agg| (rule.clone(), agg)))
            .collect()
    } else {
        queries
            .iter()
            .map(|(rule, query)| evaluate_rule(store, rule, query).map(|agg| (rule.clone(), agg)))
            .collect()
    }
}
