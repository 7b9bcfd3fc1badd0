//! Support code for the `ontocheck` binary: logging setup, merging of
//! command-line flags with the configuration file, and the printed summary.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod logging;
pub mod settings;

pub use settings::{summary, FailOn, Flags, FormatArg, Settings};

use ontocheck_report::resources::{rule_id, ResourceLister};

/// Identifiers of every query the lister provides, in listing order.
///
/// # Errors
///
/// Returns a resource-access error if the collection cannot be enumerated.
pub fn bundled_rule_ids(lister: &dyn ResourceLister) -> ontocheck_report::Result<Vec<String>> {
    Ok(lister
        .list()?
        .iter()
        .filter_map(|name| rule_id(name))
        .map(str::to_string)
        .collect())
}
