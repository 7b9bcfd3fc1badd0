//! The query-engine boundary.
//!
//! The report engine never loads or queries RDF itself. It hands query text
//! to a [`GraphStore`] and reads named bindings off the rows that come back.

use std::collections::BTreeMap;

use thiserror::Error;

/// Binding name of the violating entity. Every row must bind it.
pub const ENTITY: &str = "entity";
/// Binding name of the property involved in a violation.
pub const PROPERTY: &str = "property";
/// Binding name of the offending value.
pub const VALUE: &str = "value";

/// Failure reported by a [`GraphStore`] while parsing or evaluating a query.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct QueryFailure(pub String);

impl QueryFailure {
    /// Wraps any displayable engine error.
    pub fn new(message: impl ToString) -> Self {
        Self(message.to_string())
    }
}

/// One solution of a rule query: variable name → textual value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    bindings: BTreeMap<String, String>,
}

impl ResultRow {
    /// Creates a row with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, replacing any earlier value for `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.bindings.insert(name.into(), value.into());
        self
    }

    /// Sets a binding in place.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Looks up a binding by name. Unbound variables are `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResultRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Lazily produced solutions of one query.
pub type RowStream<'a> = Box<dyn Iterator<Item = Result<ResultRow, QueryFailure>> + 'a>;

/// A loaded graph that can answer `SELECT` queries.
///
/// Implementations must be shareable across threads: rules may be
/// evaluated in parallel against the same store.
pub trait GraphStore: Sync {
    /// Evaluates `query` and returns its solutions.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryFailure`] if the query cannot be parsed or evaluated,
    /// or is not a `SELECT` query.
    fn select(&self, query: &str) -> Result<RowStream<'_>, QueryFailure>;
}

impl<T: GraphStore + ?Sized> GraphStore for &T {
    fn select(&self, query: &str) -> Result<RowStream<'_>, QueryFailure> {
        (**self).select(query)
    }
}
