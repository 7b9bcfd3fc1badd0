//! In-memory oxigraph store answering rule queries.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Term;
use oxigraph::sparql::{QueryResults, QuerySolution};
use oxigraph::store::Store;
use tracing::debug;

use ontocheck_report::{GraphStore, QueryFailure, ResultRow, RowStream};

use crate::error::GraphError;
use crate::format::format_for_path;

/// A loaded ontology, queryable with SPARQL.
#[derive(Clone)]
pub struct OxigraphStore {
    store: Store,
}

impl std::fmt::Debug for OxigraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OxigraphStore").finish_non_exhaustive()
    }
}

impl OxigraphStore {
    /// Creates an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the store cannot be created.
    pub fn new() -> Result<Self, GraphError> {
        let store = Store::new().map_err(|e| GraphError::Storage(e.to_string()))?;
        Ok(Self { store })
    }

    /// Loads an ontology file, choosing the RDF syntax from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownFormat`] for an unrecognised extension,
    /// [`GraphError::Open`] if the file cannot be opened, and
    /// [`GraphError::Parse`] if its content is invalid.
    pub fn load_path(path: &Path) -> Result<Self, GraphError> {
        let format = format_for_path(path).ok_or_else(|| GraphError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
        Self::load_path_as(path, format)
    }

    /// Loads an ontology file in an explicit RDF syntax.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Open`] if the file cannot be opened and
    /// [`GraphError::Parse`] if its content is invalid.
    pub fn load_path_as(path: &Path, format: RdfFormat) -> Result<Self, GraphError> {
        let file = File::open(path).map_err(|source| GraphError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = Self::new()?;
        graph.load(BufReader::new(file), format, &path.display().to_string())?;
        Ok(graph)
    }

    /// Loads ontology text held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] if `text` is invalid in `format`.
    pub fn load_str(text: &str, format: RdfFormat) -> Result<Self, GraphError> {
        let graph = Self::new()?;
        graph.load(text.as_bytes(), format, "<string>")?;
        Ok(graph)
    }

    fn load(&self, read: impl Read, format: RdfFormat, source_name: &str) -> Result<(), GraphError> {
        self.store
            .load_from_reader(RdfParser::from_format(format), read)
            .map_err(|e| GraphError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        let quads = self.len()?;
        debug!(
            source = source_name,
            format = %format,
            quads,
            "ontology loaded"
        );
        Ok(())
    }

    /// Number of quads in the store.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the store cannot be read.
    pub fn len(&self) -> Result<usize, GraphError> {
        self.store
            .len()
            .map_err(|e| GraphError::Storage(e.to_string()))
    }

    /// Returns true if the store holds no quads.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the store cannot be read.
    pub fn is_empty(&self) -> Result<bool, GraphError> {
        Ok(self.len()? == 0)
    }
}

impl GraphStore for OxigraphStore {
    fn select(&self, query: &str) -> Result<RowStream<'_>, QueryFailure> {
        match self.store.query(query).map_err(QueryFailure::new)? {
            QueryResults::Solutions(solutions) => Ok(Box::new(solutions.map(|solution| {
                solution
                    .map(|s| solution_row(&s))
                    .map_err(QueryFailure::new)
            }))),
            QueryResults::Boolean(_) => Err(QueryFailure::new(
                "rule queries must be SELECT queries, got an ASK query",
            )),
            QueryResults::Graph(_) => Err(QueryFailure::new(
                "rule queries must be SELECT queries, got a CONSTRUCT or DESCRIBE query",
            )),
        }
    }
}

/// Copies every bound variable of a solution into a [`ResultRow`].
fn solution_row(solution: &QuerySolution) -> ResultRow {
    solution
        .iter()
        .map(|(variable, term)| (variable.as_str().to_string(), term_text(term)))
        .collect()
}

/// IRIs are rendered bare, literals by their lexical value, blank nodes as
/// `_:id`.
fn term_text(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        Term::BlankNode(node) => format!("_:{}", node.as_str()),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}
