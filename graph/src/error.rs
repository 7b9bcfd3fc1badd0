//! Errors raised while loading an ontology into the graph store.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a queryable graph from an ontology file.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The ontology file could not be opened.
    #[error("cannot open ontology {}: {source}", .path.display())]
    Open {
        /// Path of the ontology file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The RDF syntax could not be determined from the file name.
    #[error("cannot determine RDF syntax of {}; expected .ttl, .nt, .nq, .trig, .n3, .owl, .rdf or .xml", .path.display())]
    UnknownFormat {
        /// Path of the ontology file.
        path: PathBuf,
    },

    /// The ontology text is not valid in the selected syntax.
    #[error("cannot parse ontology {source_name}: {message}")]
    Parse {
        /// File path or other label of the input.
        source_name: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The in-memory store reported a storage failure.
    #[error("graph store error: {0}")]
    Storage(String),
}
