//! Graph backend for ontocheck.
//!
//! Loads an ontology file (Turtle, N-Triples, N-Quads, TriG, N3 or RDF/XML)
//! into an in-memory oxigraph store and answers rule queries through the
//! [`GraphStore`](ontocheck_report::GraphStore) trait.
//!
//! ```no_run
//! use std::path::Path;
//! use ontocheck_graph::OxigraphStore;
//! use ontocheck_report::{run_report, ReportOptions};
//!
//! let graph = OxigraphStore::load_path(Path::new("ontology.owl"))?;
//! let report = run_report(&graph, &ReportOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod error;
pub mod format;
pub mod store;

pub use error::GraphError;
pub use format::{format_for_path, format_from_name};
pub use oxigraph::io::RdfFormat;
pub use store::OxigraphStore;
