//! Bundled rule queries and the default profile.
//!
//! The default rule set ships in two forms. Release binaries carry the
//! query files compiled in ([`EmbeddedResources`]). During development, or to
//! override the bundled set without rebuilding, the same files can be read
//! from a directory tree ([`DirectoryResources`]). Both are exposed through
//! [`ResourceLister`]: list entries under [`QUERY_DIR`], read an entry by its
//! full name.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ReportError, Result};

/// Prefix under which bundled query entries are listed.
pub const QUERY_DIR: &str = "queries";

/// File extension of rule query files.
pub const QUERY_EXTENSION: &str = "rq";

/// Resource name of the default profile.
pub const DEFAULT_PROFILE: &str = "report_profile.txt";

const PROFILE_TEXT: &str = include_str!("../resources/report_profile.txt");

const EMBEDDED: &[(&str, &str)] = &[
    (
        "queries/annotation_whitespace.rq",
        include_str!("../resources/queries/annotation_whitespace.rq"),
    ),
    (
        "queries/deprecated_class_reference.rq",
        include_str!("../resources/queries/deprecated_class_reference.rq"),
    ),
    (
        "queries/duplicate_definition.rq",
        include_str!("../resources/queries/duplicate_definition.rq"),
    ),
    (
        "queries/duplicate_label.rq",
        include_str!("../resources/queries/duplicate_label.rq"),
    ),
    (
        "queries/equivalent_pair.rq",
        include_str!("../resources/queries/equivalent_pair.rq"),
    ),
    (
        "queries/invalid_xref.rq",
        include_str!("../resources/queries/invalid_xref.rq"),
    ),
    (
        "queries/label_formatting.rq",
        include_str!("../resources/queries/label_formatting.rq"),
    ),
    (
        "queries/lowercase_definition.rq",
        include_str!("../resources/queries/lowercase_definition.rq"),
    ),
    (
        "queries/missing_definition.rq",
        include_str!("../resources/queries/missing_definition.rq"),
    ),
    (
        "queries/missing_label.rq",
        include_str!("../resources/queries/missing_label.rq"),
    ),
    (
        "queries/missing_obsolete_label.rq",
        include_str!("../resources/queries/missing_obsolete_label.rq"),
    ),
    (
        "queries/missing_ontology_description.rq",
        include_str!("../resources/queries/missing_ontology_description.rq"),
    ),
    (
        "queries/missing_ontology_license.rq",
        include_str!("../resources/queries/missing_ontology_license.rq"),
    ),
    (
        "queries/missing_ontology_title.rq",
        include_str!("../resources/queries/missing_ontology_title.rq"),
    ),
    (
        "queries/missing_superclass.rq",
        include_str!("../resources/queries/missing_superclass.rq"),
    ),
    (
        "queries/misused_obsolete_label.rq",
        include_str!("../resources/queries/misused_obsolete_label.rq"),
    ),
    (
        "queries/multiple_definitions.rq",
        include_str!("../resources/queries/multiple_definitions.rq"),
    ),
    (
        "queries/multiple_labels.rq",
        include_str!("../resources/queries/multiple_labels.rq"),
    ),
];

/// Returns the text of the bundled default profile.
#[must_use]
pub fn default_profile() -> &'static str {
    PROFILE_TEXT
}

/// Source of bundled rule queries.
pub trait ResourceLister: Sync {
    /// Lists the full names of all entries under [`QUERY_DIR`].
    ///
    /// # Errors
    ///
    /// Returns a resource-access error if the collection cannot be enumerated.
    fn list(&self) -> Result<Vec<String>>;

    /// Reads one entry by the full name returned from [`list`](Self::list).
    ///
    /// # Errors
    ///
    /// Returns a resource-access error if the entry cannot be read.
    fn read(&self, name: &str) -> Result<String>;

    /// Human-readable location of the collection, for diagnostics.
    fn location(&self) -> String;
}

/// Queries compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl ResourceLister for EmbeddedResources {
    fn list(&self) -> Result<Vec<String>> {
        Ok(EMBEDDED.iter().map(|(name, _)| (*name).to_string()).collect())
    }

    fn read(&self, name: &str) -> Result<String> {
        EMBEDDED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| (*text).to_string())
            .ok_or_else(|| {
                ReportError::io(
                    name,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such bundled resource"),
                )
            })
    }

    fn location(&self) -> String {
        format!("embedded:{QUERY_DIR}")
    }
}

/// Queries read from a directory of `.rq` files.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    /// Uses `root` as the query directory. Files in nested directories are
    /// included.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The query directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLister for DirectoryResources {
    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry
                .map_err(|e| ReportError::io(self.root.display().to_string(), e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            names.push(format!("{QUERY_DIR}/{relative}"));
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<String> {
        let relative = name
            .strip_prefix(QUERY_DIR)
            .map(|r| r.trim_start_matches('/'))
            .unwrap_or(name);
        let path = self.root.join(relative);
        debug!(path = %path.display(), "reading query file");
        std::fs::read_to_string(&path).map_err(|e| ReportError::io(path.display().to_string(), e))
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// Returns the rule identifier for a query entry: its file name without the
/// `.rq` extension. Entries with any other extension yield `None`.
#[must_use]
pub fn rule_id(name: &str) -> Option<&str> {
    if name.ends_with('/') {
        return None;
    }
    let file = name.rsplit('/').next().unwrap_or(name);
    let (stem, ext) = file.rsplit_once('.')?;
    (ext == QUERY_EXTENSION && !stem.is_empty()).then_some(stem)
}

/// Normalizes line terminators to `\n`, keeping every line break.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
