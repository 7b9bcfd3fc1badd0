//! Run options and the optional TOML configuration file.
//!
//! ```toml
//! [report]
//! profile = "profile.txt"
//! queries_dir = "queries"
//! output = "report.tsv"
//! format = "tsv"
//! fail_on = "error"
//! parallel = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReportError, Result};
use crate::render::OutputFormat;
use crate::resources::{DirectoryResources, EmbeddedResources, ResourceLister};

/// Where bundled rule queries are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceMode {
    /// Queries compiled into the binary.
    #[default]
    Embedded,
    /// Queries read from a directory of `.rq` files.
    Directory(PathBuf),
}

impl ResourceMode {
    /// Builds the lister for this mode.
    #[must_use]
    pub fn lister(&self) -> Box<dyn ResourceLister> {
        match self {
            ResourceMode::Embedded => Box::new(EmbeddedResources),
            ResourceMode::Directory(dir) => Box::new(DirectoryResources::new(dir)),
        }
    }
}

/// Options for one report run. Built once at startup and not changed after.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Profile file; `None` selects the bundled default profile.
    pub profile: Option<PathBuf>,
    /// Source of bundled queries.
    pub resources: ResourceMode,
    /// Evaluate rules on the rayon thread pool.
    pub parallel: bool,
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// The `[report]` table.
    #[serde(default)]
    pub report: ReportSection,
}

/// The `[report]` table. Every key is optional; command-line flags win.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    /// Profile file.
    pub profile: Option<PathBuf>,
    /// Directory of `.rq` files replacing the bundled queries.
    pub queries_dir: Option<PathBuf>,
    /// Report output file.
    pub output: Option<PathBuf>,
    /// Report output format.
    pub format: Option<OutputFormat>,
    /// Lowest level that makes the run fail (`info`, `warn`, `error`, `none`).
    pub fail_on: Option<String>,
    /// Evaluate rules in parallel.
    pub parallel: Option<bool>,
}

impl FileConfig {
    /// Reads and parses a configuration file. Relative paths inside it are
    /// resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns a resource-access error if the file cannot be read and
    /// [`ReportError::InvalidConfig`] if it is not valid configuration TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ReportError::io(path.display().to_string(), e))?;
        let mut config = Self::parse(&text).map_err(|message| ReportError::InvalidConfig {
            path: path.to_path_buf(),
            message,
        })?;
        if let Some(base) = path.parent() {
            config.report.rebase(base);
        }
        Ok(config)
    }

    /// Parses configuration text, returning the parser diagnostic on failure.
    ///
    /// # Errors
    ///
    /// Returns the TOML error message if `text` does not match the schema.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

impl ReportSection {
    fn rebase(&mut self, base: &Path) {
        for path in [&mut self.profile, &mut self.queries_dir, &mut self.output]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_report_table() {
        let config = FileConfig::parse(
            r#"
[report]
profile = "p.txt"
queries_dir = "q"
format = "json"
fail_on = "warn"
parallel = true
"#,
        )
        .unwrap();
        assert_eq!(config.report.profile, Some(PathBuf::from("p.txt")));
        assert_eq!(config.report.format, Some(OutputFormat::Json));
        assert_eq!(config.report.fail_on.as_deref(), Some("warn"));
        assert_eq!(config.report.parallel, Some(true));
        assert_eq!(config.report.output, None);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("[report]\nprofil = \"x\"\n").is_err());
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ontocheck.toml");
        std::fs::write(&path, "[report]\nprofile = \"p.txt\"\noutput = \"/abs/out.tsv\"\n")
            .unwrap();
        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.report.profile, Some(dir.path().join("p.txt")));
        assert_eq!(config.report.output, Some(PathBuf::from("/abs/out.tsv")));
    }

    #[test]
    fn malformed_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[report\n").unwrap();
        let err = FileConfig::load(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }
}
