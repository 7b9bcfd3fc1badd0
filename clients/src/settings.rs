//! Run settings: command-line flags merged over the configuration file.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use ontocheck_report::config::ReportSection;
use ontocheck_report::{FileConfig, OutputFormat, Report, ReportOptions, ResourceMode, Severity};

/// Lowest level that makes the run exit with status 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Never fail on violations.
    #[default]
    None,
    /// Fail on any violation.
    Info,
    /// Fail on WARN or ERROR violations.
    Warn,
    /// Fail on ERROR violations.
    Error,
}

impl FailOn {
    /// The severity threshold, or `None` when violations never fail the run.
    #[must_use]
    pub fn threshold(self) -> Option<Severity> {
        match self {
            FailOn::None => None,
            FailOn::Info => Some(Severity::Info),
            FailOn::Warn => Some(Severity::Warn),
            FailOn::Error => Some(Severity::Error),
        }
    }

    /// Returns true if `report` holds a violation at or above the threshold.
    #[must_use]
    pub fn is_triggered_by(self, report: &Report) -> bool {
        self.threshold()
            .is_some_and(|level| report.has_violations_at_or_above(level))
    }
}

/// Output format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Tab-separated table.
    Tsv,
    /// JSON document.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tsv => OutputFormat::Tsv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Values given on the command line. `None` and `false` defer to the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// `--profile`
    pub profile: Option<PathBuf>,
    /// `--queries-dir`
    pub queries_dir: Option<PathBuf>,
    /// `--output`
    pub output: Option<PathBuf>,
    /// `--format`
    pub format: Option<FormatArg>,
    /// `--fail-on`
    pub fail_on: Option<FailOn>,
    /// `--parallel`
    pub parallel: bool,
}

/// Everything one run needs, fixed before the ontology is loaded.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Options handed to the report engine.
    pub options: ReportOptions,
    /// Report destination; `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Report serialization.
    pub format: OutputFormat,
    /// Exit-status threshold.
    pub fail_on: FailOn,
}

impl Settings {
    /// Merges `flags` over `file`. The format falls back to the output file's
    /// extension, then to TSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's `fail_on` value is not a known level.
    pub fn resolve(flags: Flags, file: FileConfig) -> Result<Self> {
        let ReportSection {
            profile,
            queries_dir,
            output,
            format,
            fail_on,
            parallel,
        } = file.report;

        let fail_on = match (flags.fail_on, fail_on) {
            (Some(level), _) => level,
            (None, Some(text)) => FailOn::from_str(&text, true)
                .map_err(|_| anyhow!("invalid fail_on value {text:?} in configuration file"))?,
            (None, None) => FailOn::default(),
        };

        let output = flags.output.or(output);
        let format = flags
            .format
            .map(OutputFormat::from)
            .or(format)
            .or_else(|| output.as_deref().map(OutputFormat::from_path))
            .unwrap_or_default();

        let resources = match flags.queries_dir.or(queries_dir) {
            Some(dir) => ResourceMode::Directory(dir),
            None => ResourceMode::Embedded,
        };

        Ok(Self {
            options: ReportOptions {
                profile: flags.profile.or(profile),
                resources,
                parallel: flags.parallel || parallel.unwrap_or(false),
            },
            output,
            format,
            fail_on,
        })
    }
}

/// The end-of-run summary printed to stdout.
#[must_use]
pub fn summary(report: &Report) -> String {
    let total = report.total_violations();
    if total == 0 {
        return "No violations found.".to_string();
    }
    format!(
        "Violations: {total}\n\
         -----------------\n\
         INFO:       {}\n\
         WARN:       {}\n\
         ERROR:      {}",
        report.total_violations_at(Severity::Info),
        report.total_violations_at(Severity::Warn),
        report.total_violations_at(Severity::Error),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontocheck_report::{ReportBuilder, Violation};

    fn file(text: &str) -> FileConfig {
        FileConfig::parse(text).unwrap()
    }

    #[test]
    fn defaults_without_flags_or_file() {
        let settings = Settings::resolve(Flags::default(), FileConfig::default()).unwrap();
        assert_eq!(settings.format, OutputFormat::Tsv);
        assert_eq!(settings.fail_on, FailOn::None);
        assert_eq!(settings.output, None);
        assert_eq!(settings.options.resources, ResourceMode::Embedded);
        assert!(!settings.options.parallel);
    }

    #[test]
    fn flags_override_file_values() {
        let config = file(
            r#"
[report]
profile = "from-file.txt"
format = "json"
fail_on = "warn"
"#,
        );
        let flags = Flags {
            profile: Some(PathBuf::from("from-flag.txt")),
            format: Some(FormatArg::Tsv),
            fail_on: Some(FailOn::Error),
            ..Flags::default()
        };
        let settings = Settings::resolve(flags, config).unwrap();
        assert_eq!(settings.options.profile, Some(PathBuf::from("from-flag.txt")));
        assert_eq!(settings.format, OutputFormat::Tsv);
        assert_eq!(settings.fail_on, FailOn::Error);
    }

    #[test]
    fn file_values_fill_missing_flags() {
        let config = file(
            r#"
[report]
queries_dir = "rules"
fail_on = "WARN"
parallel = true
"#,
        );
        let settings = Settings::resolve(Flags::default(), config).unwrap();
        assert_eq!(
            settings.options.resources,
            ResourceMode::Directory(PathBuf::from("rules"))
        );
        assert_eq!(settings.fail_on, FailOn::Warn);
        assert!(settings.options.parallel);
    }

    #[test]
    fn format_follows_output_extension() {
        let flags = Flags {
            output: Some(PathBuf::from("report.json")),
            ..Flags::default()
        };
        let settings = Settings::resolve(flags, FileConfig::default()).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn bad_fail_on_in_file_is_rejected() {
        let config = file("[report]\nfail_on = \"sometimes\"\n");
        assert!(Settings::resolve(Flags::default(), config).is_err());
    }

    #[test]
    fn summary_lists_counts_per_level() {
        let report = ReportBuilder::new()
            .add_rule("missing_label", Severity::Error, vec![Violation::new("ex:A")])
            .add_rule(
                "missing_definition",
                Severity::Warn,
                vec![Violation::new("ex:A"), Violation::new("ex:B")],
            )
            .build();
        assert_eq!(
            summary(&report),
            "Violations: 3\n-----------------\nINFO:       0\nWARN:       2\nERROR:      1"
        );
    }

    #[test]
    fn summary_for_clean_report() {
        assert_eq!(summary(&ReportBuilder::new().build()), "No violations found.");
    }

    #[test]
    fn fail_on_thresholds() {
        let report = ReportBuilder::new()
            .add_rule("missing_definition", Severity::Warn, vec![Violation::new("ex:A")])
            .build();
        assert!(!FailOn::None.is_triggered_by(&report));
        assert!(FailOn::Info.is_triggered_by(&report));
        assert!(FailOn::Warn.is_triggered_by(&report));
        assert!(!FailOn::Error.is_triggered_by(&report));
    }
}
