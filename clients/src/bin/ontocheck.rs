//! `ontocheck`: validates an ontology against a profile of SPARQL rules.
//!
//! Loads the ontology into an in-memory graph, runs every rule named in the
//! profile (the bundled default profile unless `--profile` is given), writes
//! the report to `--output` or stdout, and prints a per-level summary.
//!
//! **Usage:**
//! ```
//! ontocheck --input <ONTOLOGY> [--profile <FILE>] [--output <FILE>]
//!           [--format tsv|json] [--queries-dir <DIR>] [--config <TOML>]
//!           [--parallel] [--fail-on info|warn|error|none] [--list-rules]
//! ```
//!
//! Exits with status 1 when `--fail-on` is set and a violation at or above
//! that level is found.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ontocheck_clients::{bundled_rule_ids, logging, summary, FailOn, Flags, FormatArg, Settings};
use ontocheck_graph::{format_from_name, OxigraphStore};
use ontocheck_report::{render, run_report, FileConfig};
use tracing::info;

/// Run ontology quality rules and report violations.
#[derive(Parser)]
#[command(
    name = "ontocheck",
    version,
    about = "Validate an ontology against a profile of SPARQL quality rules"
)]
struct Args {
    /// Ontology file to validate (.ttl, .nt, .nq, .trig, .n3, .owl, .rdf).
    #[arg(long, short, required_unless_present = "list_rules")]
    input: Option<PathBuf>,

    /// RDF syntax of the input, overriding detection from the extension.
    #[arg(long)]
    input_format: Option<String>,

    /// Profile file of `LEVEL - rule` lines (default: bundled profile).
    #[arg(long, short)]
    profile: Option<PathBuf>,

    /// Write the report here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Report format (default: from the output extension, else tsv).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Directory of .rq files replacing the bundled queries.
    #[arg(long)]
    queries_dir: Option<PathBuf>,

    /// TOML configuration file with a [report] table.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluate rules in parallel.
    #[arg(long)]
    parallel: bool,

    /// Exit with status 1 if a violation at or above this level is found.
    #[arg(long, value_enum)]
    fail_on: Option<FailOn>,

    /// Print the available rule identifiers and exit.
    #[arg(long)]
    list_rules: bool,
}

fn main() -> Result<()> {
    logging::init_tracing();
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => FileConfig::default(),
    };
    let flags = Flags {
        profile: args.profile,
        queries_dir: args.queries_dir,
        output: args.output,
        format: args.format,
        fail_on: args.fail_on,
        parallel: args.parallel,
    };
    let settings = Settings::resolve(flags, file)?;

    if args.list_rules {
        let lister = settings.options.resources.lister();
        for id in bundled_rule_ids(lister.as_ref())
            .with_context(|| format!("listing rules in {}", lister.location()))?
        {
            println!("{id}");
        }
        return Ok(());
    }

    let Some(input) = args.input else {
        bail!("--input is required");
    };
    let graph = match args.input_format.as_deref() {
        Some(name) => {
            let Some(format) = format_from_name(name) else {
                bail!("unknown RDF syntax {name:?}");
            };
            OxigraphStore::load_path_as(&input, format)
        }
        None => OxigraphStore::load_path(&input),
    }
    .with_context(|| format!("loading ontology {}", input.display()))?;
    let quads = graph.len()?;
    info!(input = %input.display(), quads, "ontology ready");

    let report = run_report(&graph, &settings.options).context("running report")?;
    let rendered = render::render(&report, settings.format).context("rendering report")?;

    match &settings.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => println!("{}", rendered.trim_end_matches('\n')),
    }
    println!("{}", summary(&report));

    if settings.fail_on.is_triggered_by(&report) {
        process::exit(1);
    }
    Ok(())
}
