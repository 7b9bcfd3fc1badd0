//! Bundled rule queries evaluated against a real in-memory store.
//!
//! The fixture ontology below carries exactly one instance of most defects
//! the default profile looks for, so each rule's expected violations can be
//! stated entity by entity.

use std::io::Write;

use ontocheck_graph::{GraphError, OxigraphStore, RdfFormat};
use ontocheck_report::{run_report, Profile, ReportOptions, Severity};

const FIXTURE: &str = r#"
@prefix ex:       <http://example.org/> .
@prefix obo:      <http://purl.obolibrary.org/obo/> .
@prefix owl:      <http://www.w3.org/2002/07/owl#> .
@prefix rdfs:     <http://www.w3.org/2000/01/rdf-schema#> .
@prefix dcterms:  <http://purl.org/dc/terms/> .
@prefix oboInOwl: <http://www.geneontology.org/formats/oboInOwl#> .

ex:onto a owl:Ontology ;
    dcterms:title "Example ontology" .

owl:Thing a owl:Class .

ex:Animal a owl:Class ;
    rdfs:label "animal" ;
    rdfs:subClassOf owl:Thing ;
    obo:IAO_0000115 "A living organism." .

ex:Dog a owl:Class ;
    rdfs:label "dog" ;
    rdfs:subClassOf ex:Animal ;
    obo:IAO_0000115 "a domesticated canid." ;
    oboInOwl:hasDbXref "not a curie" .

ex:Hound a owl:Class ;
    rdfs:label "dog" ;
    rdfs:subClassOf ex:Animal ;
    obo:IAO_0000115 "A hunting dog." .

ex:Cat a owl:Class ;
    rdfs:subClassOf ex:Animal .

ex:OldCat a owl:Class ;
    rdfs:label "cat" ;
    owl:deprecated true .

ex:Kitten a owl:Class ;
    rdfs:label "kitten" ;
    rdfs:subClassOf ex:OldCat ;
    obo:IAO_0000115 "A young cat." .
"#;

const PROFILE: &str = "\
ERROR - missing_label
ERROR - duplicate_label
ERROR - deprecated_class_reference
ERROR - invalid_xref
WARN - missing_definition
WARN - missing_obsolete_label
WARN - missing_ontology_license
WARN - missing_ontology_title
INFO - lowercase_definition
INFO - missing_superclass
";

fn graph() -> OxigraphStore {
    OxigraphStore::load_str(FIXTURE, RdfFormat::Turtle).unwrap()
}

fn profile_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PROFILE.as_bytes()).unwrap();
    file
}

fn entities(report: &ontocheck_report::Report, rule: &str) -> Vec<String> {
    report
        .rule(rule)
        .unwrap()
        .violations
        .iter()
        .map(|v| v.entity.clone())
        .collect()
}

#[test]
fn targeted_profile_finds_each_defect() {
    let profile = profile_file();
    let options = ReportOptions {
        profile: Some(profile.path().to_path_buf()),
        ..ReportOptions::default()
    };
    let report = run_report(&graph(), &options).unwrap();

    assert_eq!(entities(&report, "missing_label"), vec!["http://example.org/Cat"]);
    assert_eq!(
        entities(&report, "duplicate_label"),
        vec!["http://example.org/Dog", "http://example.org/Hound"]
    );
    assert_eq!(
        entities(&report, "deprecated_class_reference"),
        vec!["http://example.org/Kitten"]
    );
    assert_eq!(entities(&report, "invalid_xref"), vec!["http://example.org/Dog"]);
    assert_eq!(entities(&report, "missing_definition"), vec!["http://example.org/Cat"]);
    assert_eq!(
        entities(&report, "missing_obsolete_label"),
        vec!["http://example.org/OldCat"]
    );
    assert_eq!(
        entities(&report, "missing_ontology_license"),
        vec!["http://example.org/onto"]
    );
    assert!(entities(&report, "missing_ontology_title").is_empty());
    assert_eq!(
        entities(&report, "lowercase_definition"),
        vec!["http://example.org/Dog"]
    );
    assert!(entities(&report, "missing_superclass").is_empty());

    assert_eq!(report.total_violations_at(Severity::Error), 5);
    assert_eq!(report.total_violations_at(Severity::Warn), 3);
    assert_eq!(report.total_violations_at(Severity::Info), 1);
    assert_eq!(report.total_violations(), 9);
}

#[test]
fn missing_label_statement_has_property_and_no_value() {
    let profile = profile_file();
    let options = ReportOptions {
        profile: Some(profile.path().to_path_buf()),
        ..ReportOptions::default()
    };
    let report = run_report(&graph(), &options).unwrap();

    let violation = &report.rule("missing_label").unwrap().violations[0];
    assert_eq!(violation.statements.len(), 1);
    assert_eq!(
        violation.statements[0].property,
        "http://www.w3.org/2000/01/rdf-schema#label"
    );
    assert_eq!(violation.statements[0].value, None);
}

#[test]
fn parallel_run_matches_sequential_run() {
    let profile = profile_file();
    let sequential = ReportOptions {
        profile: Some(profile.path().to_path_buf()),
        ..ReportOptions::default()
    };
    let parallel = ReportOptions {
        parallel: true,
        ..sequential.clone()
    };
    let graph = graph();
    let a = run_report(&graph, &sequential).unwrap();
    let b = run_report(&graph, &parallel).unwrap();
    let flatten = |r: &ontocheck_report::Report| {
        r.rules()
            .map(|(name, result)| (name.to_string(), result.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(flatten(&a), flatten(&b));
}

#[test]
fn default_profile_runs_every_bundled_rule() {
    let report = run_report(&graph(), &ReportOptions::default()).unwrap();
    assert_eq!(report.rules().count(), Profile::load(None).unwrap().len());
    assert!(report.total_violations() > 0);
}

#[test]
fn loads_ontology_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.ttl");
    std::fs::write(&path, FIXTURE).unwrap();
    let graph = OxigraphStore::load_path(&path).unwrap();
    assert!(!graph.is_empty().unwrap());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.obo");
    std::fs::write(&path, "format-version: 1.2").unwrap();
    let err = OxigraphStore::load_path(&path).unwrap_err();
    assert!(matches!(err, GraphError::UnknownFormat { .. }));
}

#[test]
fn missing_file_is_open_error() {
    let err = OxigraphStore::load_path(std::path::Path::new("/nonexistent/onto.ttl")).unwrap_err();
    assert!(matches!(err, GraphError::Open { .. }));
}
