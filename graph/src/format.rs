//! RDF syntax detection from file names.

use std::path::Path;

use oxigraph::io::RdfFormat;

/// Picks the RDF syntax for an ontology file from its extension.
///
/// OWL ontologies are usually published as RDF/XML under `.owl`, so `.owl`,
/// `.rdf` and `.xml` all select RDF/XML. Other extensions follow the
/// registered media-type extensions (`.ttl`, `.nt`, `.nq`, `.trig`, `.n3`).
#[must_use]
pub fn format_for_path(path: &Path) -> Option<RdfFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
        other => RdfFormat::from_extension(other),
    }
}

/// Parses a syntax name given on the command line (`turtle`, `ntriples`,
/// `rdfxml`, ...) or a file extension.
#[must_use]
pub fn format_from_name(name: &str) -> Option<RdfFormat> {
    match name.to_ascii_lowercase().as_str() {
        "turtle" => Some(RdfFormat::Turtle),
        "ntriples" | "n-triples" => Some(RdfFormat::NTriples),
        "nquads" | "n-quads" => Some(RdfFormat::NQuads),
        "trig" => Some(RdfFormat::TriG),
        "n3" => Some(RdfFormat::N3),
        "rdfxml" | "rdf/xml" | "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
        other => RdfFormat::from_extension(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_extensions() {
        assert_eq!(format_for_path(Path::new("a.ttl")), Some(RdfFormat::Turtle));
        assert_eq!(format_for_path(Path::new("a.TTL")), Some(RdfFormat::Turtle));
        assert_eq!(format_for_path(Path::new("a.nt")), Some(RdfFormat::NTriples));
        assert_eq!(format_for_path(Path::new("a.owl")), Some(RdfFormat::RdfXml));
        assert_eq!(format_for_path(Path::new("a.rdf")), Some(RdfFormat::RdfXml));
        assert_eq!(format_for_path(Path::new("a.obo")), None);
        assert_eq!(format_for_path(Path::new("noext")), None);
    }

    #[test]
    fn names_and_extensions() {
        assert_eq!(format_from_name("Turtle"), Some(RdfFormat::Turtle));
        assert_eq!(format_from_name("rdfxml"), Some(RdfFormat::RdfXml));
        assert_eq!(format_from_name("nt"), Some(RdfFormat::NTriples));
        assert_eq!(format_from_name("obo"), None);
    }
}
