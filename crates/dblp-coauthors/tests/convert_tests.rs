//! Dump conversion feeding the loader.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;

use dblp_coauthors::convert::convert_dump;
use dblp_coauthors::models::{Matcher, PublicationType};
use dblp_coauthors::resolver::{Resolution, resolve};
use dblp_coauthors::{Config, ConvertError, DblpStore};

const DUMP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:dblp="https://dblp.org/rdf/schema#">
<dblp:Inproceedings rdf:about="https://dblp.org/rec/conf/x/LovelaceT22">
  <dblp:title>Thinking Machines.</dblp:title>
  <dblp:yearOfPublication>2022</dblp:yearOfPublication>
  <dblp:authoredBy rdf:resource="https://dblp.org/pid/1"/>
  <dblp:authoredBy rdf:resource="https://dblp.org/pid/3"/>
  <dblp:hasSignature>
    <dblp:AuthorSignature>
      <dblp:signatureCreator rdf:resource="https://dblp.org/pid/1"/>
      <dblp:signatureDblpName>Ada Lovelace</dblp:signatureDblpName>
      <dblp:signatureOrcid rdf:resource="https://orcid.org/0000-0001"/>
    </dblp:AuthorSignature>
  </dblp:hasSignature>
  <dblp:hasSignature>
    <dblp:AuthorSignature>
      <dblp:signatureCreator rdf:resource="https://dblp.org/pid/3"/>
      <dblp:signatureDblpName>Alan Turing</dblp:signatureDblpName>
    </dblp:AuthorSignature>
  </dblp:hasSignature>
</dblp:Inproceedings>
<dblp:Book rdf:about="https://dblp.org/rec/books/x/Godel31">
  <dblp:title>Undecidable Propositions</dblp:title>
  <dblp:yearOfPublication>1931</dblp:yearOfPublication>
  <dblp:authoredBy rdf:resource="https://dblp.org/pid/5"/>
  <dblp:hasSignature>
    <dblp:AuthorSignature>
      <dblp:signatureCreator rdf:resource="https://dblp.org/pid/5"/>
      <dblp:signatureDblpName>Kurt Gödel</dblp:signatureDblpName>
    </dblp:AuthorSignature>
  </dblp:hasSignature>
</dblp:Book>
</rdf:RDF>
"#;

fn write_dump(path: &std::path::Path) {
    let mut encoder = GzEncoder::new(std::fs::File::create(path).unwrap(), Compression::default());
    encoder.write_all(DUMP.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn test_converted_snapshot_loads_and_searches() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dblp.rdf.gz");
    write_dump(&dump);
    let out = dir.path().join("snapshot");

    let stats = convert_dump(&dump, &out).unwrap();
    assert_eq!((stats.papers, stats.authors, stats.links, stats.skipped_entries), (2, 3, 3, 0));

    let store = DblpStore::load(&Config::for_testing(&out)).unwrap();
    let Resolution::Matches(hits) = resolve(&store, "Gödel, Kurt", Matcher::StartsWith).unwrap() else {
        panic!("expected a match");
    };
    assert_eq!(hits.authors[0].name, "Kurt G&#246;del");
    let Resolution::Matches(fuzzy) = resolve(&store, "Gödel", Matcher::Like).unwrap() else {
        panic!("expected a fuzzy match");
    };
    assert_eq!(fuzzy.authors, hits.authors);

    let rows = store.find_copapers(&[1], 2020).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.author.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Alan Turing"]);
    assert_eq!(rows[0].paper.kind, PublicationType::Inproceedings);
    assert_eq!(rows[0].paper.dblp.as_deref(), Some("https://dblp.org/rec/conf/x/LovelaceT22"));
    assert_eq!(rows[0].author.orcid.as_deref(), Some("https://orcid.org/0000-0001"));
}

#[test]
fn test_missing_dump() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_dump(&dir.path().join("absent.rdf.gz"), dir.path()).unwrap_err();
    assert!(matches!(err, ConvertError::MissingDump(_)));
}
