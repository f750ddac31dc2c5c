#![allow(clippy::panic_in_result_fn)]

use oxljsonld::ContextFetcher;
use oxlmodel::{InterningNodeFactory, SimpleNodeFactory};
use oxloader::{DocumentFormat, DocumentLoadError, DocumentLoader, FileContextFetcher};
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn format_of(path: &Path) -> Option<DocumentFormat> {
    DocumentFormat::from_extension(path.extension()?.to_str()?)
}

#[test]
fn the_file_url_is_the_default_graph() -> Result<(), Box<dyn Error>> {
    let directory = tempdir()?;
    let path = directory.path().join("data.nt");
    fs::write(
        &path,
        "<http://example.com/s> <http://example.com/p> \"o\" .\n",
    )?;
    let format = format_of(&path).ok_or("unknown extension")?;
    let loaded = DocumentLoader::from_format(format).load_file(&path, &mut SimpleNodeFactory)?;
    let quads = &loaded.as_rdf().ok_or("not RDF")?.quads;
    assert_eq!(quads.len(), 1);
    let graph = quads[0].graph_name.to_string();
    assert!(graph.starts_with("<file:///"), "{graph}");
    assert!(graph.ends_with("/data.nt>"), "{graph}");
    Ok(())
}

#[test]
fn each_extension_selects_its_loader() -> Result<(), Box<dyn Error>> {
    let directory = tempdir()?;
    let documents = [
        (
            "people.ttl",
            "@prefix ex: <http://example.com/> . ex:alice ex:knows ex:bob, ex:carol .",
            2,
        ),
        (
            "people.trig",
            "@prefix ex: <http://example.com/> . ex:g { ex:alice ex:knows ex:bob } ex:alice ex:name \"Alice\" .",
            2,
        ),
        (
            "people.rdf",
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/">
  <rdf:Description rdf:about="http://example.com/alice"><ex:name>Alice</ex:name></rdf:Description>
</rdf:RDF>"#,
            1,
        ),
        (
            "people.jsonld",
            r#"{"@id": "http://example.com/alice", "http://example.com/name": "Alice"}"#,
            1,
        ),
    ];
    for (name, content, count) in documents {
        let path = directory.path().join(name);
        fs::write(&path, content)?;
        let format = format_of(&path).ok_or("unknown extension")?;
        let loaded = DocumentLoader::from_format(format)
            .with_graph("http://example.com/graph")
            .load_file(&path, &mut InterningNodeFactory::default())?;
        let result = loaded.as_rdf().ok_or("not RDF")?;
        assert_eq!(result.quads.len(), count, "{name}");
    }
    Ok(())
}

#[test]
fn ontology_files_are_loaded() -> Result<(), Box<dyn Error>> {
    let directory = tempdir()?;
    let path = directory.path().join("animals.owx");
    fs::write(
        &path,
        r##"<Ontology xmlns="http://www.w3.org/2002/07/owl#" ontologyIRI="http://example.com/animals">
  <Import>http://example.com/life</Import>
  <SubClassOf><Class IRI="#Dog"/><Class IRI="#Animal"/></SubClassOf>
</Ontology>"##,
    )?;
    let format = format_of(&path).ok_or("unknown extension")?;
    assert!(format.supports_ontology());
    let loaded = DocumentLoader::from_format(format).load_file(&path, &mut SimpleNodeFactory)?;
    assert_eq!(loaded.imports(), ["http://example.com/life"]);
    let document = loaded.as_ontology().ok_or("not an ontology")?;
    assert_eq!(document.len(), 1);
    assert!(document.to_string().contains(
        "SubClassOf(<http://example.com/animals#Dog> <http://example.com/animals#Animal>)"
    ));
    Ok(())
}

#[test]
fn remote_contexts_are_read_from_a_directory() -> Result<(), Box<dyn Error>> {
    let directory = tempdir()?;
    fs::write(
        directory.path().join("schema.jsonld"),
        r#"{"@context": {"@vocab": "http://schema.org/"}}"#,
    )?;
    let loaded = DocumentLoader::from_format(DocumentFormat::JsonLd)
        .with_context_fetcher(FileContextFetcher::new(directory.path()))
        .load_str(
            r#"{"@context": "https://example.com/contexts/schema.jsonld", "@id": "http://example.com/alice", "name": "Alice"}"#,
            "http://example.com/alice.jsonld",
            &mut SimpleNodeFactory,
        )
        .map_err(|errors| format!("{errors:?}"))?;
    let quads = &loaded.as_rdf().ok_or("not RDF")?.quads;
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].predicate.as_str(), "http://schema.org/name");
    Ok(())
}

#[test]
fn registered_context_files_come_first() -> Result<(), Box<dyn Error>> {
    let directory = tempdir()?;
    let schema = directory.path().join("schema.jsonld");
    fs::write(&schema, r#"{"@context": {"@vocab": "http://schema.org/"}}"#)?;
    let foaf = directory.path().join("foaf.jsonld");
    fs::write(&foaf, r#"{"@context": {"@vocab": "http://xmlns.com/foaf/0.1/"}}"#)?;
    let fetcher = FileContextFetcher::new(directory.path())
        .with_file("https://example.com/a", &schema)
        .with_file("https://example.com/b", &schema)
        .with_file("https://example.com/b", &foaf);
    assert_eq!(
        fetcher.fetch("https://example.com/a").as_deref(),
        fs::read_to_string(&schema).ok().as_deref()
    );
    assert_eq!(
        fetcher.fetch("https://example.com/b").as_deref(),
        fs::read_to_string(&foaf).ok().as_deref()
    );
    assert!(fetcher.fetch("https://example.com/c").is_none());
    // not registered, found in the directory by name
    assert!(fetcher.fetch("https://other.com/schema.jsonld").is_some());

    let loaded = DocumentLoader::from_format(DocumentFormat::JsonLd)
        .with_context_fetcher(fetcher)
        .load_str(
            r#"{"@context": "https://example.com/b", "@id": "http://example.com/alice", "name": "Alice"}"#,
            "http://example.com/alice.jsonld",
            &mut SimpleNodeFactory,
        )
        .map_err(|errors| format!("{errors:?}"))?;
    let quads = &loaded.as_rdf().ok_or("not RDF")?.quads;
    assert_eq!(quads[0].predicate.as_str(), "http://xmlns.com/foaf/0.1/name");
    Ok(())
}

#[test]
fn missing_files_are_io_errors() {
    let directory = tempdir().unwrap();
    let error = DocumentLoader::from_format(DocumentFormat::Turtle)
        .load_file(directory.path().join("missing.ttl"), &mut SimpleNodeFactory)
        .unwrap_err();
    assert!(matches!(error, DocumentLoadError::Io(_)));
}

#[test]
fn load_errors_keep_their_diagnostics() -> Result<(), Box<dyn Error>> {
    let directory = tempdir()?;
    let path = directory.path().join("broken.ttl");
    fs::write(&path, "<http://example.com/s> <http://example.com/p> .\n")?;
    let error = DocumentLoader::from_format(DocumentFormat::Turtle)
        .load_file(&path, &mut SimpleNodeFactory)
        .unwrap_err();
    let DocumentLoadError::Load(diagnostics) = &error else {
        return Err(format!("unexpected error {error}").into());
    };
    assert!(!diagnostics.is_empty());
    assert!(error.to_string().starts_with("Loader error at line 1"));
    Ok(())
}
