use crate::error::DocumentLoadError;
use crate::format::DocumentFormat;
use oxljsonld::{ContextFetcher, JsonLdLoader, NoContextFetcher};
use oxlmodel::{Diagnostic, Loader, LoaderResult, NodeFactory};
use oxlowl::{FunctionalOwlLoader, OntologyDocument, OwlXmlLoader};
use oxlrdfxml::RdfXmlLoader;
use oxlttl::{NQuadsLoader, NTriplesLoader, RdftLoader, TriGLoader, TurtleLoader};
use std::path::Path;
use std::sync::Arc;
use std::{fmt, fs, io};
use tracing::debug;
use url::Url;

/// Loads documents of any [`DocumentFormat`].
///
/// Note the useful options:
/// - [`with_base_iri`](Self::with_base_iri) to resolve the relative IRIs against another IRI than the document one.
/// - [`with_graph`](Self::with_graph) to load the RDF triples into another graph than the document one.
/// - [`with_context_fetcher`](Self::with_context_fetcher) to give access to the JSON-LD remote contexts.
///
/// ```
/// use oxlmodel::SimpleNodeFactory;
/// use oxloader::{DocumentFormat, DocumentLoader, LoadedDocument};
///
/// let file = "<http://example.com/s> <http://example.com/p> <http://example.com/o> .";
///
/// let loaded = DocumentLoader::from_format(DocumentFormat::NTriples)
///     .load_str(file, "http://example.com/data.nt", &mut SimpleNodeFactory)
///     .unwrap();
/// let LoadedDocument::Rdf(result) = loaded else {
///     unreachable!()
/// };
/// assert_eq!(result.quads.len(), 1);
/// assert_eq!(
///     result.quads[0].graph_name.to_string(),
///     "<http://example.com/data.nt>"
/// );
/// ```
#[derive(Clone)]
#[must_use]
pub struct DocumentLoader {
    format: DocumentFormat,
    base: Option<String>,
    graph: Option<String>,
    meta_graph: Option<String>,
    target_graph: Option<String>,
    context_fetcher: Arc<dyn ContextFetcher + Send + Sync>,
}

impl DocumentLoader {
    /// Builds a loader for the given format.
    #[inline]
    pub fn from_format(format: DocumentFormat) -> Self {
        Self {
            format,
            base: None,
            graph: None,
            meta_graph: None,
            target_graph: None,
            context_fetcher: Arc::new(NoContextFetcher),
        }
    }

    /// The format the loader reads.
    #[inline]
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Sets the base IRI, the document IRI by default.
    ///
    /// N-Triples and N-Quads have no base IRI and always resolve against the document IRI.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base = Some(base_iri.into());
        self
    }

    /// Sets the graph the RDF triples and the RDFT source patterns are loaded into, the document IRI by default.
    ///
    /// It has no effect on the OWL formats.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }

    /// Sets the meta graph of the RDFT rules.
    #[inline]
    pub fn with_meta_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.meta_graph = Some(graph_iri.into());
        self
    }

    /// Sets the target graph of the RDFT rule consequents.
    #[inline]
    pub fn with_target_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.target_graph = Some(graph_iri.into());
        self
    }

    /// Sets how the JSON-LD remote contexts are retrieved, none is available by default.
    #[inline]
    pub fn with_context_fetcher(
        mut self,
        context_fetcher: impl ContextFetcher + Send + Sync + 'static,
    ) -> Self {
        self.context_fetcher = Arc::new(context_fetcher);
        self
    }

    /// Loads `input`, the content of the document identified by the `resource` IRI.
    pub fn load_str<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoadedDocument, Vec<Diagnostic>> {
        debug!("Loading {resource} as {}", self.format);
        Ok(match self.format {
            DocumentFormat::NTriples => LoadedDocument::Rdf(
                self.graph(NTriplesLoader::new(), NTriplesLoader::with_graph)
                    .load(input, resource, factory)?,
            ),
            DocumentFormat::NQuads => LoadedDocument::Rdf(
                self.graph(NQuadsLoader::new(), NQuadsLoader::with_graph)
                    .load(input, resource, factory)?,
            ),
            DocumentFormat::Turtle => {
                let loader = self.graph(TurtleLoader::new(), TurtleLoader::with_graph);
                LoadedDocument::Rdf(
                    self.base(loader, TurtleLoader::with_base_iri)
                        .load(input, resource, factory)?,
                )
            }
            DocumentFormat::TriG => {
                let loader = self.graph(TriGLoader::new(), TriGLoader::with_graph);
                LoadedDocument::Rdf(
                    self.base(loader, TriGLoader::with_base_iri)
                        .load(input, resource, factory)?,
                )
            }
            DocumentFormat::RdfXml => {
                let loader = self.graph(RdfXmlLoader::new(), RdfXmlLoader::with_graph);
                LoadedDocument::Rdf(
                    self.base(loader, RdfXmlLoader::with_base_iri)
                        .load(input, resource, factory)?,
                )
            }
            DocumentFormat::JsonLd => {
                let loader = JsonLdLoader::new().with_context_fetcher(Arc::clone(&self.context_fetcher));
                let loader = self.graph(loader, JsonLdLoader::with_graph);
                LoadedDocument::Rdf(
                    self.base(loader, JsonLdLoader::with_base_iri)
                        .load(input, resource, factory)?,
                )
            }
            DocumentFormat::Rdft => {
                let mut loader = self.graph(RdftLoader::new(), RdftLoader::with_graph);
                loader = self.base(loader, RdftLoader::with_base_iri);
                if let Some(meta_graph) = &self.meta_graph {
                    loader = loader.with_meta_graph(meta_graph.as_str());
                }
                if let Some(target_graph) = &self.target_graph {
                    loader = loader.with_target_graph(target_graph.as_str());
                }
                LoadedDocument::Rdf(loader.load(input, resource, factory)?)
            }
            DocumentFormat::FunctionalOwl => LoadedDocument::Ontology(
                self.base(FunctionalOwlLoader::new(), FunctionalOwlLoader::with_base_iri)
                    .load(input, resource, factory)?,
            ),
            DocumentFormat::OwlXml => LoadedDocument::Ontology(
                self.base(OwlXmlLoader::new(), OwlXmlLoader::with_base_iri)
                    .load(input, resource, factory)?,
            ),
        })
    }

    /// Reads the whole file at `path` and loads it.
    ///
    /// The document IRI is the `file:` URL of the absolute path of the file.
    ///
    /// ```
    /// use oxlmodel::SimpleNodeFactory;
    /// use oxloader::{DocumentFormat, DocumentLoader};
    ///
    /// let directory = tempfile::tempdir()?;
    /// let path = directory.path().join("data.ttl");
    /// std::fs::write(&path, "<s> <p> <o> .")?;
    ///
    /// let loaded =
    ///     DocumentLoader::from_format(DocumentFormat::Turtle).load_file(&path, &mut SimpleNodeFactory)?;
    /// assert_eq!(loaded.as_rdf().map(|r| r.quads.len()), Some(1));
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn load_file<F: NodeFactory>(
        &self,
        path: impl AsRef<Path>,
        factory: &mut F,
    ) -> Result<LoadedDocument, DocumentLoadError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)?;
        let resource = file_iri(path)?;
        Ok(self.load_str(&input, &resource, factory)?)
    }

    fn graph<L>(&self, loader: L, with_graph: impl FnOnce(L, String) -> L) -> L {
        match &self.graph {
            Some(graph) => with_graph(loader, graph.clone()),
            None => loader,
        }
    }

    fn base<L>(&self, loader: L, with_base_iri: impl FnOnce(L, String) -> L) -> L {
        match &self.base {
            Some(base) => with_base_iri(loader, base.clone()),
            None => loader,
        }
    }
}

impl fmt::Debug for DocumentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentLoader")
            .field("format", &self.format)
            .field("base", &self.base)
            .field("graph", &self.graph)
            .field("meta_graph", &self.meta_graph)
            .field("target_graph", &self.target_graph)
            .finish_non_exhaustive()
    }
}

/// The `file:` URL of a path, made absolute against the current directory.
fn file_iri(path: &Path) -> io::Result<String> {
    let path = std::path::absolute(path)?;
    Url::from_file_path(&path)
        .map(String::from)
        .map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} cannot be written as a file: URL", path.display()),
            )
        })
}

/// What a [`DocumentLoader`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedDocument {
    /// The quads, rules and imports of an RDF or RDFT document.
    Rdf(LoaderResult),
    /// An OWL ontology.
    Ontology(OntologyDocument),
}

impl LoadedDocument {
    #[inline]
    pub fn as_rdf(&self) -> Option<&LoaderResult> {
        match self {
            Self::Rdf(result) => Some(result),
            Self::Ontology(_) => None,
        }
    }

    #[inline]
    pub fn as_ontology(&self) -> Option<&OntologyDocument> {
        match self {
            Self::Ontology(document) => Some(document),
            Self::Rdf(_) => None,
        }
    }

    /// The IRIs of the documents imported with `owl:imports` or `Import`.
    pub fn imports(&self) -> Vec<&str> {
        match self {
            Self::Rdf(result) => result.imports.iter().map(String::as_str).collect(),
            Self::Ontology(document) => document.imports.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxljsonld::StaticContextFetcher;
    use oxlmodel::SimpleNodeFactory;

    #[test]
    fn graph_and_base_are_forwarded() {
        let loaded = DocumentLoader::from_format(DocumentFormat::Turtle)
            .with_base_iri("http://example.com/base/")
            .with_graph("http://example.com/graph")
            .load_str("<s> <p> <o> .", "http://example.com/doc.ttl", &mut SimpleNodeFactory)
            .unwrap();
        let quad = &loaded.as_rdf().unwrap().quads[0];
        assert_eq!(quad.graph_name.to_string(), "<http://example.com/graph>");
        assert_eq!(quad.subject.to_string(), "<http://example.com/base/s>");
    }

    #[test]
    fn context_fetcher_is_forwarded() {
        let loaded = DocumentLoader::from_format(DocumentFormat::JsonLd)
            .with_context_fetcher(StaticContextFetcher::new().with_document(
                "http://example.com/context",
                r#"{"@context": {"@vocab": "http://schema.org/"}}"#,
            ))
            .load_str(
                r#"{"@context": "http://example.com/context", "@id": "http://example.com/a", "name": "A"}"#,
                "http://example.com/doc.jsonld",
                &mut SimpleNodeFactory,
            )
            .unwrap();
        assert_eq!(
            loaded.as_rdf().unwrap().quads[0].predicate.as_str(),
            "http://schema.org/name"
        );
    }

    #[test]
    fn ontologies_are_loaded() {
        let loaded = DocumentLoader::from_format(DocumentFormat::FunctionalOwl)
            .load_str(
                "Ontology(<http://example.com/o> Import(<http://example.com/i>) Declaration(Class(<A>)))",
                "http://example.com/o.ofn",
                &mut SimpleNodeFactory,
            )
            .unwrap();
        assert_eq!(loaded.imports(), ["http://example.com/i"]);
        assert_eq!(loaded.as_ontology().map(OntologyDocument::len), Some(1));
    }

    #[test]
    fn errors_are_returned() {
        let errors = DocumentLoader::from_format(DocumentFormat::NTriples)
            .load_str("<s> <p> .", "http://example.com/doc.nt", &mut SimpleNodeFactory)
            .unwrap_err();
        assert!(!errors.is_empty());
    }
}
