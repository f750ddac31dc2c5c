//! A [N-Triples](https://www.w3.org/TR/n-triples/) loader implemented by [`NTriplesLoader`].

use crate::parser::Syntax;
use crate::terse::load_rdf_document;
use oxlmodel::{Diagnostic, Loader, LoaderResult, NodeFactory};

/// A [N-Triples](https://www.w3.org/TR/n-triples/) loader.
///
/// Relative IRIs are resolved against the document IRI and every triple is put in the graph
/// given with [`NTriplesLoader::with_graph`], the document IRI by default.
///
/// ```
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlttl::NTriplesLoader;
///
/// let file = "<http://example.com/foo> <http://schema.org/name> \"Foo\" .
/// <bar> <http://schema.org/name> \"Bar\"@en .";
///
/// let result = NTriplesLoader::new()
///     .load(file, "http://example.com/data", &mut SimpleNodeFactory)
///     .unwrap();
/// assert_eq!(result.quads.len(), 2);
/// assert_eq!(result.quads[1].subject.to_string(), "<http://example.com/bar>");
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct NTriplesLoader {
    graph: Option<String>,
}

impl NTriplesLoader {
    /// Builds a new [`NTriplesLoader`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the graph the triples are loaded into.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }
}

impl Loader for NTriplesLoader {
    type Output = LoaderResult;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoaderResult, Vec<Diagnostic>> {
        load_rdf_document(
            input,
            Syntax::NTriples,
            resource,
            None,
            self.graph.as_deref(),
            factory,
        )
    }
}
