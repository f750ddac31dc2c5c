//! A [TriG](https://www.w3.org/TR/trig/) loader implemented by [`TriGLoader`].

use crate::parser::Syntax;
use crate::terse::load_rdf_document;
use oxlmodel::{Diagnostic, Loader, LoaderResult, NodeFactory};

/// A [TriG](https://www.w3.org/TR/trig/) loader.
///
/// Triples outside of named graph blocks go to the graph given with [`TriGLoader::with_graph`],
/// the document IRI by default.
///
/// ```
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlttl::TriGLoader;
///
/// let file = "@base <http://example.com/> .
/// @prefix schema: <http://schema.org/> .
/// <foo> a schema:Person .
/// <people> { <bar> a schema:Person . }";
///
/// let result = TriGLoader::new()
///     .load(file, "http://example.com/data", &mut SimpleNodeFactory)
///     .unwrap();
/// assert_eq!(result.quads[0].graph_name.to_string(), "<http://example.com/data>");
/// assert_eq!(result.quads[1].graph_name.to_string(), "<http://example.com/people>");
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct TriGLoader {
    base: Option<String>,
    graph: Option<String>,
}

impl TriGLoader {
    /// Builds a new [`TriGLoader`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base IRI, the document IRI by default.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base = Some(base_iri.into());
        self
    }

    /// Sets the default graph.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }
}

impl Loader for TriGLoader {
    type Output = LoaderResult;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoaderResult, Vec<Diagnostic>> {
        load_rdf_document(
            input,
            Syntax::TriG,
            resource,
            self.base.as_deref(),
            self.graph.as_deref(),
            factory,
        )
    }
}
