//! A [Turtle](https://www.w3.org/TR/turtle/) loader implemented by [`TurtleLoader`].

use crate::parser::Syntax;
use crate::terse::load_rdf_document;
use oxlmodel::{Diagnostic, Loader, LoaderResult, NodeFactory};

/// A [Turtle](https://www.w3.org/TR/turtle/) loader.
///
/// Count the number of people:
/// ```
/// use oxlmodel::vocab::rdf;
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlttl::TurtleLoader;
///
/// let file = "@base <http://example.com/> .
/// @prefix schema: <http://schema.org/> .
/// <foo> a schema:Person ;
///     schema:name \"Foo\" .
/// <bar> a schema:Person ;
///     schema:name \"Bar\" .";
///
/// let result = TurtleLoader::new()
///     .load(file, "http://example.com/data", &mut SimpleNodeFactory)
///     .unwrap();
/// let count = result
///     .quads
///     .iter()
///     .filter(|q| q.predicate == rdf::TYPE && q.object.to_string() == "<http://schema.org/Person>")
///     .count();
/// assert_eq!(2, count);
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct TurtleLoader {
    base: Option<String>,
    graph: Option<String>,
}

impl TurtleLoader {
    /// Builds a new [`TurtleLoader`].
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

    /// Sets the graph the triples are loaded into, the document IRI by default.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }
}

impl Loader for TurtleLoader {
    type Output = LoaderResult;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoaderResult, Vec<Diagnostic>> {
        load_rdf_document(
            input,
            Syntax::Turtle,
            resource,
            self.base.as_deref(),
            self.graph.as_deref(),
            factory,
        )
    }
}
