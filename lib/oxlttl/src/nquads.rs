//! A [N-Quads](https://www.w3.org/TR/n-quads/) loader implemented by [`NQuadsLoader`].

use crate::parser::Syntax;
use crate::terse::load_rdf_document;
use oxlmodel::{Diagnostic, Loader, LoaderResult, NodeFactory};

/// A [N-Quads](https://www.w3.org/TR/n-quads/) loader.
///
/// Statements without graph label are put in the graph given with [`NQuadsLoader::with_graph`],
/// the document IRI by default.
///
/// ```
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlttl::NQuadsLoader;
///
/// let file = "<http://example.com/foo> <http://schema.org/name> \"Foo\" <http://example.com/g> .
/// <http://example.com/bar> <http://schema.org/name> \"Bar\" .";
///
/// let result = NQuadsLoader::new()
///     .load(file, "http://example.com/data", &mut SimpleNodeFactory)
///     .unwrap();
/// assert_eq!(result.quads[0].graph_name.to_string(), "<http://example.com/g>");
/// assert_eq!(result.quads[1].graph_name.to_string(), "<http://example.com/data>");
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct NQuadsLoader {
    graph: Option<String>,
}

impl NQuadsLoader {
    /// Builds a new [`NQuadsLoader`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the graph of the statements without graph label.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }
}

impl Loader for NQuadsLoader {
    type Output = LoaderResult;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoaderResult, Vec<Diagnostic>> {
        load_rdf_document(
            input,
            Syntax::NQuads,
            resource,
            None,
            self.graph.as_deref(),
            factory,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxlmodel::SimpleNodeFactory;

    #[test]
    fn blank_graph_labels_share_the_document_scope() {
        let result = NQuadsLoader::new()
            .load(
                "_:g <http://ex.com/p> _:g _:g .\n_:g <http://ex.com/p> _:h .\n",
                "http://example.com/doc",
                &mut SimpleNodeFactory,
            )
            .unwrap();
        assert_eq!(result.len(), 2);
        let quad = &result.quads[0];
        assert_eq!(quad.subject, quad.graph_name);
        assert_eq!(result.quads[1].subject, quad.subject);
        assert_eq!(
            result.quads[1].graph_name.to_string(),
            "<http://example.com/doc>"
        );
    }

    #[test]
    fn literal_graph_label_is_an_error() {
        assert!(
            NQuadsLoader::new()
                .load(
                    "<http://ex.com/s> <http://ex.com/p> <http://ex.com/o> \"g\" .",
                    "http://example.com/doc",
                    &mut SimpleNodeFactory,
                )
                .is_err()
        );
    }

    #[test]
    fn each_load_has_its_own_blank_nodes() {
        let loader = NQuadsLoader::new();
        let input = "_:a <http://ex.com/p> <http://ex.com/o> .";
        let first = loader
            .load(input, "http://example.com/doc", &mut SimpleNodeFactory)
            .unwrap();
        let second = loader
            .load(input, "http://example.com/doc", &mut SimpleNodeFactory)
            .unwrap();
        assert_ne!(first.quads[0].subject, second.quads[0].subject);
    }
}
