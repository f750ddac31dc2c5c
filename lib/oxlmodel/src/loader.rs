use crate::error::Diagnostic;
use crate::factory::NodeFactory;
use crate::node::Node;
use crate::quad::Quad;
use crate::rule::Rule;
use crate::vocab::owl;
use std::collections::BTreeSet;

/// A document loader for one syntax.
///
/// A load reads a whole in-memory document and either returns everything it produced or,
/// on the first structural problem, the diagnostics that explain the failure and nothing else.
pub trait Loader {
    /// What a successful load produces.
    type Output;

    /// Loads `input`, the content of the document identified by the `resource` IRI.
    ///
    /// `resource` is the default base IRI of the document.
    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<Self::Output, Vec<Diagnostic>>;
}

/// The result of an RDF document load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderResult {
    /// The loaded quads in document order.
    pub quads: Vec<Quad>,
    /// The loaded rules, only filled by rule documents.
    pub rules: Vec<Rule>,
    /// The IRIs of the documents imported with `owl:imports`.
    pub imports: BTreeSet<String>,
}

impl LoaderResult {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a quad, recording the target of `owl:imports` statements.
    pub fn push_quad(&mut self, quad: Quad) {
        if quad.predicate == owl::IMPORTS {
            if let Node::Iri(target) = &quad.object {
                self.imports.insert(target.as_str().into());
            }
        }
        self.quads.push(quad);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.rules.is_empty()
    }
}

impl Extend<Quad> for LoaderResult {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        for quad in iter {
            self.push_quad(quad);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::named_node::NamedNode;

    #[test]
    fn imports_are_recorded() {
        let onto = NamedNode::new_unchecked("http://example.com/onto");
        let other = NamedNode::new_unchecked("http://example.com/other");
        let mut result = LoaderResult::new();
        result.push_quad(Quad::new(
            onto.clone(),
            owl::IMPORTS,
            other.clone(),
            onto.clone(),
        ));
        result.push_quad(Quad::new(onto.clone(), onto.clone(), other, onto));
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.imports.iter().collect::<Vec<_>>(),
            ["http://example.com/other"]
        );
    }
}
