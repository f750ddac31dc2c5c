//! Creation of the nodes emitted by the loaders.

use crate::blank_node::BlankNode;
use crate::literal::Literal;
use crate::named_node::NamedNode;
use crate::vocab::rdf;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

/// Creates the IRI, blank and literal nodes a loader emits.
///
/// Loaders never build nodes themselves: a store plugs its own factory to intern nodes
/// the way it wants.
pub trait NodeFactory {
    /// Returns the node for an absolute IRI.
    fn iri_node(&mut self, iri: &str) -> NamedNode;

    /// Returns a new blank node, distinct from every node returned before.
    fn blank_node(&mut self) -> BlankNode;

    /// Returns a literal node.
    ///
    /// A language is only kept with the `rdf:langString` datatype.
    fn literal_node(&mut self, lexical: &str, datatype: &str, language: Option<&str>) -> Literal {
        if language.is_some() && datatype != rdf::LANG_STRING.as_str() {
            debug!("Dropping the language tag of literal {lexical:?} typed with <{datatype}>");
        }
        let datatype = self.iri_node(datatype);
        Literal::new(lexical, datatype, language.map(Into::into))
    }
}

/// A factory allocating a new string for every IRI node.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleNodeFactory;

impl NodeFactory for SimpleNodeFactory {
    #[inline]
    fn iri_node(&mut self, iri: &str) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    #[inline]
    fn blank_node(&mut self) -> BlankNode {
        BlankNode::new_unique()
    }
}

/// A factory interning IRIs: equal IRIs returned by the same factory share one allocation.
///
/// ```
/// use oxlmodel::{InterningNodeFactory, NodeFactory};
///
/// let mut factory = InterningNodeFactory::default();
/// let a = factory.iri_node("http://example.com/a");
/// let b = factory.iri_node("http://example.com/a");
/// assert!(a.ptr_eq(&b));
/// assert_eq!(factory.len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InterningNodeFactory {
    iris: FxHashSet<Arc<str>>,
}

impl InterningNodeFactory {
    /// Number of distinct interned IRIs.
    pub fn len(&self) -> usize {
        self.iris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iris.is_empty()
    }
}

impl NodeFactory for InterningNodeFactory {
    fn iri_node(&mut self, iri: &str) -> NamedNode {
        if let Some(interned) = self.iris.get(iri) {
            return NamedNode::from_shared(Arc::clone(interned));
        }
        let interned: Arc<str> = Arc::from(iri);
        self.iris.insert(Arc::clone(&interned));
        NamedNode::from_shared(interned)
    }

    #[inline]
    fn blank_node(&mut self) -> BlankNode {
        BlankNode::new_unique()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;

    #[test]
    fn interning_shares_allocations() {
        let mut factory = InterningNodeFactory::default();
        let a = factory.iri_node("http://example.com/a");
        let b = factory.iri_node("http://example.com/b");
        let a2 = factory.iri_node("http://example.com/a");
        assert!(a.ptr_eq(&a2));
        assert!(!a.ptr_eq(&b));
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn literal_datatype_is_interned() {
        let mut factory = InterningNodeFactory::default();
        let first = factory.literal_node("1", xsd::INTEGER.as_str(), None);
        let second = factory.literal_node("2", xsd::INTEGER.as_str(), None);
        assert!(first.datatype().ptr_eq(second.datatype()));
    }

    #[test]
    fn literal_language_needs_lang_string() {
        let mut factory = SimpleNodeFactory;
        let tagged = factory.literal_node("chat", rdf::LANG_STRING.as_str(), Some("fr"));
        assert_eq!(tagged.language(), Some("fr"));
        let typed = factory.literal_node("chat", xsd::STRING.as_str(), Some("fr"));
        assert_eq!(typed.language(), None);
    }
}
