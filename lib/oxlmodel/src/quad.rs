use crate::named_node::NamedNode;
use crate::node::{GraphNode, NamedNodePattern, Node, SubjectNode};
use std::fmt;

/// A [triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple) in a [RDF graph](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-graph).
///
/// Loaders always fill the graph name: statements outside of any named graph construct use the
/// graph node configured on the loader.
///
/// The default string formatter is returning an N-Quads compatible representation:
/// ```
/// use oxlmodel::{NamedNode, Quad};
///
/// let ex = NamedNode::new_unchecked("http://example.com");
/// assert_eq!(
///     "<http://example.com> <http://example.com> <http://example.com> <http://example.com> .",
///     Quad::new(ex.clone(), ex.clone(), ex.clone(), ex).to_string()
/// );
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Quad {
    pub subject: SubjectNode,
    pub predicate: NamedNode,
    pub object: Node,
    pub graph_name: GraphNode,
}

impl Quad {
    #[inline]
    pub fn new(
        subject: impl Into<SubjectNode>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Node>,
        graph_name: impl Into<GraphNode>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }
}

impl fmt::Display for Quad {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} .",
            self.subject, self.predicate, self.object, self.graph_name
        )
    }
}

/// A quad whose subject, predicate and object may be rule variables.
///
/// The subject is never a literal.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct QuadPattern {
    pub subject: Node,
    pub predicate: NamedNodePattern,
    pub object: Node,
    pub graph_name: GraphNode,
}

impl QuadPattern {
    #[inline]
    pub fn new(
        subject: impl Into<Node>,
        predicate: impl Into<NamedNodePattern>,
        object: impl Into<Node>,
        graph_name: impl Into<GraphNode>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }
}

impl fmt::Display for QuadPattern {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} .",
            self.subject, self.predicate, self.object, self.graph_name
        )
    }
}
