use crate::blank_node::BlankNode;
use crate::literal::Literal;
use crate::named_node::{NamedNode, NamedNodeRef};
use crate::variable::Variable;
use std::fmt;

/// Any node produced by a loader: an IRI, a blank node, a literal or a rule variable.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Node {
    Iri(NamedNode),
    Blank(BlankNode),
    Literal(Literal),
    Variable(Variable),
}

impl Node {
    #[inline]
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Returns the IRI string if this node is an IRI.
    #[inline]
    pub fn as_iri(&self) -> Option<&NamedNode> {
        if let Self::Iri(iri) = self {
            Some(iri)
        } else {
            None
        }
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&Literal> {
        if let Self::Literal(literal) = self {
            Some(literal)
        } else {
            None
        }
    }

    /// Converts this node into a subject if it is an IRI or a blank node.
    #[inline]
    pub fn into_subject(self) -> Option<SubjectNode> {
        match self {
            Self::Iri(node) => Some(SubjectNode::Iri(node)),
            Self::Blank(node) => Some(SubjectNode::Blank(node)),
            Self::Literal(_) | Self::Variable(_) => None,
        }
    }
}

impl fmt::Display for Node {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(node) => node.fmt(f),
            Self::Blank(node) => node.fmt(f),
            Self::Literal(node) => node.fmt(f),
            Self::Variable(node) => node.fmt(f),
        }
    }
}

impl From<NamedNode> for Node {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::Iri(node)
    }
}

impl From<NamedNodeRef<'_>> for Node {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::Iri(node.into_owned())
    }
}

impl From<BlankNode> for Node {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::Blank(node)
    }
}

impl From<Literal> for Node {
    #[inline]
    fn from(node: Literal) -> Self {
        Self::Literal(node)
    }
}

impl From<Variable> for Node {
    #[inline]
    fn from(node: Variable) -> Self {
        Self::Variable(node)
    }
}

impl From<SubjectNode> for Node {
    #[inline]
    fn from(node: SubjectNode) -> Self {
        match node {
            SubjectNode::Iri(node) => Self::Iri(node),
            SubjectNode::Blank(node) => Self::Blank(node),
        }
    }
}

/// The restriction of [`Node`] to IRIs and blank nodes, i.e. what can be a quad subject or graph name.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum SubjectNode {
    Iri(NamedNode),
    Blank(BlankNode),
}

/// The node naming the graph of a quad.
pub type GraphNode = SubjectNode;

impl SubjectNode {
    #[inline]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    #[inline]
    pub fn as_iri(&self) -> Option<&NamedNode> {
        if let Self::Iri(iri) = self {
            Some(iri)
        } else {
            None
        }
    }
}

impl fmt::Display for SubjectNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(node) => node.fmt(f),
            Self::Blank(node) => node.fmt(f),
        }
    }
}

impl From<NamedNode> for SubjectNode {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::Iri(node)
    }
}

impl From<NamedNodeRef<'_>> for SubjectNode {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::Iri(node.into_owned())
    }
}

impl From<BlankNode> for SubjectNode {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::Blank(node)
    }
}

/// An IRI or a variable, the predicate position of a rule pattern.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum NamedNodePattern {
    Iri(NamedNode),
    Variable(Variable),
}

impl fmt::Display for NamedNodePattern {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(node) => node.fmt(f),
            Self::Variable(node) => node.fmt(f),
        }
    }
}

impl From<NamedNode> for NamedNodePattern {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::Iri(node)
    }
}

impl From<Variable> for NamedNodePattern {
    #[inline]
    fn from(node: Variable) -> Self {
        Self::Variable(node)
    }
}
