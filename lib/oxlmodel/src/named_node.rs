use std::fmt;
use std::sync::Arc;

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri) node.
///
/// The IRI string is shared: cloning a node is a reference count increment, and
/// [`InterningNodeFactory`](crate::InterningNodeFactory) makes equal IRIs share one allocation.
///
/// The default string formatter is returning an N-Triples compatible representation:
/// ```
/// use oxlmodel::NamedNode;
///
/// assert_eq!(
///     "<http://example.com/foo>",
///     NamedNode::new_unchecked("http://example.com/foo").to_string()
/// );
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct NamedNode {
    iri: Arc<str>,
}

impl NamedNode {
    /// Builds an IRI node from a string.
    ///
    /// It is the caller's responsibility to ensure that `iri` is an absolute IRI,
    /// loaders resolve references with [`resolve_relative`](crate::uri::resolve_relative) first.
    #[inline]
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self {
            iri: Arc::from(iri.into()),
        }
    }

    #[inline]
    pub(crate) fn from_shared(iri: Arc<str>) -> Self {
        Self { iri }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    #[inline]
    pub fn as_ref(&self) -> NamedNodeRef<'_> {
        NamedNodeRef::new_unchecked(&self.iri)
    }

    /// Returns `true` if both nodes share the same IRI allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.iri, &other.iri)
    }
}

impl fmt::Display for NamedNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl PartialEq<str> for NamedNode {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for NamedNode {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A borrowed IRI, mostly used for vocabulary constants.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct NamedNodeRef<'a> {
    iri: &'a str,
}

impl<'a> NamedNodeRef<'a> {
    /// Builds a borrowed IRI node from a string.
    ///
    /// It is the caller's responsibility to ensure that `iri` is an absolute IRI.
    #[inline]
    pub const fn new_unchecked(iri: &'a str) -> Self {
        Self { iri }
    }

    #[inline]
    pub const fn as_str(self) -> &'a str {
        self.iri
    }

    #[inline]
    pub fn into_owned(self) -> NamedNode {
        NamedNode::new_unchecked(self.iri)
    }
}

impl fmt::Display for NamedNodeRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

impl From<NamedNodeRef<'_>> for NamedNode {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        node.into_owned()
    }
}

impl<'a> From<&'a NamedNode> for NamedNodeRef<'a> {
    #[inline]
    fn from(node: &'a NamedNode) -> Self {
        node.as_ref()
    }
}

impl PartialEq<NamedNode> for NamedNodeRef<'_> {
    #[inline]
    fn eq(&self, other: &NamedNode) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<NamedNodeRef<'_>> for NamedNode {
    #[inline]
    fn eq(&self, other: &NamedNodeRef<'_>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<str> for NamedNodeRef<'_> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}
