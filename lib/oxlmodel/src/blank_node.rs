use rand::random;
use std::fmt;

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// Its identity is an opaque 128 bits random number minted by a [`NodeFactory`](crate::NodeFactory).
/// Labels written in documents never become identities: they are mapped to fresh nodes
/// by a [`BlankScope`](crate::BlankScope).
///
/// The default string formatter is returning an N-Triples compatible representation:
/// ```
/// use oxlmodel::BlankNode;
///
/// assert!(BlankNode::new_unique().to_string().starts_with("_:"));
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct BlankNode {
    id: u128,
}

impl BlankNode {
    /// Mints a new blank node with a random identity.
    pub fn new_unique() -> Self {
        // We ensure the hexadecimal form does not start with a number to be also valid with RDF/XML
        loop {
            let id: u128 = random();
            if id >> 124 >= 0xA {
                return Self { id };
            }
        }
    }

    #[inline]
    pub fn from_id(id: u128) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(self) -> u128 {
        self.id
    }
}

impl fmt::Display for BlankNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{:032x}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_nodes_are_distinct() {
        assert_ne!(BlankNode::new_unique(), BlankNode::new_unique());
    }

    #[test]
    fn display_starts_with_letter() {
        let node = BlankNode::new_unique().to_string();
        assert!(matches!(node.as_bytes()[2], b'a'..=b'f'), "{node}");
        assert_eq!(node.len(), 34);
    }
}
