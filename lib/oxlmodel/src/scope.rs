use crate::blank_node::BlankNode;
use crate::factory::NodeFactory;
use rustc_hash::FxHashMap;

/// Maps the blank node labels of one document to blank node identities.
///
/// A scope lives as long as one load: the same label always gives back the same node
/// inside a scope, and two scopes never share nodes.
///
/// ```
/// use oxlmodel::{BlankScope, SimpleNodeFactory};
///
/// let mut factory = SimpleNodeFactory;
/// let mut scope = BlankScope::new();
/// let x = scope.resolve("x", &mut factory);
/// assert_eq!(x, scope.resolve("x", &mut factory));
/// assert_ne!(x, scope.fresh(&mut factory));
/// ```
#[derive(Debug, Default, Clone)]
pub struct BlankScope {
    labels: FxHashMap<String, BlankNode>,
}

impl BlankScope {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `label`, minting it on first use.
    pub fn resolve(&mut self, label: &str, factory: &mut impl NodeFactory) -> BlankNode {
        if let Some(node) = self.labels.get(label) {
            return *node;
        }
        let node = factory.blank_node();
        self.labels.insert(label.to_owned(), node);
        node
    }

    /// Returns a new anonymous node that no label maps to.
    #[inline]
    pub fn fresh(&mut self, factory: &mut impl NodeFactory) -> BlankNode {
        factory.blank_node()
    }

    /// Number of labels seen so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::SimpleNodeFactory;

    #[test]
    fn same_label_same_node() {
        let mut factory = SimpleNodeFactory;
        let mut scope = BlankScope::new();
        let a = scope.resolve("a", &mut factory);
        let b = scope.resolve("b", &mut factory);
        assert_eq!(a, scope.resolve("a", &mut factory));
        assert_ne!(a, b);
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn scopes_are_independent() {
        let mut factory = SimpleNodeFactory;
        let mut first = BlankScope::new();
        let mut second = BlankScope::new();
        assert_ne!(
            first.resolve("x", &mut factory),
            second.resolve("x", &mut factory)
        );
    }

    #[test]
    fn fresh_is_not_recorded() {
        let mut factory = SimpleNodeFactory;
        let mut scope = BlankScope::new();
        let fresh = scope.fresh(&mut factory);
        assert!(scope.is_empty());
        assert_ne!(fresh, scope.fresh(&mut factory));
    }
}
