use crate::error::TextPosition;

/// The maximal nesting depth of the trees built by the syntax parsers.
///
/// The loaders walk these trees recursively so deeper documents are refused while parsing.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A node of the generic parse tree produced by the syntax parsers and walked by the loaders.
///
/// `S` is the symbol type of the grammar. Terminals carry their matched text as `value`,
/// non-terminals carry their children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode<S> {
    pub symbol: S,
    pub value: Option<String>,
    pub children: Vec<ParseNode<S>>,
    pub position: TextPosition,
}

impl<S> ParseNode<S> {
    /// Builds a non-terminal node without children.
    #[inline]
    pub fn new(symbol: S, position: TextPosition) -> Self {
        Self {
            symbol,
            value: None,
            children: Vec::new(),
            position,
        }
    }

    /// Builds a terminal node.
    #[inline]
    pub fn leaf(symbol: S, value: impl Into<String>, position: TextPosition) -> Self {
        Self {
            symbol,
            value: Some(value.into()),
            children: Vec::new(),
            position,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[inline]
    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    #[inline]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// The text of a terminal, empty for non-terminals.
    #[inline]
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

impl<S: PartialEq> ParseNode<S> {
    /// The children with the given symbol.
    pub fn children_with(&self, symbol: &S) -> impl Iterator<Item = &Self> {
        self.children.iter().filter(move |c| c.symbol == *symbol)
    }
}
