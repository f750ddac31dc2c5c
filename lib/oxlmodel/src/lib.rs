#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod blank_node;
mod error;
pub mod escape;
mod factory;
mod literal;
mod loader;
mod named_node;
mod node;
mod quad;
mod rule;
mod scope;
mod tree;
pub mod uri;
mod variable;
pub mod vocab;

pub use crate::blank_node::BlankNode;
pub use crate::error::{Diagnostic, LoaderError, MalformedUriError, TextPosition};
pub use crate::factory::{InterningNodeFactory, NodeFactory, SimpleNodeFactory};
pub use crate::literal::{Literal, print_quoted_str};
pub use crate::loader::{Loader, LoaderResult};
pub use crate::named_node::{NamedNode, NamedNodeRef};
pub use crate::node::{GraphNode, NamedNodePattern, Node, SubjectNode};
pub use crate::quad::{Quad, QuadPattern};
pub use crate::rule::Rule;
pub use crate::scope::BlankScope;
pub use crate::tree::{MAX_NESTING_DEPTH, ParseNode};
pub use crate::variable::Variable;
