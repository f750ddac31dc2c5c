//! Shared tree walker for the Turtle family: prefixes, base, terms, collections and triples.

use crate::parser::{Syntax, TurtleNode, TurtleSymbol, parse};
use oxlmodel::uri::{is_absolute, resolve_relative};
use oxlmodel::vocab::{rdf, xsd};
use oxlmodel::{
    BlankScope, Diagnostic, GraphNode, LoaderError, LoaderResult, MalformedUriError, NamedNode,
    NamedNodePattern, Node, NodeFactory, Quad, SubjectNode, Variable,
};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Loads a N-Triples, N-Quads, Turtle or TriG document.
pub(crate) fn load_rdf_document<F: NodeFactory>(
    input: &str,
    syntax: Syntax,
    resource: &str,
    base_iri: Option<&str>,
    graph: Option<&str>,
    factory: &mut F,
) -> Result<LoaderResult, Vec<Diagnostic>> {
    let document = parse(input, syntax)?;
    let mut state = TerseState::new(input, base_iri.unwrap_or(resource), factory);
    let default_graph = GraphNode::Iri(state.factory.iri_node(graph.unwrap_or(resource)));
    let mut result = LoaderResult::new();
    for statement in &document.children {
        let loaded = match statement.symbol {
            TurtleSymbol::PrefixDirective | TurtleSymbol::BaseDirective => {
                state.load_directive(statement)
            }
            TurtleSymbol::Graph => state.load_graph(statement, &default_graph, &mut result),
            _ => state.load_triples(statement, &default_graph, &mut result),
        };
        loaded.map_err(|e| vec![e])?;
    }
    debug!(
        "Loaded {} quads from {resource} ({syntax:?})",
        result.len()
    );
    Ok(result)
}

/// The state of one document load, threaded through the walk.
pub(crate) struct TerseState<'a, F: NodeFactory> {
    input: &'a str,
    base: String,
    prefixes: FxHashMap<String, String>,
    scope: BlankScope,
    pub(crate) factory: &'a mut F,
}

impl<'a, F: NodeFactory> TerseState<'a, F> {
    pub(crate) fn new(input: &'a str, base: impl Into<String>, factory: &'a mut F) -> Self {
        Self {
            input,
            base: base.into(),
            prefixes: FxHashMap::default(),
            scope: BlankScope::new(),
            factory,
        }
    }

    /// Locates an error at a tree node.
    pub(crate) fn error(&self, node: &TurtleNode, error: impl Into<LoaderError>) -> Diagnostic {
        let offset = node.position.byte_offset();
        Diagnostic::new(error).in_source(self.input, offset..offset)
    }

    /// Applies a `@prefix` or `@base` directive.
    pub(crate) fn load_directive(&mut self, node: &TurtleNode) -> Result<(), Diagnostic> {
        let Some(iri_node) = node.child(0) else {
            return Ok(());
        };
        let iri = self.resolve(iri_node, iri_node.value())?;
        if node.symbol == TurtleSymbol::PrefixDirective {
            self.prefixes.insert(node.value().into(), iri);
        } else {
            self.base = iri;
        }
        Ok(())
    }

    fn resolve(&self, node: &TurtleNode, reference: &str) -> Result<String, Diagnostic> {
        let iri = resolve_relative(&self.base, reference).map_err(|e| self.error(node, e))?;
        if !is_absolute(&iri) {
            return Err(self.error(
                node,
                MalformedUriError::new(iri, "an absolute IRI is expected"),
            ));
        }
        Ok(iri)
    }

    /// Returns the IRI of an `IRIREF`, a prefixed name or `a`.
    pub(crate) fn load_iri(&mut self, node: &TurtleNode) -> Result<NamedNode, Diagnostic> {
        let iri = match node.symbol {
            TurtleSymbol::A => return Ok(self.factory.iri_node(rdf::TYPE.as_str())),
            TurtleSymbol::Iri => self.resolve(node, node.value())?,
            TurtleSymbol::PrefixedName => {
                let (prefix, local) = node.value().split_once(':').unwrap_or(("", node.value()));
                let Some(namespace) = self.prefixes.get(prefix) else {
                    return Err(self.error(
                        node,
                        LoaderError::UnresolvableReference(format!(
                            "The prefix {prefix}: has not been declared"
                        )),
                    ));
                };
                let iri = format!("{namespace}{local}");
                self.resolve(node, &iri)?
            }
            _ => {
                return Err(self.error(
                    node,
                    LoaderError::syntax(format!("Expected an IRI, found {:?}", node.symbol)),
                ));
            }
        };
        Ok(self.factory.iri_node(&iri))
    }

    /// Returns the node of a term, emitting the quads of the nested blank nodes and collections.
    pub(crate) fn load_term(
        &mut self,
        node: &TurtleNode,
        graph: &GraphNode,
        result: &mut LoaderResult,
    ) -> Result<Node, Diagnostic> {
        Ok(match node.symbol {
            TurtleSymbol::Iri | TurtleSymbol::PrefixedName | TurtleSymbol::A => {
                self.load_iri(node)?.into()
            }
            TurtleSymbol::BlankNodeLabel => {
                self.scope.resolve(node.value(), &mut *self.factory).into()
            }
            TurtleSymbol::Anonymous => {
                let subject = SubjectNode::from(self.scope.fresh(&mut *self.factory));
                for predicate_objects in &node.children {
                    self.load_predicate_objects(&subject, predicate_objects, graph, result)?;
                }
                subject.into()
            }
            TurtleSymbol::Collection => self.load_collection(node, graph, result)?,
            TurtleSymbol::Literal => {
                let lexical = node.value();
                let literal = match node.child(0) {
                    Some(language) if language.symbol == TurtleSymbol::LangTag => self
                        .factory
                        .literal_node(lexical, rdf::LANG_STRING.as_str(), Some(language.value())),
                    Some(datatype) => {
                        let datatype = self.load_iri(datatype)?;
                        self.factory
                            .literal_node(lexical, datatype.as_str(), None)
                    }
                    None => self.factory.literal_node(lexical, xsd::STRING.as_str(), None),
                };
                literal.into()
            }
            TurtleSymbol::Integer => self.typed_literal(node, xsd::INTEGER.as_str()),
            TurtleSymbol::Decimal => self.typed_literal(node, xsd::DECIMAL.as_str()),
            TurtleSymbol::Double => self.typed_literal(node, xsd::DOUBLE.as_str()),
            TurtleSymbol::Boolean => self.typed_literal(node, xsd::BOOLEAN.as_str()),
            TurtleSymbol::Variable => Variable::new_unchecked(node.value()).into(),
            _ => {
                return Err(self.error(
                    node,
                    LoaderError::syntax(format!("Unexpected {:?} as term", node.symbol)),
                ));
            }
        })
    }

    fn typed_literal(&mut self, node: &TurtleNode, datatype: &str) -> Node {
        self.factory.literal_node(node.value(), datatype, None).into()
    }

    /// Desugars `( a b )` into `b0 rdf:first a`, `b0 rdf:rest b1`, `b1 rdf:first b`, `b1 rdf:rest rdf:nil`.
    fn load_collection(
        &mut self,
        node: &TurtleNode,
        graph: &GraphNode,
        result: &mut LoaderResult,
    ) -> Result<Node, Diagnostic> {
        let first = self.factory.iri_node(rdf::FIRST.as_str());
        let rest = self.factory.iri_node(rdf::REST.as_str());
        let nil = self.factory.iri_node(rdf::NIL.as_str());
        let mut head = None;
        let mut current: Option<SubjectNode> = None;
        for item in &node.children {
            let value = self.load_term(item, graph, result)?;
            let cell = SubjectNode::from(self.scope.fresh(&mut *self.factory));
            if let Some(previous) = current.take() {
                result.push_quad(Quad::new(
                    previous,
                    rest.clone(),
                    cell.clone(),
                    graph.clone(),
                ));
            } else {
                head = Some(cell.clone());
            }
            result.push_quad(Quad::new(cell.clone(), first.clone(), value, graph.clone()));
            current = Some(cell);
        }
        let (Some(head), Some(last)) = (head, current) else {
            return Ok(nil.into());
        };
        result.push_quad(Quad::new(last, rest, nil, graph.clone()));
        Ok(head.into())
    }

    /// Emits the quads of a [`TurtleSymbol::Triples`] node.
    pub(crate) fn load_triples(
        &mut self,
        node: &TurtleNode,
        graph: &GraphNode,
        result: &mut LoaderResult,
    ) -> Result<(), Diagnostic> {
        let Some((subject_node, predicate_objects)) = node.children.split_first() else {
            return Ok(());
        };
        let subject = self.load_subject(subject_node, graph, result)?;
        for predicate_objects in predicate_objects {
            self.load_predicate_objects(&subject, predicate_objects, graph, result)?;
        }
        Ok(())
    }

    pub(crate) fn load_subject(
        &mut self,
        node: &TurtleNode,
        graph: &GraphNode,
        result: &mut LoaderResult,
    ) -> Result<SubjectNode, Diagnostic> {
        self.load_term(node, graph, result)?
            .into_subject()
            .ok_or_else(|| {
                self.error(
                    node,
                    LoaderError::syntax("Only IRIs and blank nodes are allowed as subject"),
                )
            })
    }

    fn load_predicate_objects(
        &mut self,
        subject: &SubjectNode,
        node: &TurtleNode,
        graph: &GraphNode,
        result: &mut LoaderResult,
    ) -> Result<(), Diagnostic> {
        let Some((verb, objects)) = node.children.split_first() else {
            return Ok(());
        };
        let predicate = self.load_iri(verb)?;
        for object in objects {
            let object = self.load_term(object, graph, result)?;
            result.push_quad(Quad::new(
                subject.clone(),
                predicate.clone(),
                object,
                graph.clone(),
            ));
        }
        Ok(())
    }

    /// Emits the quads of a graph block, in the default graph if the block has no label.
    fn load_graph(
        &mut self,
        node: &TurtleNode,
        default_graph: &GraphNode,
        result: &mut LoaderResult,
    ) -> Result<(), Diagnostic> {
        let (graph, triples) = match node.children.split_first() {
            Some((label, triples)) if label.symbol != TurtleSymbol::Triples => {
                (self.load_graph_label(label)?, triples)
            }
            _ => (default_graph.clone(), node.children.as_slice()),
        };
        for statement in triples {
            self.load_triples(statement, &graph, result)?;
        }
        Ok(())
    }

    /// Returns the graph named by a graph block label.
    pub(crate) fn load_graph_label(&mut self, node: &TurtleNode) -> Result<GraphNode, Diagnostic> {
        Ok(match node.symbol {
            TurtleSymbol::BlankNodeLabel => {
                self.scope.resolve(node.value(), &mut *self.factory).into()
            }
            TurtleSymbol::Anonymous => self.scope.fresh(&mut *self.factory).into(),
            _ => self.load_iri(node)?.into(),
        })
    }

    /// Returns the subject or object of a rule pattern.
    pub(crate) fn load_pattern_term(
        &mut self,
        node: &TurtleNode,
        graph: &GraphNode,
    ) -> Result<Node, Diagnostic> {
        let mut ignored = LoaderResult::new();
        self.load_term(node, graph, &mut ignored)
    }

    pub(crate) fn load_pattern_predicate(
        &mut self,
        node: &TurtleNode,
    ) -> Result<NamedNodePattern, Diagnostic> {
        if node.symbol == TurtleSymbol::Variable {
            return Ok(Variable::new_unchecked(node.value()).into());
        }
        Ok(self.load_iri(node)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Syntax, parse};
    use oxlmodel::SimpleNodeFactory;

    fn load(input: &str) -> Result<LoaderResult, Diagnostic> {
        let document = parse(input, Syntax::Turtle).map_err(|mut e| e.remove(0))?;
        let mut factory = SimpleNodeFactory;
        let mut state = TerseState::new(input, "http://example.com/doc", &mut factory);
        let graph = GraphNode::Iri(NamedNode::new_unchecked("http://example.com/doc"));
        let mut result = LoaderResult::new();
        for statement in &document.children {
            match statement.symbol {
                TurtleSymbol::Triples => state.load_triples(statement, &graph, &mut result)?,
                _ => state.load_directive(statement)?,
            }
        }
        Ok(result)
    }

    #[test]
    fn relative_iris_and_base() {
        let result = load("<a> <b> <c> . @base <http://other.com/x/> . <a> <b> <../c> .").unwrap();
        assert_eq!(
            result.quads[0].subject.to_string(),
            "<http://example.com/a>"
        );
        assert_eq!(result.quads[1].object.to_string(), "<http://other.com/c>");
    }

    #[test]
    fn prefixed_names_are_resolved_after_concatenation() {
        let result = load("@prefix ex: <sub/> . ex:a ex:b ex:c .").unwrap();
        assert_eq!(
            result.quads[0].subject.to_string(),
            "<http://example.com/sub/a>"
        );
    }

    #[test]
    fn unknown_prefix() {
        let error = load("ex:a ex:b ex:c .").unwrap_err();
        assert!(matches!(
            error.error(),
            LoaderError::UnresolvableReference(_)
        ));
        assert_eq!(error.location().unwrap().start.column, 0);
    }

    #[test]
    fn nested_blank_nodes_come_first() {
        let result = load("<s> <p> [ <q> <o> ] .").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.quads[0].predicate.as_str(), "http://example.com/q");
        assert_eq!(
            Node::from(result.quads[0].subject.clone()),
            result.quads[1].object
        );
    }
}
