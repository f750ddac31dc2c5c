//! A loader for RDFT, a rule syntax built on top of Turtle, implemented by [`RdftLoader`].
//!
//! A rule document is made of Turtle directives and rules:
//! ```text
//! rule     ::= 'rule' name 'distinct'? '{' conjunct* '}' '=>' '{' conjunct* '}'
//! conjunct ::= marker* ( '{' triple ('.' triple)* '.'? '}' | triple '.'? )
//! marker   ::= 'not' | 'meta'
//! triple   ::= term term term
//! ```
//! Keywords are case insensitive and terms may be `?variables`.

use crate::parser::{Syntax, TurtleNode, TurtleSymbol, parse};
use crate::terse::TerseState;
use oxlmodel::{
    Diagnostic, GraphNode, Loader, LoaderError, LoaderResult, NodeFactory, QuadPattern, Rule,
};
use tracing::debug;

/// The graph of the `meta` patterns if none is set with [`RdftLoader::with_meta_graph`].
pub const DEFAULT_META_GRAPH: &str = "urn:x-oxloader:graph:meta";
/// The graph of the consequent patterns if none is set with [`RdftLoader::with_target_graph`].
pub const DEFAULT_TARGET_GRAPH: &str = "urn:x-oxloader:graph:inference";

/// A loader for RDFT rule documents.
///
/// Antecedent patterns match the source graph, set with [`RdftLoader::with_graph`] and by
/// default the document IRI. Consequent patterns go to the target graph. Patterns marked
/// with `meta` apply to the meta graph instead.
///
/// ```
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlttl::RdftLoader;
///
/// let file = "@prefix ex: <http://example.com/> .
/// rule ex:rule { ?x a ex:Person . not { ?x ex:name ?n } } => { ?x a ex:Anonymous }";
///
/// let result = RdftLoader::new()
///     .load(file, "http://example.com/rules", &mut SimpleNodeFactory)
///     .unwrap();
/// let rule = &result.rules[0];
/// assert_eq!(rule.iri, "http://example.com/rule");
/// assert_eq!(rule.antecedent_source_positives.len(), 1);
/// assert_eq!(rule.antecedent_source_negatives.len(), 1);
/// assert_eq!(rule.consequent_target_positives.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct RdftLoader {
    base: Option<String>,
    graph: Option<String>,
    meta_graph: Option<String>,
    target_graph: Option<String>,
}

impl RdftLoader {
    /// Builds a new [`RdftLoader`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base IRI, the document IRI by default.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base = Some(base_iri.into());
        self
    }

    /// Sets the source graph matched by the antecedents.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }

    /// Sets the graph of the `meta` patterns.
    #[inline]
    pub fn with_meta_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.meta_graph = Some(graph_iri.into());
        self
    }

    /// Sets the graph the consequents produce into.
    #[inline]
    pub fn with_target_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.target_graph = Some(graph_iri.into());
        self
    }
}

impl Loader for RdftLoader {
    type Output = LoaderResult;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoaderResult, Vec<Diagnostic>> {
        let document = parse(input, Syntax::Rdft)?;
        let mut state = TerseState::new(input, self.base.as_deref().unwrap_or(resource), factory);
        let graphs = RuleGraphs {
            source: GraphNode::Iri(
                state
                    .factory
                    .iri_node(self.graph.as_deref().unwrap_or(resource)),
            ),
            meta: GraphNode::Iri(
                state
                    .factory
                    .iri_node(self.meta_graph.as_deref().unwrap_or(DEFAULT_META_GRAPH)),
            ),
            target: GraphNode::Iri(
                state
                    .factory
                    .iri_node(self.target_graph.as_deref().unwrap_or(DEFAULT_TARGET_GRAPH)),
            ),
        };
        let mut result = LoaderResult::new();
        for statement in &document.children {
            if statement.symbol == TurtleSymbol::Rule {
                let rule = load_rule(&mut state, statement, &graphs).map_err(|e| vec![e])?;
                result.rules.push(rule);
            } else {
                state.load_directive(statement).map_err(|e| vec![e])?;
            }
        }
        debug!("Loaded {} rules from {resource}", result.rules.len());
        Ok(result)
    }
}

struct RuleGraphs {
    source: GraphNode,
    meta: GraphNode,
    target: GraphNode,
}

fn load_rule<F: NodeFactory>(
    state: &mut TerseState<'_, F>,
    node: &TurtleNode,
    graphs: &RuleGraphs,
) -> Result<Rule, Diagnostic> {
    let Some(name) = node.child(0) else {
        return Err(state.error(node, LoaderError::syntax("A rule must have a name")));
    };
    let iri = state.load_iri(name)?;
    let distinct = node.children_with(&TurtleSymbol::Distinct).next().is_some();
    let mut rule = Rule::new(iri.as_str(), distinct);
    for antecedent in node.children_with(&TurtleSymbol::Antecedents) {
        for conjunct in &antecedent.children {
            let (negated, meta) = markers(conjunct);
            let graph = if meta { &graphs.meta } else { &graphs.source };
            let patterns = load_patterns(state, conjunct, graph)?;
            match (negated, meta) {
                (false, false) => rule.antecedent_source_positives.extend(patterns),
                (false, true) => rule.antecedent_meta_positives.extend(patterns),
                (true, false) => rule.antecedent_source_negatives.push(patterns),
                (true, true) => rule.antecedent_meta_negatives.push(patterns),
            }
        }
    }
    for consequent in node.children_with(&TurtleSymbol::Consequents) {
        for conjunct in &consequent.children {
            let (negated, meta) = markers(conjunct);
            let graph = if meta { &graphs.meta } else { &graphs.target };
            let patterns = load_patterns(state, conjunct, graph)?;
            match (negated, meta) {
                (false, false) => rule.consequent_target_positives.extend(patterns),
                (false, true) => rule.consequent_meta_positives.extend(patterns),
                (true, false) => rule.consequent_target_negatives.extend(patterns),
                (true, true) => rule.consequent_meta_negatives.extend(patterns),
            }
        }
    }
    Ok(rule)
}

/// Returns if the conjunct is negated and if it applies to the meta graph.
fn markers(conjunct: &TurtleNode) -> (bool, bool) {
    let mut negated = false;
    let mut meta = false;
    for marker in conjunct.children_with(&TurtleSymbol::Marker) {
        match marker.value() {
            "not" => negated = true,
            "meta" => meta = true,
            _ => (),
        }
    }
    (negated, meta)
}

fn load_patterns<F: NodeFactory>(
    state: &mut TerseState<'_, F>,
    conjunct: &TurtleNode,
    graph: &GraphNode,
) -> Result<Vec<QuadPattern>, Diagnostic> {
    let mut patterns = Vec::new();
    for triple in conjunct.children_with(&TurtleSymbol::Triples) {
        let (Some(subject), Some(predicate_object)) = (triple.child(0), triple.child(1)) else {
            continue;
        };
        let (Some(predicate), Some(object)) =
            (predicate_object.child(0), predicate_object.child(1))
        else {
            continue;
        };
        let subject_node = state.load_pattern_term(subject, graph)?;
        if subject_node.is_literal() {
            return Err(state.error(
                subject,
                LoaderError::syntax("Literals are not allowed as pattern subject"),
            ));
        }
        patterns.push(QuadPattern::new(
            subject_node,
            state.load_pattern_predicate(predicate)?,
            state.load_pattern_term(object, graph)?,
            graph.clone(),
        ));
    }
    Ok(patterns)
}
