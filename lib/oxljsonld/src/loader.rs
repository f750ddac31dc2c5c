use crate::context::{
    ContainerType, ContextFetcher, ContextId, ContextStack, NoContextFetcher, Setting, TermInfo,
    is_keyword,
};
use crate::tree::{JsonNode, JsonValue};
use oxlmodel::uri::is_absolute;
use oxlmodel::vocab::{rdf, xsd};
use oxlmodel::{
    BlankScope, Diagnostic, GraphNode, Literal, Loader, LoaderError, LoaderResult, NamedNode,
    Node, NodeFactory, Quad, SubjectNode,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A [JSON-LD](https://www.w3.org/TR/json-ld/) loader.
///
/// Triples outside of `@graph` objects are put in the graph given with
/// [`JsonLdLoader::with_graph`], the document IRI by default.
/// Remote contexts are retrieved with the [`ContextFetcher`] set with
/// [`JsonLdLoader::with_context_fetcher`]: none is found by default.
///
/// Count the number of people:
/// ```
/// use oxlmodel::vocab::rdf;
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxljsonld::JsonLdLoader;
///
/// let file = r#"{
///     "@context": {"schema": "http://schema.org/", "name": "schema:name"},
///     "@graph": [
///         {"@id": "http://example.com/foo", "@type": "schema:Person", "name": "Foo"},
///         {"@id": "http://example.com/bar", "@type": "schema:Person", "name": "Bar"}
///     ]
/// }"#;
///
/// let result = JsonLdLoader::new()
///     .load(file, "http://example.com/data", &mut SimpleNodeFactory)
///     .unwrap();
/// let count = result
///     .quads
///     .iter()
///     .filter(|q| q.predicate == rdf::TYPE && q.object.to_string() == "<http://schema.org/Person>")
///     .count();
/// assert_eq!(2, count);
/// ```
#[derive(Clone)]
#[must_use]
pub struct JsonLdLoader {
    base: Option<String>,
    graph: Option<String>,
    context_fetcher: Arc<dyn ContextFetcher + Send + Sync>,
}

impl Default for JsonLdLoader {
    #[inline]
    fn default() -> Self {
        Self {
            base: None,
            graph: None,
            context_fetcher: Arc::new(NoContextFetcher),
        }
    }
}

impl JsonLdLoader {
    /// Builds a new [`JsonLdLoader`].
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

    /// Sets the default graph.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }

    /// Sets how the remote contexts are retrieved.
    ///
    /// ```
    /// use oxlmodel::{Loader, SimpleNodeFactory};
    /// use oxljsonld::{JsonLdLoader, StaticContextFetcher};
    ///
    /// let result = JsonLdLoader::new()
    ///     .with_context_fetcher(StaticContextFetcher::new().with_document(
    ///         "http://schema.org/",
    ///         r#"{"@context": {"@vocab": "http://schema.org/"}}"#,
    ///     ))
    ///     .load(
    ///         r#"{"@context": "http://schema.org/", "@id": "http://example.com/foo", "name": "Foo"}"#,
    ///         "http://example.com/data",
    ///         &mut SimpleNodeFactory,
    ///     )
    ///     .unwrap();
    /// assert_eq!(result.quads[0].predicate.as_str(), "http://schema.org/name");
    /// ```
    #[inline]
    pub fn with_context_fetcher(
        mut self,
        context_fetcher: impl ContextFetcher + Send + Sync + 'static,
    ) -> Self {
        self.context_fetcher = Arc::new(context_fetcher);
        self
    }
}

impl fmt::Debug for JsonLdLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLdLoader")
            .field("base", &self.base)
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}

impl Loader for JsonLdLoader {
    type Output = LoaderResult;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoaderResult, Vec<Diagnostic>> {
        let root = JsonNode::parse(input).map_err(|e| vec![e])?;
        let contexts = ContextStack::new(
            self.base.as_deref().unwrap_or(resource),
            &*self.context_fetcher,
        );
        let root_context = contexts.root();
        let graph = GraphNode::Iri(factory.iri_node(self.graph.as_deref().unwrap_or(resource)));
        let mut state = JsonLdState {
            input,
            factory,
            contexts,
            scope: BlankScope::new(),
            top_level: true,
            result: LoaderResult::new(),
        };
        state
            .load_document(&root, &graph, root_context)
            .map_err(|e| vec![e])?;
        debug!(
            "Loaded {} quads from {resource} (JSON-LD)",
            state.result.len()
        );
        Ok(state.result)
    }
}

/// A loaded JSON value.
enum Value {
    Single(Node),
    Many(Vec<Node>),
    /// The items of a `@list` object.
    List(Vec<Node>),
}

struct JsonLdState<'a, F: NodeFactory> {
    input: &'a str,
    factory: &'a mut F,
    contexts: ContextStack<'a>,
    scope: BlankScope,
    /// No node object has been met yet.
    top_level: bool,
    result: LoaderResult,
}

impl<F: NodeFactory> JsonLdState<'_, F> {
    fn load_document(
        &mut self,
        node: &JsonNode,
        graph: &GraphNode,
        context: ContextId,
    ) -> Result<(), Diagnostic> {
        match &node.value {
            JsonValue::Object(_) => {
                self.load_object(node, graph, context)?;
            }
            JsonValue::Array(_) => {
                self.load_array(node, graph, context, None)?;
            }
            _ => {
                return Err(self.error(
                    node,
                    LoaderError::syntax(format!(
                        "A JSON-LD document must be an object or an array, found {}",
                        node.kind()
                    )),
                ));
            }
        }
        Ok(())
    }

    /// Loads a node object and returns its subject.
    ///
    /// The whole object is skipped and `None` returned when its `@id` is not an absolute IRI.
    fn load_object(
        &mut self,
        node: &JsonNode,
        graph: &GraphNode,
        context: ContextId,
    ) -> Result<Option<SubjectNode>, Diagnostic> {
        let context = match node.member("@context") {
            Some(definition) => self.contexts.build(context, definition, self.input)?,
            None => context,
        };
        let mut id = None;
        let mut graph_value = None;
        let mut types = None;
        let mut reverse = None;
        let mut properties = Vec::new();
        for (key, value) in node.members() {
            let expanded = self.contexts.expand_iri(context, key, true);
            let is = |keyword: &str| key == keyword || expanded.as_deref() == Some(keyword);
            if is("@id") {
                id = Some(value);
            } else if is("@graph") {
                graph_value = Some(value);
            } else if is("@type") {
                types = Some(value);
            } else if is("@reverse") {
                reverse = Some(value);
            } else if !is_keyword(key) && !expanded.as_deref().is_some_and(is_keyword) {
                properties.push((key.as_str(), value));
            }
        }

        let mut subject = match id {
            Some(id) => {
                let Some(subject) = self.load_id(id, context)? else {
                    return Ok(None);
                };
                Some(subject)
            }
            None => None,
        };
        if let Some(graph_value) = graph_value {
            let target = if types.is_some()
                || reverse.is_some()
                || !properties.is_empty()
                || !self.top_level
            {
                // the object names the graph
                let named = match &subject {
                    Some(subject) => subject.clone(),
                    None => SubjectNode::Blank(self.scope.fresh(&mut *self.factory)),
                };
                subject = Some(named.clone());
                named
            } else if let Some(subject) = &subject {
                subject.clone()
            } else {
                graph.clone()
            };
            self.top_level = false;
            self.load_value(graph_value, &target, context, None)?;
        }
        self.top_level = false;
        let subject = match subject {
            Some(subject) => subject,
            None => SubjectNode::Blank(self.scope.fresh(&mut *self.factory)),
        };

        if let Some(types) = types {
            let info = TermInfo {
                full_iri: Some(rdf::TYPE.as_str().into()),
                value_type: Some("@vocab".into()),
                ..TermInfo::default()
            };
            if let Some(value) = self.load_value(types, graph, context, Some(&info))? {
                let predicate = self.factory.iri_node(rdf::TYPE.as_str());
                for class in self.flatten(value, graph) {
                    self.emit(&subject, &predicate, class, graph, false);
                }
            }
        }
        for (key, value) in properties {
            self.load_member(key, value, &subject, graph, context, false)?;
        }
        if let Some(reverse) = reverse {
            for (key, value) in reverse.members() {
                self.load_member(key, value, &subject, graph, context, true)?;
            }
        }
        Ok(Some(subject))
    }

    /// Resolves the value of `@id`, `None` when it is not an absolute IRI.
    fn load_id(
        &mut self,
        id: &JsonNode,
        context: ContextId,
    ) -> Result<Option<SubjectNode>, Diagnostic> {
        let Some(value) = id.as_str() else {
            return Err(self.error(id, LoaderError::syntax("Expected a valid node id")));
        };
        if let Some(label) = value.strip_prefix("_:") {
            return Ok(Some(SubjectNode::Blank(
                self.scope.resolve(label, &mut *self.factory),
            )));
        }
        match self.contexts.expand_iri(context, value, false) {
            Some(iri) if is_absolute(&iri) => {
                Ok(Some(SubjectNode::Iri(self.factory.iri_node(&iri))))
            }
            _ => {
                warn!("The node id {value} is not an absolute IRI, the node object is ignored");
                Ok(None)
            }
        }
    }

    fn load_member(
        &mut self,
        key: &str,
        definition: &JsonNode,
        subject: &SubjectNode,
        graph: &GraphNode,
        context: ContextId,
        mut reversed: bool,
    ) -> Result<(), Diagnostic> {
        if is_keyword(key) {
            return Ok(());
        }
        let info = self.contexts.get_info(context, key);
        let mut property = info.full_iri.as_deref();
        if let Some(reverse) = &info.reversed {
            property = Some(reverse.as_str());
            reversed = !reversed;
        }
        let Some(property) = property.filter(|p| !p.starts_with("_:") && is_absolute(p)) else {
            warn!("The property {key} does not expand to an absolute IRI, it is ignored");
            return Ok(());
        };
        let property = self.factory.iri_node(property);
        let Some(value) = self.load_value(definition, graph, context, Some(&info))? else {
            return Ok(());
        };
        let as_list = info.container == Some(ContainerType::List);
        let targets = match value {
            Value::List(items) => vec![self.make_list(items, graph)],
            Value::Many(items) if as_list => vec![self.make_list(items, graph)],
            Value::Single(item) if as_list => vec![self.make_list(vec![item], graph)],
            Value::Many(items) => items,
            Value::Single(item) => vec![item],
        };
        for target in targets {
            self.emit(subject, &property, target, graph, reversed);
        }
        Ok(())
    }

    fn load_array(
        &mut self,
        node: &JsonNode,
        graph: &GraphNode,
        context: ContextId,
        info: Option<&TermInfo>,
    ) -> Result<Vec<Node>, Diagnostic> {
        let JsonValue::Array(items) = &node.value else {
            return Ok(Vec::new());
        };
        let mut result = Vec::new();
        for item in items {
            if let Some(value) = self.load_value(item, graph, context, info)? {
                let nodes = self.flatten(value, graph);
                result.extend(nodes);
            }
        }
        Ok(result)
    }

    fn load_value(
        &mut self,
        node: &JsonNode,
        graph: &GraphNode,
        context: ContextId,
        info: Option<&TermInfo>,
    ) -> Result<Option<Value>, Diagnostic> {
        let container = info.and_then(|i| i.container);
        match &node.value {
            JsonValue::Object(_) => {
                if self.has_keyword(node, context, "@value")
                    || self.has_keyword(node, context, "@language")
                {
                    self.load_value_object(node, graph, context, info)
                } else if let Some(list) = self.keyword_member(node, context, "@list") {
                    // lists are only loaded as property values
                    if info.is_none() {
                        return Ok(None);
                    }
                    let items = match self.load_value(list, graph, context, info)? {
                        Some(value) => self.flatten(value, graph),
                        None => Vec::new(),
                    };
                    Ok(Some(Value::List(items)))
                } else if let Some(set) = self.keyword_member(node, context, "@set") {
                    let items = match self.load_value(set, graph, context, info)? {
                        Some(value) => self.flatten(value, graph),
                        None => Vec::new(),
                    };
                    Ok(Some(Value::Many(items)))
                } else if container == Some(ContainerType::Language) {
                    self.load_language_map(node).map(|v| Some(Value::Many(v)))
                } else if container == Some(ContainerType::Index) {
                    self.load_index_map(node, graph, context, info)
                        .map(|v| Some(Value::Many(v)))
                } else {
                    Ok(self
                        .load_object(node, graph, context)?
                        .map(|subject| Value::Single(subject.into())))
                }
            }
            JsonValue::Array(_) => {
                if container == Some(ContainerType::Index) {
                    self.load_index_map(node, graph, context, info)
                        .map(|v| Some(Value::Many(v)))
                } else {
                    self.load_array(node, graph, context, info)
                        .map(|v| Some(Value::Many(v)))
                }
            }
            JsonValue::String(value) => Ok(self
                .load_string(value, context, info)
                .map(Value::Single)),
            JsonValue::Number(value) => Ok(Some(Value::Single(
                self.load_number(value, context, info).into(),
            ))),
            JsonValue::Boolean(value) => {
                let lexical = if *value { "true" } else { "false" };
                let datatype = self.coerced_datatype(context, info);
                let literal = self.factory.literal_node(
                    lexical,
                    datatype.as_deref().unwrap_or(xsd::BOOLEAN.as_str()),
                    None,
                );
                Ok(Some(Value::Single(literal.into())))
            }
            JsonValue::Null => Ok(None),
        }
    }

    /// Loads an object with `@value` or `@language`, its `@type` and `@language` override the property ones.
    fn load_value_object(
        &mut self,
        node: &JsonNode,
        graph: &GraphNode,
        context: ContextId,
        info: Option<&TermInfo>,
    ) -> Result<Option<Value>, Diagnostic> {
        let mut current = info.cloned().unwrap_or_default();
        if let Some(value_type) = self.keyword_member(node, context, "@type") {
            current.value_type = value_type.as_str().map(Into::into);
        }
        if let Some(language) = self.keyword_member(node, context, "@language") {
            current.language = match language.as_str() {
                Some(language) => Setting::Value(language.into()),
                None => Setting::Reset,
            };
        }
        match self.keyword_member(node, context, "@value") {
            Some(value) => self.load_value(value, graph, context, Some(&current)),
            None => Ok(None),
        }
    }

    fn load_language_map(&mut self, node: &JsonNode) -> Result<Vec<Node>, Diagnostic> {
        let mut result = Vec::new();
        for (language, definition) in node.members() {
            let values: Vec<&JsonNode> = match &definition.value {
                JsonValue::Array(values) => values.iter().collect(),
                _ => vec![definition],
            };
            for value in values {
                if value.is_null() {
                    continue;
                }
                let Some(value) = value.as_str() else {
                    return Err(self.error(
                        value,
                        LoaderError::syntax("The values of a language map must be strings"),
                    ));
                };
                let literal =
                    self.factory
                        .literal_node(value, rdf::LANG_STRING.as_str(), Some(language.as_str()));
                result.push(literal.into());
            }
        }
        Ok(result)
    }

    /// Loads the values of an `@index` container, the index itself does not translate to RDF.
    fn load_index_map(
        &mut self,
        node: &JsonNode,
        graph: &GraphNode,
        context: ContextId,
        info: Option<&TermInfo>,
    ) -> Result<Vec<Node>, Diagnostic> {
        let mut current = info.cloned().unwrap_or_default();
        current.container = Some(ContainerType::Undefined);
        let definitions = match &node.value {
            JsonValue::Array(items) => items.iter().collect::<Vec<_>>(),
            _ => node.members().iter().map(|(_, v)| v).collect(),
        };
        let mut result = Vec::new();
        for definition in definitions {
            if let Some(value) = self.load_value(definition, graph, context, Some(&current))? {
                let nodes = self.flatten(value, graph);
                result.extend(nodes);
            }
        }
        Ok(result)
    }

    fn load_string(&mut self, value: &str, context: ContextId, info: Option<&TermInfo>) -> Option<Node> {
        let value_type = info.and_then(|i| i.value_type.as_deref());
        if let Some(mode @ ("@id" | "@vocab")) = value_type {
            if let Some(label) = value.strip_prefix("_:") {
                return Some(self.scope.resolve(label, &mut *self.factory).into());
            }
            return match self.contexts.expand_iri(context, value, mode == "@vocab") {
                Some(iri) if is_absolute(&iri) => Some(self.factory.iri_node(&iri).into()),
                _ => {
                    warn!("{value} does not expand to an absolute IRI, it is ignored");
                    None
                }
            };
        }
        if let Some(datatype) = self.coerced_datatype(context, info) {
            return Some(self.factory.literal_node(value, &datatype, None).into());
        }
        let language = match info.map(|i| &i.language) {
            Some(Setting::Value(language)) => Some(language.as_str()),
            Some(Setting::Reset) => None,
            Some(Setting::Unset) | None => self.contexts.current_language(context),
        };
        let datatype = if language.is_some() {
            rdf::LANG_STRING
        } else {
            xsd::STRING
        };
        Some(
            self.factory
                .literal_node(value, datatype.as_str(), language)
                .into(),
        )
    }

    fn load_number(
        &mut self,
        lexical: &str,
        context: ContextId,
        info: Option<&TermInfo>,
    ) -> Literal {
        let is_integer = !lexical.contains(['.', 'e', 'E']);
        let datatype = self.coerced_datatype(context, info);
        match datatype {
            Some(datatype)
                if !is_integer
                    || [xsd::DOUBLE, xsd::FLOAT, xsd::DECIMAL]
                        .iter()
                        .any(|d| d.as_str() == datatype) =>
            {
                self.factory
                    .literal_node(&canonical_double(lexical), &datatype, None)
            }
            Some(datatype) => self.factory.literal_node(lexical, &datatype, None),
            None if is_integer => {
                self.factory
                    .literal_node(lexical, xsd::INTEGER.as_str(), None)
            }
            None => self.factory.literal_node(
                &canonical_double(lexical),
                xsd::DOUBLE.as_str(),
                None,
            ),
        }
    }

    /// The datatype IRI a literal is coerced to, if any.
    fn coerced_datatype(&self, context: ContextId, info: Option<&TermInfo>) -> Option<String> {
        let value_type = info?.value_type.as_deref()?;
        if value_type == "@id" || value_type == "@vocab" {
            return None;
        }
        self.contexts.expand_iri(context, value_type, true)
    }

    fn flatten(&mut self, value: Value, graph: &GraphNode) -> Vec<Node> {
        match value {
            Value::Single(node) => vec![node],
            Value::Many(nodes) => nodes,
            Value::List(items) => vec![self.make_list(items, graph)],
        }
    }

    /// Emits the `rdf:first`/`rdf:rest` chain of a list and returns its head.
    fn make_list(&mut self, items: Vec<Node>, graph: &GraphNode) -> Node {
        let first = self.factory.iri_node(rdf::FIRST.as_str());
        let rest = self.factory.iri_node(rdf::REST.as_str());
        let mut head = None;
        let mut current: Option<SubjectNode> = None;
        for item in items {
            let cell = SubjectNode::Blank(self.scope.fresh(&mut *self.factory));
            match &current {
                Some(previous) => self.result.push_quad(Quad::new(
                    previous.clone(),
                    rest.clone(),
                    cell.clone(),
                    graph.clone(),
                )),
                None => head = Some(cell.clone()),
            }
            self.result
                .push_quad(Quad::new(cell.clone(), first.clone(), item, graph.clone()));
            current = Some(cell);
        }
        let nil = self.factory.iri_node(rdf::NIL.as_str());
        if let Some(last) = current {
            self.result
                .push_quad(Quad::new(last, rest, nil.clone(), graph.clone()));
        }
        head.map_or_else(|| Node::from(nil), Node::from)
    }

    fn emit(
        &mut self,
        subject: &SubjectNode,
        predicate: &NamedNode,
        object: Node,
        graph: &GraphNode,
        reversed: bool,
    ) {
        if reversed {
            let Some(reverse_subject) = object.into_subject() else {
                warn!("A literal can not be the subject of the reverse property {predicate}");
                return;
            };
            self.result.push_quad(Quad::new(
                reverse_subject,
                predicate.clone(),
                subject.clone(),
                graph.clone(),
            ));
        } else {
            self.result.push_quad(Quad::new(
                subject.clone(),
                predicate.clone(),
                object,
                graph.clone(),
            ));
        }
    }

    /// The value of the member that is `keyword` or an alias of it.
    fn keyword_member<'n>(
        &self,
        node: &'n JsonNode,
        context: ContextId,
        keyword: &str,
    ) -> Option<&'n JsonNode> {
        node.members().iter().find_map(|(key, value)| {
            (key == keyword
                || self.contexts.expand_iri(context, key, true).as_deref() == Some(keyword))
            .then_some(value)
        })
    }

    fn has_keyword(&self, node: &JsonNode, context: ContextId, keyword: &str) -> bool {
        self.keyword_member(node, context, keyword).is_some()
    }

    fn error(&self, node: &JsonNode, error: LoaderError) -> Diagnostic {
        Diagnostic::new(error).in_source(self.input, node.offset..node.offset)
    }
}

/// Writes a number in the canonical `xsd:double` form, e.g. `1.5E0`.
fn canonical_double(lexical: &str) -> String {
    let Ok(value) = lexical.parse::<f64>() else {
        return lexical.into();
    };
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0. { "INF" } else { "-INF" }.into();
    }
    let formatted = format!("{value:E}");
    match formatted.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{mantissa}.0E{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticContextFetcher;
    use oxlmodel::SimpleNodeFactory;

    const DOC: &str = "http://example.com/doc";

    fn load(input: &str) -> Result<LoaderResult, Vec<Diagnostic>> {
        JsonLdLoader::new().load(input, DOC, &mut SimpleNodeFactory)
    }

    fn literal(node: &Node) -> &Literal {
        node.as_literal().unwrap()
    }

    fn strings(result: &LoaderResult) -> Vec<String> {
        result.quads.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn canonical_doubles() {
        assert_eq!(canonical_double("1.5"), "1.5E0");
        assert_eq!(canonical_double("10"), "1.0E1");
        assert_eq!(canonical_double("-0.00125"), "-1.25E-3");
        assert_eq!(canonical_double("0.0"), "0.0E0");
        assert_eq!(canonical_double("1e400"), "INF");
    }

    #[test]
    fn node_object() {
        let result = load(
            r#"{
                "@context": {"@vocab": "http://schema.org/", "knows": {"@type": "@id"}},
                "@id": "http://example.com/alice",
                "@type": ["Person", "Agent"],
                "name": "Alice",
                "knows": "http://example.com/bob",
                "nothing": null
            }"#,
        )
        .unwrap();
        assert_eq!(
            strings(&result),
            [
                "<http://example.com/alice> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> <http://example.com/doc> .",
                "<http://example.com/alice> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Agent> <http://example.com/doc> .",
                "<http://example.com/alice> <http://schema.org/name> \"Alice\" <http://example.com/doc> .",
                "<http://example.com/alice> <http://schema.org/knows> <http://example.com/bob> <http://example.com/doc> .",
            ]
        );
    }

    #[test]
    fn literal_typing() {
        let result = load(
            r#"{
                "@context": {
                    "@vocab": "http://schema.org/",
                    "xsd": "http://www.w3.org/2001/XMLSchema#",
                    "@language": "en",
                    "height": {"@type": "xsd:double"},
                    "code": {"@language": null},
                    "date": {"@type": "xsd:date"}
                },
                "a": 12,
                "b": 1.5,
                "c": true,
                "height": 2,
                "d": "hello",
                "code": "x12",
                "e": {"@value": "bonjour", "@language": "fr"},
                "f": {"@value": "5", "@type": "xsd:integer"},
                "date": "2020-01-01"
            }"#,
        )
        .unwrap();
        let objects = result
            .quads
            .iter()
            .map(|q| literal(&q.object))
            .collect::<Vec<_>>();
        assert_eq!(objects[0].value(), "12");
        assert_eq!(objects[0].datatype(), &xsd::INTEGER);
        assert_eq!(objects[1].value(), "1.5E0");
        assert_eq!(objects[1].datatype(), &xsd::DOUBLE);
        assert_eq!(objects[2].datatype(), &xsd::BOOLEAN);
        assert_eq!(objects[3].value(), "2.0E0");
        assert_eq!(objects[3].datatype(), &xsd::DOUBLE);
        assert_eq!(objects[4].language(), Some("en"));
        assert_eq!(objects[4].datatype(), &rdf::LANG_STRING);
        assert_eq!(objects[5].language(), None);
        assert_eq!(objects[5].datatype(), &xsd::STRING);
        assert_eq!(objects[6].language(), Some("fr"));
        assert_eq!(objects[7].value(), "5");
        assert_eq!(objects[7].datatype(), &xsd::INTEGER);
        assert_eq!(objects[8].datatype(), &xsd::DATE);
        assert_eq!(objects[8].language(), None);
    }

    #[test]
    fn lists() {
        let result = load(
            r#"{
                "@context": {"ex": "http://ex.com/", "ordered": {"@id": "ex:ordered", "@container": "@list"}},
                "@id": "ex:s",
                "ex:p": {"@list": ["a", null, "b"]},
                "ex:empty": {"@list": []},
                "ordered": "c"
            }"#,
        )
        .unwrap();
        let quads = &result.quads;
        assert_eq!(quads.len(), 9);
        assert_eq!(quads[0].predicate, rdf::FIRST);
        assert_eq!(literal(&quads[0].object).value(), "a");
        assert_eq!(quads[1].predicate, rdf::REST);
        assert_eq!(quads[2].predicate, rdf::FIRST);
        assert_eq!(literal(&quads[2].object).value(), "b");
        assert_eq!(quads[3].object, Node::from(rdf::NIL));
        assert_eq!(quads[4].predicate.as_str(), "http://ex.com/p");
        assert_eq!(quads[4].object, Node::from(quads[0].subject.clone()));
        assert_eq!(quads[5].object, Node::from(rdf::NIL));
        assert_eq!(quads[8].predicate.as_str(), "http://ex.com/ordered");
        assert_eq!(quads[8].object, Node::from(quads[6].subject.clone()));
    }

    #[test]
    fn named_graphs() {
        let result = load(
            r#"{
                "@context": {"ex": "http://ex.com/"},
                "@id": "ex:g",
                "@graph": [{"@id": "ex:a", "ex:p": "x"}],
                "ex:q": "y"
            }"#,
        )
        .unwrap();
        assert_eq!(
            strings(&result),
            [
                "<http://ex.com/a> <http://ex.com/p> \"x\" <http://ex.com/g> .",
                "<http://ex.com/g> <http://ex.com/q> \"y\" <http://example.com/doc> .",
            ]
        );
        let default_graph = load(
            r#"{"@graph": [{"@id": "http://ex.com/a", "http://ex.com/p": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(
            default_graph.quads[0].graph_name.to_string(),
            "<http://example.com/doc>"
        );
    }

    #[test]
    fn blank_node_identifiers_persist() {
        let result = load(
            r#"[
                {"@id": "_:a", "http://ex.com/p": {"@id": "_:b"}},
                {"@id": "_:b", "http://ex.com/p": {"@id": "_:a"}},
                {"http://ex.com/p": "x"}
            ]"#,
        )
        .unwrap();
        let quads = &result.quads;
        assert_eq!(Node::from(quads[0].subject.clone()), quads[1].object);
        assert_eq!(quads[0].object, Node::from(quads[1].subject.clone()));
        assert_ne!(quads[2].subject, quads[0].subject);
        assert_ne!(quads[2].subject, quads[1].subject);
    }

    #[test]
    fn reverse_properties_and_maps() {
        let result = load(
            r#"{
                "@context": {
                    "ex": "http://ex.com/",
                    "parent": {"@reverse": "ex:child"},
                    "label": {"@id": "ex:label", "@container": "@language"},
                    "post": {"@id": "ex:post", "@container": "@index"}
                },
                "@id": "ex:bob",
                "parent": {"@id": "ex:alice"},
                "@reverse": {"ex:friend": {"@id": "ex:carol"}},
                "label": {"en": "Bob", "fr": ["Bob", "Robert"]},
                "post": {"first": "p1", "second": ["p2", "p3"]}
            }"#,
        )
        .unwrap();
        let strings = strings(&result);
        assert_eq!(
            strings[0],
            "<http://ex.com/alice> <http://ex.com/child> <http://ex.com/bob> <http://example.com/doc> ."
        );
        assert_eq!(
            strings[1],
            "<http://ex.com/bob> <http://ex.com/label> \"Bob\"@en <http://example.com/doc> ."
        );
        assert_eq!(
            strings[3],
            "<http://ex.com/bob> <http://ex.com/label> \"Robert\"@fr <http://example.com/doc> ."
        );
        assert_eq!(strings.len(), 8);
        assert_eq!(
            strings[7],
            "<http://ex.com/carol> <http://ex.com/friend> <http://ex.com/bob> <http://example.com/doc> ."
        );
    }

    #[test]
    fn relative_ids_and_properties() {
        let result = JsonLdLoader::new()
            .with_base_iri("http://base.com/dir/")
            .with_graph("http://example.com/graph")
            .load(
                r#"{"@id": "foo", "http://ex.com/p": {"@id": "../bar"}, "_:p": "dropped"}"#,
                DOC,
                &mut SimpleNodeFactory,
            )
            .unwrap();
        assert_eq!(
            strings(&result),
            ["<http://base.com/dir/foo> <http://ex.com/p> <http://base.com/bar> <http://example.com/graph> ."]
        );
    }

    #[test]
    fn relative_node_ids_skip_the_object() {
        let result = load(
            r#"{"@context": {"@base": null}, "@id": "rel", "@type": "http://ex.com/C", "http://ex.com/p": "v"}"#,
        )
        .unwrap();
        assert!(result.quads.is_empty());

        let result = load(
            r#"{"@context": {"@base": null}, "@id": "http://ex.com/a", "http://ex.com/p": [{"@id": "inner", "http://ex.com/q": "w"}, {"@id": "http://ex.com/b"}]}"#,
        )
        .unwrap();
        assert_eq!(
            strings(&result),
            ["<http://ex.com/a> <http://ex.com/p> <http://ex.com/b> <http://example.com/doc> ."]
        );
    }

    #[test]
    fn remote_context() {
        let result = JsonLdLoader::new()
            .with_context_fetcher(StaticContextFetcher::new().with_document(
                "http://example.com/context.jsonld",
                r#"{"@context": {"name": "http://schema.org/name", "@language": "en"}}"#,
            ))
            .load(
                r#"{"@context": ["context.jsonld", {"@language": null}], "@id": "http://ex.com/a", "name": "A"}"#,
                DOC,
                &mut SimpleNodeFactory,
            )
            .unwrap();
        assert_eq!(result.quads[0].predicate.as_str(), "http://schema.org/name");
        assert_eq!(literal(&result.quads[0].object).language(), None);
    }

    #[test]
    fn invalid_documents() {
        let errors = load(r#"{"@context": 12, "@id": "http://ex.com/a"}"#).unwrap_err();
        assert!(matches!(errors[0].error(), LoaderError::InvalidContext(_)));
        assert_eq!(errors[0].location().unwrap().start.offset, 13);
        let errors = load(r#"{"@id": null}"#).unwrap_err();
        assert!(matches!(errors[0].error(), LoaderError::Syntax(_)));
        assert!(load("\"foo\"").is_err());
        assert!(load("{\"a\": ").is_err());
    }
}
