use crate::xml::{XmlElement, is_nc_name};
use oxlmodel::uri::{is_absolute, resolve_relative};
use oxlmodel::vocab::{rdf, xsd};
use oxlmodel::{
    BlankScope, Diagnostic, GraphNode, Literal, Loader, LoaderError, LoaderResult,
    MalformedUriError, NamedNode, Node, NodeFactory, Quad, SubjectNode,
};
use rustc_hash::FxHashSet;
use tracing::debug;

const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
const RDF_ABOUT_EACH_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
const RDF_BAG_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";

const RESERVED_CORE_NAMES: [&str; 7] = [
    RDF_RDF,
    RDF_ID,
    RDF_ABOUT,
    RDF_PARSE_TYPE,
    RDF_RESOURCE,
    RDF_NODE_ID,
    RDF_DATATYPE,
];
const RESERVED_OLD_NAMES: [&str; 3] = [RDF_ABOUT_EACH, RDF_ABOUT_EACH_PREFIX, RDF_BAG_ID];

/// A [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) loader.
///
/// The root element is either `rdf:RDF` or a single node element.
/// Triples are put in the graph given with [`RdfXmlLoader::with_graph`], the document IRI by default.
///
/// Count the number of people:
/// ```
/// use oxlmodel::vocab::rdf;
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlrdfxml::RdfXmlLoader;
///
/// let file = r#"<?xml version="1.0"?>
/// <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
///  <rdf:Description rdf:about="http://example.com/foo">
///    <rdf:type rdf:resource="http://schema.org/Person" />
///    <schema:name>Foo</schema:name>
///  </rdf:Description>
///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
/// </rdf:RDF>"#;
///
/// let result = RdfXmlLoader::new()
///     .load(file, "http://example.com/data", &mut SimpleNodeFactory)
///     .unwrap();
/// let count = result
///     .quads
///     .iter()
///     .filter(|q| q.predicate == rdf::TYPE && q.object.to_string() == "<http://schema.org/Person>")
///     .count();
/// assert_eq!(2, count);
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct RdfXmlLoader {
    base: Option<String>,
    graph: Option<String>,
}

impl RdfXmlLoader {
    /// Builds a new [`RdfXmlLoader`].
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

    /// Sets the graph the triples are loaded into.
    #[inline]
    pub fn with_graph(mut self, graph_iri: impl Into<String>) -> Self {
        self.graph = Some(graph_iri.into());
        self
    }
}

impl Loader for RdfXmlLoader {
    type Output = LoaderResult;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<LoaderResult, Vec<Diagnostic>> {
        let root = XmlElement::parse(input, self.base.as_deref().unwrap_or(resource))
            .map_err(|e| vec![e])?;
        let graph = GraphNode::Iri(factory.iri_node(self.graph.as_deref().unwrap_or(resource)));
        let mut state = RdfXmlState {
            input,
            factory,
            graph,
            scope: BlankScope::new(),
            known_ids: FxHashSet::default(),
            result: LoaderResult::new(),
        };
        let loaded = if root.name == RDF_RDF {
            root.elements()
                .try_for_each(|element| state.load_node_element(element).map(|_| ()))
        } else {
            state.load_node_element(&root).map(|_| ())
        };
        loaded.map_err(|e| vec![e])?;
        debug!("Loaded {} quads from {resource} (RDF/XML)", state.result.len());
        Ok(state.result)
    }
}

/// The attributes of an element, sorted by role.
#[derive(Default)]
struct RdfAttributes<'a> {
    id: Option<&'a str>,
    node_id: Option<&'a str>,
    about: Option<&'a str>,
    resource: Option<&'a str>,
    datatype: Option<&'a str>,
    parse_type: Option<&'a str>,
    type_: Option<&'a str>,
    properties: Vec<(&'a str, &'a str)>,
}

struct RdfXmlState<'a, F: NodeFactory> {
    input: &'a str,
    factory: &'a mut F,
    graph: GraphNode,
    scope: BlankScope,
    known_ids: FxHashSet<String>,
    result: LoaderResult,
}

impl<F: NodeFactory> RdfXmlState<'_, F> {
    // [7.2.11] nodeElement
    fn load_node_element(&mut self, element: &XmlElement) -> Result<SubjectNode, Diagnostic> {
        if RESERVED_CORE_NAMES.contains(&element.name.as_str())
            || RESERVED_OLD_NAMES.contains(&element.name.as_str())
            || element.name == RDF_LI
        {
            return Err(self.error(
                element,
                LoaderError::syntax(format!("Invalid node element name {}", element.name)),
            ));
        }
        let attributes = self.sort_attributes(element)?;
        if attributes.resource.is_some()
            || attributes.datatype.is_some()
            || attributes.parse_type.is_some()
        {
            return Err(self.error(
                element,
                LoaderError::syntax(
                    "rdf:resource, rdf:datatype and rdf:parseType are not allowed on node elements",
                ),
            ));
        }
        let subject = match (attributes.id, attributes.node_id, attributes.about) {
            (Some(id), None, None) => SubjectNode::Iri(self.register_id(element, id)?),
            (None, Some(node_id), None) => {
                SubjectNode::Blank(self.scope.resolve(node_id, &mut *self.factory))
            }
            (None, None, Some(about)) => SubjectNode::Iri(self.iri(element, about)?),
            (None, None, None) => SubjectNode::Blank(self.scope.fresh(&mut *self.factory)),
            _ => {
                return Err(self.error(
                    element,
                    LoaderError::syntax("Only one of rdf:ID, rdf:nodeID and rdf:about can be set"),
                ));
            }
        };
        if element.name != RDF_DESCRIPTION {
            let class = self.iri(element, &element.name)?;
            self.emit_type(subject.clone(), class);
        }
        if let Some(type_) = attributes.type_ {
            let class = self.iri(element, type_)?;
            self.emit_type(subject.clone(), class);
        }
        self.emit_property_attributes(element, &subject, &attributes.properties)?;
        if element.has_significant_text() {
            return Err(self.error(
                element,
                LoaderError::syntax("Text is not allowed directly inside of a node element"),
            ));
        }
        let mut li_counter = 0;
        for property in element.elements() {
            self.load_property_element(property, &subject, &mut li_counter)?;
        }
        Ok(subject)
    }

    // [7.2.14] propertyElt
    fn load_property_element(
        &mut self,
        element: &XmlElement,
        subject: &SubjectNode,
        li_counter: &mut u64,
    ) -> Result<(), Diagnostic> {
        if RESERVED_CORE_NAMES.contains(&element.name.as_str())
            || RESERVED_OLD_NAMES.contains(&element.name.as_str())
            || element.name == RDF_DESCRIPTION
        {
            return Err(self.error(
                element,
                LoaderError::syntax(format!("Invalid property element name {}", element.name)),
            ));
        }
        let predicate = if element.name == RDF_LI {
            *li_counter += 1;
            self.factory
                .iri_node(&format!("{}_{li_counter}", rdf::NAMESPACE))
        } else {
            self.iri(element, &element.name)?
        };
        let attributes = self.sort_attributes(element)?;
        let object = match attributes.parse_type {
            Some("Resource") => {
                // [7.2.18] parseTypeResourcePropertyElt
                let object = SubjectNode::Blank(self.scope.fresh(&mut *self.factory));
                self.emit_statement(element, subject, &predicate, object.clone().into(), &attributes)?;
                let mut li_counter = 0;
                for property in element.elements() {
                    self.load_property_element(property, &object, &mut li_counter)?;
                }
                return Ok(());
            }
            Some("Collection") => {
                // [7.2.19] parseTypeCollectionPropertyElt
                let mut items = Vec::new();
                for item in element.elements() {
                    items.push(self.load_node_element(item)?);
                }
                let head = self.load_collection(items);
                self.emit_statement(element, subject, &predicate, head, &attributes)?;
                return Ok(());
            }
            Some(_) => {
                // [7.2.17] parseTypeLiteralPropertyElt, other parse types are handled the same way
                let content = self.input.get(element.content.clone()).unwrap_or_default();
                Node::from(
                    self.factory
                        .literal_node(content, rdf::XML_LITERAL.as_str(), None),
                )
            }
            None => {
                let mut children = element.elements();
                if let Some(child) = children.next() {
                    // [7.2.15] resourcePropertyElt
                    if children.next().is_some() || element.has_significant_text() {
                        return Err(self.error(
                            element,
                            LoaderError::syntax(
                                "A property element can only contain a single node element",
                            ),
                        ));
                    }
                    self.load_node_element(child)?.into()
                } else if !element.children.is_empty() {
                    // [7.2.16] literalPropertyElt
                    self.literal(element, &element.text(), attributes.datatype)?
                        .into()
                } else {
                    self.load_empty_property_value(element, &attributes)?
                }
            }
        };
        self.emit_statement(element, subject, &predicate, object, &attributes)
    }

    // [7.2.21] emptyPropertyElt
    fn load_empty_property_value(
        &mut self,
        element: &XmlElement,
        attributes: &RdfAttributes<'_>,
    ) -> Result<Node, Diagnostic> {
        if attributes.resource.is_none()
            && attributes.node_id.is_none()
            && attributes.type_.is_none()
            && attributes.properties.is_empty()
        {
            return Ok(self.literal(element, "", attributes.datatype)?.into());
        }
        let object = match (attributes.resource, attributes.node_id) {
            (Some(resource), None) => SubjectNode::Iri(self.iri(element, resource)?),
            (None, Some(node_id)) => {
                SubjectNode::Blank(self.scope.resolve(node_id, &mut *self.factory))
            }
            (None, None) => SubjectNode::Blank(self.scope.fresh(&mut *self.factory)),
            (Some(_), Some(_)) => {
                return Err(self.error(
                    element,
                    LoaderError::UnresolvableReference(
                        "rdf:resource and rdf:nodeID cannot be set on the same element".into(),
                    ),
                ));
            }
        };
        if let Some(type_) = attributes.type_ {
            let class = self.iri(element, type_)?;
            self.emit_type(object.clone(), class);
        }
        self.emit_property_attributes(element, &object, &attributes.properties)?;
        Ok(object.into())
    }

    /// Emits the `rdf:first`/`rdf:rest` chain of a collection and returns its head.
    fn load_collection(&mut self, items: Vec<SubjectNode>) -> Node {
        let first = self.factory.iri_node(rdf::FIRST.as_str());
        let rest = self.factory.iri_node(rdf::REST.as_str());
        let nil = self.factory.iri_node(rdf::NIL.as_str());
        let cells = items
            .iter()
            .map(|_| SubjectNode::Blank(self.scope.fresh(&mut *self.factory)))
            .collect::<Vec<_>>();
        for (i, (cell, item)) in cells.iter().zip(items).enumerate() {
            self.emit(cell.clone(), first.clone(), item);
            match cells.get(i + 1) {
                Some(next) => self.emit(cell.clone(), rest.clone(), next.clone()),
                None => self.emit(cell.clone(), rest.clone(), nil.clone()),
            }
        }
        cells
            .into_iter()
            .next()
            .map_or_else(|| Node::from(nil), Node::from)
    }

    /// Emits a property element statement and its reification if it has a `rdf:ID`.
    fn emit_statement(
        &mut self,
        element: &XmlElement,
        subject: &SubjectNode,
        predicate: &NamedNode,
        object: Node,
        attributes: &RdfAttributes<'_>,
    ) -> Result<(), Diagnostic> {
        self.emit(subject.clone(), predicate.clone(), object.clone());
        if let Some(id) = attributes.id {
            let statement = SubjectNode::Iri(self.register_id(element, id)?);
            let rdf_statement = self.factory.iri_node(rdf::STATEMENT.as_str());
            self.emit_type(statement.clone(), rdf_statement);
            let reified = [
                (rdf::SUBJECT, Node::from(subject.clone())),
                (rdf::PREDICATE, predicate.clone().into()),
                (rdf::OBJECT, object),
            ];
            for (property, value) in reified {
                let property = self.factory.iri_node(property.as_str());
                self.emit(statement.clone(), property, value);
            }
        }
        Ok(())
    }

    // [7.2.10] propertyAttr
    fn emit_property_attributes(
        &mut self,
        element: &XmlElement,
        subject: &SubjectNode,
        properties: &[(&str, &str)],
    ) -> Result<(), Diagnostic> {
        for (name, value) in properties {
            let predicate = self.iri(element, name)?;
            let literal = self.literal(element, value, None)?;
            self.emit(subject.clone(), predicate, literal);
        }
        Ok(())
    }

    fn sort_attributes<'e>(&self, element: &'e XmlElement) -> Result<RdfAttributes<'e>, Diagnostic> {
        let mut attributes = RdfAttributes::default();
        for attribute in &element.attributes {
            let value = attribute.value.as_str();
            match attribute.name.as_str() {
                RDF_ID => {
                    if !is_nc_name(value) {
                        return Err(self.error(
                            element,
                            LoaderError::syntax(format!("{value} is not a valid rdf:ID value")),
                        ));
                    }
                    attributes.id = Some(value);
                }
                RDF_NODE_ID => {
                    if !is_nc_name(value) {
                        return Err(self.error(
                            element,
                            LoaderError::syntax(format!("{value} is not a valid rdf:nodeID value")),
                        ));
                    }
                    attributes.node_id = Some(value);
                }
                RDF_ABOUT => attributes.about = Some(value),
                RDF_RESOURCE => attributes.resource = Some(value),
                RDF_DATATYPE => attributes.datatype = Some(value),
                RDF_PARSE_TYPE => attributes.parse_type = Some(value),
                name if name == rdf::TYPE.as_str() => attributes.type_ = Some(value),
                name if RESERVED_OLD_NAMES.contains(&name)
                    || name == RDF_LI
                    || name == RDF_DESCRIPTION
                    || name == RDF_RDF =>
                {
                    return Err(self.error(
                        element,
                        LoaderError::syntax(format!("{name} is not a valid property attribute")),
                    ));
                }
                name => attributes.properties.push((name, value)),
            }
        }
        Ok(attributes)
    }

    /// Builds a literal with the datatype if any, else with the language in scope.
    fn literal(
        &mut self,
        element: &XmlElement,
        value: &str,
        datatype: Option<&str>,
    ) -> Result<Literal, Diagnostic> {
        Ok(match (datatype, &element.language) {
            (Some(datatype), _) => {
                let datatype = self.iri(element, datatype)?;
                self.factory.literal_node(value, datatype.as_str(), None)
            }
            (None, Some(language)) => {
                self.factory
                    .literal_node(value, rdf::LANG_STRING.as_str(), Some(language.as_str()))
            }
            (None, None) => self.factory.literal_node(value, xsd::STRING.as_str(), None),
        })
    }

    /// Resolves an IRI against the base in scope.
    fn iri(&mut self, element: &XmlElement, iri: &str) -> Result<NamedNode, Diagnostic> {
        let iri = resolve_relative(&element.base, iri).map_err(|e| self.error(element, e))?;
        if !is_absolute(&iri) {
            return Err(self.error(
                element,
                MalformedUriError::new(iri, "an absolute IRI is expected"),
            ));
        }
        Ok(self.factory.iri_node(&iri))
    }

    fn register_id(&mut self, element: &XmlElement, id: &str) -> Result<NamedNode, Diagnostic> {
        let iri = self.iri(element, &format!("#{id}"))?;
        if !self.known_ids.insert(iri.as_str().into()) {
            return Err(self.error(element, LoaderError::DuplicateId(iri.as_str().into())));
        }
        Ok(iri)
    }

    fn emit_type(&mut self, subject: SubjectNode, class: NamedNode) {
        let predicate = self.factory.iri_node(rdf::TYPE.as_str());
        self.emit(subject, predicate, class);
    }

    fn emit(&mut self, subject: impl Into<SubjectNode>, predicate: NamedNode, object: impl Into<Node>) {
        self.result
            .push_quad(Quad::new(subject, predicate, object, self.graph.clone()));
    }

    fn error(&self, element: &XmlElement, error: impl Into<LoaderError>) -> Diagnostic {
        Diagnostic::new(error).in_source(self.input, element.offset..element.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxlmodel::SimpleNodeFactory;

    const PREFIXES: &str = "xmlns:rdf='http://www.w3.org/1999/02/22-rdf-syntax-ns#' xmlns:ex='http://example.com/'";

    fn load(body: &str) -> Result<LoaderResult, Vec<Diagnostic>> {
        RdfXmlLoader::new().load(
            &format!("<rdf:RDF {PREFIXES}>{body}</rdf:RDF>"),
            "http://example.com/doc",
            &mut SimpleNodeFactory,
        )
    }

    fn quads(body: &str) -> Vec<String> {
        load(body)
            .unwrap()
            .quads
            .iter()
            .map(|q| {
                format!("{} {} {}", q.subject, q.predicate, q.object)
            })
            .collect()
    }

    #[test]
    fn reification() {
        let result = quads("<rdf:Description rdf:about='http://example.com/s'><ex:p rdf:ID='r1'>val</ex:p></rdf:Description>");
        assert_eq!(
            result,
            [
                "<http://example.com/s> <http://example.com/p> \"val\"",
                "<http://example.com/doc#r1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement>",
                "<http://example.com/doc#r1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#subject> <http://example.com/s>",
                "<http://example.com/doc#r1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate> <http://example.com/p>",
                "<http://example.com/doc#r1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#object> \"val\"",
            ]
        );
    }

    #[test]
    fn duplicate_ids() {
        let errors = load("<ex:A rdf:ID='a'/><rdf:Description rdf:about='http://example.com/s'><ex:p rdf:ID='a'>val</ex:p></rdf:Description>").unwrap_err();
        assert_eq!(
            errors[0].error(),
            &LoaderError::DuplicateId("http://example.com/doc#a".into())
        );
    }

    #[test]
    fn typed_node_and_property_attributes() {
        let result = quads("<ex:Person rdf:about='#me' ex:name='Me' xml:lang='en'><rdf:type rdf:resource='http://example.com/Agent'/></ex:Person>");
        assert_eq!(
            result,
            [
                "<http://example.com/doc#me> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/Person>",
                "<http://example.com/doc#me> <http://example.com/name> \"Me\"@en",
                "<http://example.com/doc#me> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/Agent>",
            ]
        );
    }

    #[test]
    fn literal_typing() {
        let result = quads(
            "<rdf:Description rdf:about='http://example.com/s' xml:lang='fr'>
                <ex:a rdf:datatype='http://www.w3.org/2001/XMLSchema#integer'>1</ex:a>
                <ex:b>bonjour</ex:b>
                <ex:c xml:lang=''>plain</ex:c>
                <ex:d></ex:d>
            </rdf:Description>",
        );
        assert_eq!(result[0], "<http://example.com/s> <http://example.com/a> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer>");
        assert_eq!(result[1], "<http://example.com/s> <http://example.com/b> \"bonjour\"@fr");
        assert_eq!(result[2], "<http://example.com/s> <http://example.com/c> \"plain\"");
        assert_eq!(result[3], "<http://example.com/s> <http://example.com/d> \"\"@fr");
    }

    #[test]
    fn list_items_and_node_ids() {
        let result = load(
            "<rdf:Bag rdf:nodeID='bag'><rdf:li>a</rdf:li><rdf:li rdf:nodeID='bag'/><ex:p/><rdf:li>c</rdf:li></rdf:Bag>",
        )
        .unwrap();
        let predicates = result
            .quads
            .iter()
            .map(|q| q.predicate.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            predicates,
            [
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#_1",
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#_2",
                "http://example.com/p",
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#_3",
            ]
        );
        assert_eq!(Node::from(result.quads[0].subject.clone()), result.quads[2].object);
    }

    #[test]
    fn parse_type_collection() {
        let result = load(
            "<rdf:Description rdf:about='http://example.com/s'><ex:p rdf:parseType='Collection'><rdf:Description rdf:about='http://example.com/a'/><rdf:Description rdf:about='http://example.com/b'/></ex:p><ex:q rdf:parseType='Collection'/></rdf:Description>",
        )
        .unwrap();
        let quads = &result.quads;
        assert_eq!(quads.len(), 6);
        assert_eq!(quads[0].predicate, rdf::FIRST);
        assert_eq!(quads[0].object.to_string(), "<http://example.com/a>");
        assert_eq!(quads[1].predicate, rdf::REST);
        assert_eq!(quads[1].object, Node::from(quads[2].subject.clone()));
        assert_eq!(quads[3].object, Node::from(rdf::NIL));
        assert_eq!(quads[4].object, Node::from(quads[0].subject.clone()));
        assert_eq!(quads[5].object, Node::from(rdf::NIL));
    }

    #[test]
    fn parse_type_resource_and_literal() {
        let result = quads(
            "<rdf:Description rdf:about='http://example.com/s'><ex:p rdf:parseType='Resource'><ex:q>v</ex:q></ex:p><ex:x rdf:parseType='Literal'><b>bold</b></ex:x></rdf:Description>",
        );
        assert_eq!(result.len(), 3);
        assert!(result[0].starts_with("<http://example.com/s> <http://example.com/p> _:"));
        assert!(result[1].ends_with("<http://example.com/q> \"v\""));
        assert_eq!(
            result[2],
            "<http://example.com/s> <http://example.com/x> \"<b>bold</b>\"^^<http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral>"
        );
    }

    #[test]
    fn empty_property_with_attributes() {
        let result = quads(
            "<rdf:Description rdf:about='http://example.com/s'><ex:p rdf:resource='o' ex:q='v'/></rdf:Description>",
        );
        assert_eq!(
            result,
            [
                "<http://example.com/o> <http://example.com/q> \"v\"",
                "<http://example.com/s> <http://example.com/p> <http://example.com/o>",
            ]
        );
    }

    #[test]
    fn resource_and_node_id_conflict() {
        let errors = load("<rdf:Description><ex:p rdf:resource='o' rdf:nodeID='b'/></rdf:Description>").unwrap_err();
        assert!(matches!(
            errors[0].error(),
            LoaderError::UnresolvableReference(_)
        ));
    }

    #[test]
    fn reserved_names() {
        assert!(load("<rdf:li/>").is_err());
        assert!(load("<rdf:Description><rdf:Description/></rdf:Description>").is_err());
        assert!(load("<rdf:Description rdf:aboutEach='x'/>").is_err());
        assert!(load("<rdf:Description><rdf:bagID/></rdf:Description>").is_err());
    }

    #[test]
    fn single_node_element_root_and_base() {
        let result = RdfXmlLoader::new()
            .with_graph("http://example.com/g")
            .load(
                &format!("<ex:Thing {PREFIXES} xml:base='http://other.com/dir/' rdf:about='a'/>"),
                "http://example.com/doc",
                &mut SimpleNodeFactory,
            )
            .unwrap();
        assert_eq!(
            result.quads[0].to_string(),
            "<http://other.com/dir/a> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/Thing> <http://example.com/g> ."
        );
    }
}
