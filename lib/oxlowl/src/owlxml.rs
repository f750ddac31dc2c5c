use crate::builder::OntologyBuilder;
use crate::ontology::OntologyDocument;
use crate::parser::{OwlNode, OwlSymbol};
use oxlmodel::vocab::{owl, rdf};
use oxlmodel::{Diagnostic, Loader, LoaderError, NodeFactory, TextPosition};
use oxlrdfxml::xml::XmlElement;
use tracing::debug;

/// An [OWL 2 XML serialization](https://www.w3.org/TR/owl2-xml-serialization/) loader.
///
/// Relative IRIs are resolved against the ontology IRI if set, the `xml:base` of the root element otherwise.
///
/// ```
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlowl::OwlXmlLoader;
///
/// let file = r#"<?xml version="1.0"?>
/// <Ontology xmlns="http://www.w3.org/2002/07/owl#" ontologyIRI="http://example.com/ontology">
///   <Prefix name="" IRI="http://example.com/"/>
///   <Declaration><Class abbreviatedIRI=":Person"/></Declaration>
///   <SubClassOf><Class IRI="Student"/><Class abbreviatedIRI=":Person"/></SubClassOf>
/// </Ontology>"#;
///
/// let document = OwlXmlLoader::new()
///     .load(file, "http://example.com/ontology.owx", &mut SimpleNodeFactory)
///     .unwrap();
/// assert_eq!(
///     document.axioms[1].to_string(),
///     "SubClassOf(<http://example.com/Student> <http://example.com/Person>)"
/// );
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct OwlXmlLoader {
    base: Option<String>,
}

impl OwlXmlLoader {
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
}

impl Loader for OwlXmlLoader {
    type Output = OntologyDocument;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<OntologyDocument, Vec<Diagnostic>> {
        let base = self.base.as_deref().unwrap_or(resource);
        let root = XmlElement::parse(input, base).map_err(|e| vec![e])?;
        let tree = OwlXmlReader { input }
            .read_document(&root)
            .map_err(|e| vec![e])?;
        let document = OntologyBuilder::new(input, base, factory)
            .load_document(&tree)
            .map_err(|e| vec![e])?;
        debug!("Loaded {} axioms from {resource} (OWL/XML)", document.len());
        Ok(document)
    }
}

/// Rewrites an OWL/XML element tree into the tree of the functional syntax parser.
struct OwlXmlReader<'a> {
    input: &'a str,
}

impl OwlXmlReader<'_> {
    fn read_document(&self, root: &XmlElement) -> Result<OwlNode, Diagnostic> {
        let name = self.owl_name(root)?;
        if name != "Ontology" {
            return Err(self.error(
                root,
                format!("The root element must be Ontology, found {name}"),
            ));
        }
        let position = self.position(root);
        let mut document = OwlNode::leaf(OwlSymbol::Document, root.base.as_str(), position);
        let mut ontology = OwlNode::leaf(OwlSymbol::Call, "Ontology", position);
        if let Some(iri) = root.attribute("ontologyIRI") {
            ontology.push(OwlNode::leaf(OwlSymbol::Iri, iri, position));
            if let Some(version) = root.attribute("versionIRI") {
                ontology.push(OwlNode::leaf(OwlSymbol::Iri, version, position));
            }
        }
        for element in root.elements() {
            match self.owl_name(element)? {
                "Prefix" => {
                    let Some(namespace) = element.attribute("IRI") else {
                        return Err(self.error(element, "The Prefix element must have an IRI attribute"));
                    };
                    let position = self.position(element);
                    document.push(
                        OwlNode::leaf(
                            OwlSymbol::Prefix,
                            element.attribute("name").unwrap_or_default(),
                            position,
                        )
                        .with_child(OwlNode::leaf(OwlSymbol::Iri, namespace, position)),
                    );
                }
                "Import" => {
                    let position = self.position(element);
                    ontology.push(
                        OwlNode::leaf(OwlSymbol::Call, "Import", position).with_child(
                            OwlNode::leaf(OwlSymbol::Iri, element.text().trim(), position),
                        ),
                    );
                }
                _ => ontology.push(self.read_element(element)?),
            }
        }
        document.push(ontology);
        Ok(document)
    }

    fn read_element(&self, element: &XmlElement) -> Result<OwlNode, Diagnostic> {
        let name = self.owl_name(element)?;
        let position = self.position(element);
        Ok(match name {
            "IRI" => OwlNode::leaf(OwlSymbol::Iri, element.text().trim(), position),
            "AbbreviatedIRI" => {
                OwlNode::leaf(OwlSymbol::PrefixedName, element.text().trim(), position)
            }
            "AnonymousIndividual" => {
                let Some(node_id) = element.attribute("nodeID") else {
                    return Err(self.error(
                        element,
                        "The AnonymousIndividual element must have a nodeID attribute",
                    ));
                };
                OwlNode::leaf(OwlSymbol::BlankNodeLabel, node_id, position)
            }
            "Literal" => self.read_literal(element),
            "Class" | "Datatype" | "ObjectProperty" | "DataProperty" | "AnnotationProperty"
            | "NamedIndividual" => {
                OwlNode::leaf(OwlSymbol::Call, name, position).with_child(self.read_iri(element)?)
            }
            "DatatypeRestriction" => {
                let mut node = OwlNode::leaf(OwlSymbol::Call, name, position);
                for child in element.elements() {
                    if self.owl_name(child)? == "FacetRestriction" {
                        let Some(facet) = child.attribute("facet") else {
                            return Err(self.error(
                                child,
                                "The FacetRestriction element must have a facet attribute",
                            ));
                        };
                        node.push(OwlNode::leaf(OwlSymbol::Iri, facet, self.position(child)));
                        for value in child.elements() {
                            node.push(self.read_element(value)?);
                        }
                    } else {
                        node.push(self.read_element(child)?);
                    }
                }
                node
            }
            "HasKey" => self.read_has_key(element)?,
            _ => {
                let mut node = OwlNode::leaf(OwlSymbol::Call, name, position);
                if let Some(cardinality) = element.attribute("cardinality") {
                    node.push(OwlNode::leaf(
                        OwlSymbol::Integer,
                        cardinality.trim(),
                        position,
                    ));
                }
                for child in element.elements() {
                    node.push(self.read_element(child)?);
                }
                node
            }
        })
    }

    /// Groups the properties of a key into an object property list and a data property list.
    fn read_has_key(&self, element: &XmlElement) -> Result<OwlNode, Diagnostic> {
        let position = self.position(element);
        let mut node = OwlNode::leaf(OwlSymbol::Call, "HasKey", position);
        let mut object_properties = OwlNode::new(OwlSymbol::Group, position);
        let mut data_properties = OwlNode::new(OwlSymbol::Group, position);
        for child in element.elements() {
            let converted = self.read_element(child)?;
            match self.owl_name(child)? {
                "ObjectProperty" | "ObjectInverseOf" => object_properties.push(converted),
                "DataProperty" => data_properties.push(converted),
                _ => node.push(converted),
            }
        }
        node.push(object_properties);
        node.push(data_properties);
        Ok(node)
    }

    fn read_literal(&self, element: &XmlElement) -> OwlNode {
        let position = self.position(element);
        let mut node = OwlNode::leaf(OwlSymbol::Literal, element.text(), position);
        match element.attribute("datatypeIRI") {
            Some(datatype) if datatype != rdf::PLAIN_LITERAL.as_str() => {
                node.push(OwlNode::leaf(OwlSymbol::Iri, datatype, position));
            }
            _ => {
                if let Some(language) = &element.language {
                    node.push(OwlNode::leaf(OwlSymbol::LangTag, language.as_str(), position));
                }
            }
        }
        node
    }

    /// The `IRI` or `abbreviatedIRI` attribute of an entity element.
    fn read_iri(&self, element: &XmlElement) -> Result<OwlNode, Diagnostic> {
        let position = self.position(element);
        if let Some(iri) = element.attribute("IRI") {
            Ok(OwlNode::leaf(OwlSymbol::Iri, iri, position))
        } else if let Some(name) = element.attribute("abbreviatedIRI") {
            Ok(OwlNode::leaf(OwlSymbol::PrefixedName, name, position))
        } else {
            Err(self.error(
                element,
                "An entity element must have an IRI or an abbreviatedIRI attribute",
            ))
        }
    }

    /// The local name of an element of the OWL namespace.
    fn owl_name<'e>(&self, element: &'e XmlElement) -> Result<&'e str, Diagnostic> {
        element
            .name
            .strip_prefix(owl::NAMESPACE)
            .ok_or_else(|| {
                self.error(
                    element,
                    format!("Unexpected element {} outside of the OWL namespace", element.name),
                )
            })
    }

    fn position(&self, element: &XmlElement) -> TextPosition {
        TextPosition::from_offset(self.input, element.offset)
    }

    fn error(&self, element: &XmlElement, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(LoaderError::syntax(message))
            .in_source(self.input, element.offset..element.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::Axiom;
    use crate::expression::ClassExpression;
    use oxlmodel::SimpleNodeFactory;

    fn load(input: &str) -> Result<OntologyDocument, Vec<Diagnostic>> {
        OwlXmlLoader::new().load(input, "http://example.com/doc.owx", &mut SimpleNodeFactory)
    }

    #[test]
    fn header_and_prefixes() {
        let document = load(
            r#"<Ontology xmlns="http://www.w3.org/2002/07/owl#" xml:base="http://example.com/base/" ontologyIRI="o" versionIRI="o/2">
              <Prefix name="ex" IRI="http://example.com/ns#"/>
              <Import>http://example.com/imported</Import>
              <Annotation><AnnotationProperty abbreviatedIRI="ex:note"/><Literal xml:lang="en">Hi</Literal></Annotation>
              <Declaration><NamedIndividual abbreviatedIRI="ex:alice"/></Declaration>
            </Ontology>"#,
        )
        .unwrap();
        assert_eq!(
            document.ontology_iri.as_deref(),
            Some("http://example.com/base/o")
        );
        assert_eq!(
            document.version_iri.as_deref(),
            Some("http://example.com/base/o/2")
        );
        assert_eq!(document.imports, ["http://example.com/imported"]);
        assert_eq!(
            document.annotations[0].to_string(),
            "Annotation(<http://example.com/ns#note> \"Hi\"@en)"
        );
        assert_eq!(
            document.axioms[0].to_string(),
            "Declaration(NamedIndividual(<http://example.com/ns#alice>))"
        );
    }

    #[test]
    fn cardinality_keys_and_literals() {
        let document = load(
            r#"<Ontology xmlns="http://www.w3.org/2002/07/owl#" ontologyIRI="http://example.com/">
              <SubClassOf>
                <Class IRI="Parent"/>
                <ObjectMinCardinality cardinality="2"><ObjectProperty IRI="hasChild"/></ObjectMinCardinality>
              </SubClassOf>
              <HasKey>
                <Class IRI="Person"/>
                <DataProperty IRI="ssn"/>
                <ObjectProperty IRI="mother"/>
              </HasKey>
              <DataPropertyAssertion>
                <DataProperty IRI="name"/>
                <AnonymousIndividual nodeID="x"/>
                <Literal datatypeIRI="http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral">Bob</Literal>
              </DataPropertyAssertion>
            </Ontology>"#,
        )
        .unwrap();
        let Axiom::SubClassOf { super_class, .. } = &document.axioms[0].axiom else {
            panic!("SubClassOf expected")
        };
        assert!(matches!(
            super_class,
            ClassExpression::ObjectMinCardinality {
                cardinality: 2,
                filler: None,
                ..
            }
        ));
        assert_eq!(
            document.axioms[1].to_string(),
            "HasKey(<http://example.com/Person> (<http://example.com/mother>) (<http://example.com/ssn>))"
        );
        let Axiom::DataPropertyAssertion { target, .. } = &document.axioms[2].axiom else {
            panic!("DataPropertyAssertion expected")
        };
        assert_eq!(
            target.datatype().as_str(),
            "http://www.w3.org/2001/XMLSchema#string"
        );
    }

    #[test]
    fn datatype_restriction() {
        let document = load(
            r#"<Ontology xmlns="http://www.w3.org/2002/07/owl#" ontologyIRI="http://example.com/">
              <DatatypeDefinition>
                <Datatype IRI="adultAge"/>
                <DatatypeRestriction>
                  <Datatype IRI="http://www.w3.org/2001/XMLSchema#integer"/>
                  <FacetRestriction facet="http://www.w3.org/2001/XMLSchema#minInclusive">
                    <Literal datatypeIRI="http://www.w3.org/2001/XMLSchema#integer">18</Literal>
                  </FacetRestriction>
                </DatatypeRestriction>
              </DatatypeDefinition>
            </Ontology>"#,
        )
        .unwrap();
        assert_eq!(
            document.axioms[0].to_string(),
            "DatatypeDefinition(<http://example.com/adultAge> DatatypeRestriction(<http://www.w3.org/2001/XMLSchema#integer> <http://www.w3.org/2001/XMLSchema#minInclusive> \"18\"^^<http://www.w3.org/2001/XMLSchema#integer>))"
        );
    }

    #[test]
    fn foreign_element() {
        let errors = load(
            r#"<Ontology xmlns="http://www.w3.org/2002/07/owl#"><ex:Foo xmlns:ex="http://example.com/"/></Ontology>"#,
        )
        .unwrap_err();
        assert_eq!(
            errors[0].error().to_string(),
            "Unexpected element http://example.com/Foo outside of the OWL namespace"
        );
        assert_eq!(errors[0].location().unwrap().start.column, 49);
    }
}
