//! Shared tree walker building an [`OntologyDocument`] from the functional syntax and OWL/XML trees.

use crate::axiom::{AnnotatedAxiom, Annotation, AnnotationSubject, AnnotationValue, Axiom};
use crate::entity::{DataProperty, Entity, Individual};
use crate::expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
use crate::ontology::OntologyDocument;
use crate::parser::{OwlNode, OwlSymbol};
use oxlmodel::escape::unescape_local_name;
use oxlmodel::uri::{is_absolute, resolve_relative};
use oxlmodel::vocab::{rdf, xsd};
use oxlmodel::{
    BlankScope, Diagnostic, Literal, LoaderError, MalformedUriError, NamedNode, NodeFactory,
};
use rustc_hash::FxHashMap;

type LoadResult<T> = Result<T, Diagnostic>;

/// The state of one ontology document load, threaded through the walk.
pub(crate) struct OntologyBuilder<'a, F: NodeFactory> {
    input: &'a str,
    base: String,
    prefixes: FxHashMap<String, String>,
    scope: BlankScope,
    factory: &'a mut F,
}

impl<'a, F: NodeFactory> OntologyBuilder<'a, F> {
    pub(crate) fn new(input: &'a str, base: impl Into<String>, factory: &'a mut F) -> Self {
        Self {
            input,
            base: base.into(),
            prefixes: FxHashMap::default(),
            scope: BlankScope::new(),
            factory,
        }
    }

    pub(crate) fn load_document(&mut self, node: &OwlNode) -> LoadResult<OntologyDocument> {
        if let Some(base) = &node.value {
            base.clone_into(&mut self.base);
        }
        let mut document = OntologyDocument::new();
        for child in &node.children {
            if child.symbol == OwlSymbol::Prefix {
                let namespace = child.child(0).map_or("", OwlNode::value);
                self.prefixes.insert(child.value().into(), namespace.into());
            } else {
                self.load_ontology(child, &mut document)?;
            }
        }
        Ok(document)
    }

    // Ontology := 'Ontology' '(' [ ontologyIRI [ versionIRI ] ] directlyImportsDocuments ontologyAnnotations axioms ')'
    fn load_ontology(&mut self, node: &OwlNode, document: &mut OntologyDocument) -> LoadResult<()> {
        if !is_call(node, "Ontology") {
            return Err(self.unexpected(node, "an ontology"));
        }
        let mut arguments = node.children.iter().peekable();
        if let Some(iri) = arguments.next_if(|n| is_iri(n)) {
            let iri = self.load_iri(iri)?;
            iri.as_str().clone_into(&mut self.base);
            document.ontology_iri = Some(iri.as_str().into());
            if let Some(version) = arguments.next_if(|n| is_iri(n)) {
                document.version_iri = Some(self.load_iri(version)?.as_str().into());
            }
        }
        for child in arguments {
            if is_call(child, "Import") {
                let [iri] = child.children.as_slice() else {
                    return Err(self.arity(child, child.children.len(), "an IRI"));
                };
                document.add_import(self.load_iri(iri)?.as_str());
            } else if is_call(child, "Annotation") {
                document.annotations.push(self.load_annotation(child)?);
            } else {
                document.axioms.push(self.load_axiom(child)?);
            }
        }
        Ok(())
    }

    fn load_axiom(&mut self, node: &OwlNode) -> LoadResult<AnnotatedAxiom> {
        if node.symbol != OwlSymbol::Call {
            return Err(self.unexpected(node, "an axiom"));
        }
        let (annotations, args) = self.split_annotations(node)?;
        let axiom = match node.value() {
            "Declaration" => {
                let [entity] = args else {
                    return Err(self.arity(node, args.len(), "an entity"));
                };
                Axiom::Declaration(self.load_declared_entity(entity)?)
            }
            "SubClassOf" => {
                let [sub_class, super_class] = args else {
                    return Err(self.arity(node, args.len(), "two class expressions"));
                };
                Axiom::SubClassOf {
                    sub_class: self.load_class_expression(sub_class)?,
                    super_class: self.load_class_expression(super_class)?,
                }
            }
            "EquivalentClasses" => {
                Axiom::EquivalentClasses(self.list(node, args, 2, Self::load_class_expression)?)
            }
            "DisjointClasses" => {
                Axiom::DisjointClasses(self.list(node, args, 2, Self::load_class_expression)?)
            }
            "DisjointUnion" => {
                let [class, classes @ ..] = args else {
                    return Err(self.arity(node, 0, "a class and class expressions"));
                };
                Axiom::DisjointUnion {
                    class: self.load_entity_iri(class, "Class")?.into(),
                    disjoint_classes: self.list(node, classes, 2, Self::load_class_expression)?,
                }
            }
            "SubObjectPropertyOf" => {
                let [sub_property, super_property] = args else {
                    return Err(self.arity(node, args.len(), "two object property expressions"));
                };
                let super_property = self.load_object_property(super_property)?;
                if is_call(sub_property, "ObjectPropertyChain") {
                    Axiom::SubPropertyChainOf {
                        property_chain: self.list(
                            sub_property,
                            &sub_property.children,
                            2,
                            Self::load_object_property,
                        )?,
                        super_property,
                    }
                } else {
                    Axiom::SubObjectPropertyOf {
                        sub_property: self.load_object_property(sub_property)?,
                        super_property,
                    }
                }
            }
            "EquivalentObjectProperties" => Axiom::EquivalentObjectProperties(self.list(
                node,
                args,
                2,
                Self::load_object_property,
            )?),
            "DisjointObjectProperties" => Axiom::DisjointObjectProperties(self.list(
                node,
                args,
                2,
                Self::load_object_property,
            )?),
            "InverseObjectProperties" => {
                let [first, second] = args else {
                    return Err(self.arity(node, args.len(), "two object property expressions"));
                };
                Axiom::InverseObjectProperties(
                    self.load_object_property(first)?,
                    self.load_object_property(second)?,
                )
            }
            "ObjectPropertyDomain" | "ObjectPropertyRange" => {
                let [property, class] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "an object property expression and a class expression",
                    ));
                };
                let property = self.load_object_property(property)?;
                let class = self.load_class_expression(class)?;
                if node.value() == "ObjectPropertyDomain" {
                    Axiom::ObjectPropertyDomain {
                        property,
                        domain: class,
                    }
                } else {
                    Axiom::ObjectPropertyRange {
                        property,
                        range: class,
                    }
                }
            }
            name @ ("FunctionalObjectProperty"
            | "InverseFunctionalObjectProperty"
            | "ReflexiveObjectProperty"
            | "IrreflexiveObjectProperty"
            | "SymmetricObjectProperty"
            | "AsymmetricObjectProperty"
            | "TransitiveObjectProperty") => {
                let [property] = args else {
                    return Err(self.arity(node, args.len(), "an object property expression"));
                };
                let property = self.load_object_property(property)?;
                match name {
                    "FunctionalObjectProperty" => Axiom::FunctionalObjectProperty(property),
                    "InverseFunctionalObjectProperty" => {
                        Axiom::InverseFunctionalObjectProperty(property)
                    }
                    "ReflexiveObjectProperty" => Axiom::ReflexiveObjectProperty(property),
                    "IrreflexiveObjectProperty" => Axiom::IrreflexiveObjectProperty(property),
                    "SymmetricObjectProperty" => Axiom::SymmetricObjectProperty(property),
                    "AsymmetricObjectProperty" => Axiom::AsymmetricObjectProperty(property),
                    _ => Axiom::TransitiveObjectProperty(property),
                }
            }
            "SubDataPropertyOf" => {
                let [sub_property, super_property] = args else {
                    return Err(self.arity(node, args.len(), "two data properties"));
                };
                Axiom::SubDataPropertyOf {
                    sub_property: self.load_data_property(sub_property)?,
                    super_property: self.load_data_property(super_property)?,
                }
            }
            "EquivalentDataProperties" => Axiom::EquivalentDataProperties(self.list(
                node,
                args,
                2,
                Self::load_data_property,
            )?),
            "DisjointDataProperties" => Axiom::DisjointDataProperties(self.list(
                node,
                args,
                2,
                Self::load_data_property,
            )?),
            "DataPropertyDomain" => {
                let [property, domain] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "a data property and a class expression",
                    ));
                };
                Axiom::DataPropertyDomain {
                    property: self.load_data_property(property)?,
                    domain: self.load_class_expression(domain)?,
                }
            }
            "DataPropertyRange" => {
                let [property, range] = args else {
                    return Err(self.arity(node, args.len(), "a data property and a data range"));
                };
                Axiom::DataPropertyRange {
                    property: self.load_data_property(property)?,
                    range: self.load_data_range(range)?,
                }
            }
            "FunctionalDataProperty" => {
                let [property] = args else {
                    return Err(self.arity(node, args.len(), "a data property"));
                };
                Axiom::FunctionalDataProperty(self.load_data_property(property)?)
            }
            "DatatypeDefinition" => {
                let [datatype, range] = args else {
                    return Err(self.arity(node, args.len(), "a datatype and a data range"));
                };
                Axiom::DatatypeDefinition {
                    datatype: self.load_entity_iri(datatype, "Datatype")?.into(),
                    range: self.load_data_range(range)?,
                }
            }
            "HasKey" => {
                let [class, object_properties, data_properties] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "a class expression and two property lists",
                    ));
                };
                for group in [object_properties, data_properties] {
                    if group.symbol != OwlSymbol::Group {
                        return Err(self.unexpected(group, "a parenthesized property list"));
                    }
                }
                Axiom::HasKey {
                    class: self.load_class_expression(class)?,
                    object_properties: self.list(
                        object_properties,
                        &object_properties.children,
                        0,
                        Self::load_object_property,
                    )?,
                    data_properties: self.list(
                        data_properties,
                        &data_properties.children,
                        0,
                        Self::load_data_property,
                    )?,
                }
            }
            "SameIndividual" => {
                Axiom::SameIndividual(self.list(node, args, 2, Self::load_individual)?)
            }
            "DifferentIndividuals" => {
                Axiom::DifferentIndividuals(self.list(node, args, 2, Self::load_individual)?)
            }
            "ClassAssertion" => {
                let [class, individual] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "a class expression and an individual",
                    ));
                };
                Axiom::ClassAssertion {
                    class: self.load_class_expression(class)?,
                    individual: self.load_individual(individual)?,
                }
            }
            "ObjectPropertyAssertion" | "NegativeObjectPropertyAssertion" => {
                let [property, source, target] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "an object property expression and two individuals",
                    ));
                };
                let property = self.load_object_property(property)?;
                let source = self.load_individual(source)?;
                let target = self.load_individual(target)?;
                if node.value() == "ObjectPropertyAssertion" {
                    Axiom::ObjectPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                } else {
                    Axiom::NegativeObjectPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                }
            }
            "DataPropertyAssertion" | "NegativeDataPropertyAssertion" => {
                let [property, source, target] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "a data property, an individual and a literal",
                    ));
                };
                let property = self.load_data_property(property)?;
                let source = self.load_individual(source)?;
                let target = self.load_literal(target)?;
                if node.value() == "DataPropertyAssertion" {
                    Axiom::DataPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                } else {
                    Axiom::NegativeDataPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                }
            }
            "AnnotationAssertion" => {
                let [property, subject, value] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "an annotation property, a subject and a value",
                    ));
                };
                Axiom::AnnotationAssertion {
                    property: self.load_entity_iri(property, "AnnotationProperty")?.into(),
                    subject: self.load_annotation_subject(subject)?,
                    value: self.load_annotation_value(value)?,
                }
            }
            "SubAnnotationPropertyOf" => {
                let [sub_property, super_property] = args else {
                    return Err(self.arity(node, args.len(), "two annotation properties"));
                };
                Axiom::SubAnnotationPropertyOf {
                    sub_property: self.load_entity_iri(sub_property, "AnnotationProperty")?.into(),
                    super_property: self
                        .load_entity_iri(super_property, "AnnotationProperty")?
                        .into(),
                }
            }
            "AnnotationPropertyDomain" | "AnnotationPropertyRange" => {
                let [property, iri] = args else {
                    return Err(self.arity(node, args.len(), "an annotation property and an IRI"));
                };
                let property = self.load_entity_iri(property, "AnnotationProperty")?.into();
                let iri = self.load_iri(iri)?;
                if node.value() == "AnnotationPropertyDomain" {
                    Axiom::AnnotationPropertyDomain {
                        property,
                        domain: iri,
                    }
                } else {
                    Axiom::AnnotationPropertyRange {
                        property,
                        range: iri,
                    }
                }
            }
            name => {
                return Err(self.error(node, LoaderError::syntax(format!("Unknown axiom {name}"))));
            }
        };
        Ok(AnnotatedAxiom::new(axiom, annotations))
    }

    /// Splits the leading annotations of an axiom or of an annotation from its other arguments.
    fn split_annotations<'n>(
        &mut self,
        node: &'n OwlNode,
    ) -> LoadResult<(Vec<Annotation>, &'n [OwlNode])> {
        let count = node
            .children
            .iter()
            .take_while(|child| is_call(child, "Annotation"))
            .count();
        let (annotations, args) = node.children.split_at(count);
        let annotations = annotations
            .iter()
            .map(|annotation| self.load_annotation(annotation))
            .collect::<Result<_, _>>()?;
        Ok((annotations, args))
    }

    fn load_annotation(&mut self, node: &OwlNode) -> LoadResult<Annotation> {
        let (annotations, args) = self.split_annotations(node)?;
        let [property, value] = args else {
            return Err(self.arity(node, args.len(), "an annotation property and a value"));
        };
        Ok(Annotation {
            property: self.load_entity_iri(property, "AnnotationProperty")?.into(),
            value: self.load_annotation_value(value)?,
            annotations,
        })
    }

    fn load_annotation_subject(&mut self, node: &OwlNode) -> LoadResult<AnnotationSubject> {
        Ok(match node.symbol {
            OwlSymbol::BlankNodeLabel => {
                AnnotationSubject::Anonymous(self.scope.resolve(node.value(), &mut *self.factory))
            }
            _ => AnnotationSubject::Iri(self.load_iri(node)?),
        })
    }

    fn load_annotation_value(&mut self, node: &OwlNode) -> LoadResult<AnnotationValue> {
        Ok(match node.symbol {
            OwlSymbol::BlankNodeLabel => {
                AnnotationValue::Anonymous(self.scope.resolve(node.value(), &mut *self.factory))
            }
            OwlSymbol::Literal | OwlSymbol::Integer => {
                AnnotationValue::Literal(self.load_literal(node)?)
            }
            _ => AnnotationValue::Iri(self.load_iri(node)?),
        })
    }

    fn load_declared_entity(&mut self, node: &OwlNode) -> LoadResult<Entity> {
        let [iri] = node.children.as_slice() else {
            return Err(self.unexpected(node, "an entity like Class(<iri>)"));
        };
        if node.symbol != OwlSymbol::Call {
            return Err(self.unexpected(node, "an entity like Class(<iri>)"));
        }
        let iri = self.load_iri(iri)?;
        Ok(match node.value() {
            "Class" => Entity::Class(iri.into()),
            "Datatype" => Entity::Datatype(iri.into()),
            "ObjectProperty" => Entity::ObjectProperty(iri.into()),
            "DataProperty" => Entity::DataProperty(iri.into()),
            "AnnotationProperty" => Entity::AnnotationProperty(iri.into()),
            "NamedIndividual" => Entity::NamedIndividual(iri),
            _ => return Err(self.unexpected(node, "an entity like Class(<iri>)")),
        })
    }

    fn load_class_expression(&mut self, node: &OwlNode) -> LoadResult<ClassExpression> {
        if node.symbol != OwlSymbol::Call {
            return Ok(ClassExpression::Class(self.load_iri(node)?.into()));
        }
        let args = node.children.as_slice();
        Ok(match node.value() {
            "Class" => ClassExpression::Class(self.load_entity_iri(node, "Class")?.into()),
            "ObjectIntersectionOf" => ClassExpression::ObjectIntersectionOf(self.list(
                node,
                args,
                2,
                Self::load_class_expression,
            )?),
            "ObjectUnionOf" => {
                ClassExpression::ObjectUnionOf(self.list(node, args, 2, Self::load_class_expression)?)
            }
            "ObjectComplementOf" => {
                let [class] = args else {
                    return Err(self.arity(node, args.len(), "a class expression"));
                };
                ClassExpression::ObjectComplementOf(Box::new(self.load_class_expression(class)?))
            }
            "ObjectOneOf" => {
                ClassExpression::ObjectOneOf(self.list(node, args, 1, Self::load_individual)?)
            }
            "ObjectSomeValuesFrom" | "ObjectAllValuesFrom" => {
                let [property, filler] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "an object property expression and a class expression",
                    ));
                };
                let property = self.load_object_property(property)?;
                let filler = Box::new(self.load_class_expression(filler)?);
                if node.value() == "ObjectSomeValuesFrom" {
                    ClassExpression::ObjectSomeValuesFrom { property, filler }
                } else {
                    ClassExpression::ObjectAllValuesFrom { property, filler }
                }
            }
            "ObjectHasValue" => {
                let [property, individual] = args else {
                    return Err(self.arity(
                        node,
                        args.len(),
                        "an object property expression and an individual",
                    ));
                };
                ClassExpression::ObjectHasValue {
                    property: self.load_object_property(property)?,
                    individual: self.load_individual(individual)?,
                }
            }
            "ObjectHasSelf" => {
                let [property] = args else {
                    return Err(self.arity(node, args.len(), "an object property expression"));
                };
                ClassExpression::ObjectHasSelf(self.load_object_property(property)?)
            }
            name @ ("ObjectMinCardinality" | "ObjectMaxCardinality" | "ObjectExactCardinality") => {
                let (cardinality, property, filler) = match args {
                    [cardinality, property] => (cardinality, property, None),
                    [cardinality, property, filler] => (cardinality, property, Some(filler)),
                    _ => {
                        return Err(self.arity(
                            node,
                            args.len(),
                            "a cardinality, an object property expression and an optional class expression",
                        ));
                    }
                };
                let cardinality = self.load_cardinality(cardinality)?;
                let property = self.load_object_property(property)?;
                let filler = filler
                    .map(|filler| self.load_class_expression(filler).map(Box::new))
                    .transpose()?;
                match name {
                    "ObjectMinCardinality" => ClassExpression::ObjectMinCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    "ObjectMaxCardinality" => ClassExpression::ObjectMaxCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    _ => ClassExpression::ObjectExactCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                }
            }
            "DataSomeValuesFrom" | "DataAllValuesFrom" => {
                let [properties @ .., filler] = args else {
                    return Err(self.arity(node, 0, "data properties and a data range"));
                };
                let properties = self.list(node, properties, 1, Self::load_data_property)?;
                let filler = self.load_data_range(filler)?;
                if node.value() == "DataSomeValuesFrom" {
                    ClassExpression::DataSomeValuesFrom { properties, filler }
                } else {
                    ClassExpression::DataAllValuesFrom { properties, filler }
                }
            }
            "DataHasValue" => {
                let [property, value] = args else {
                    return Err(self.arity(node, args.len(), "a data property and a literal"));
                };
                ClassExpression::DataHasValue {
                    property: self.load_data_property(property)?,
                    value: self.load_literal(value)?,
                }
            }
            name @ ("DataMinCardinality" | "DataMaxCardinality" | "DataExactCardinality") => {
                let (cardinality, property, filler) = match args {
                    [cardinality, property] => (cardinality, property, None),
                    [cardinality, property, filler] => (cardinality, property, Some(filler)),
                    _ => {
                        return Err(self.arity(
                            node,
                            args.len(),
                            "a cardinality, a data property and an optional data range",
                        ));
                    }
                };
                let cardinality = self.load_cardinality(cardinality)?;
                let property = self.load_data_property(property)?;
                let filler = filler
                    .map(|filler| self.load_data_range(filler))
                    .transpose()?;
                match name {
                    "DataMinCardinality" => ClassExpression::DataMinCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    "DataMaxCardinality" => ClassExpression::DataMaxCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    _ => ClassExpression::DataExactCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                }
            }
            _ => return Err(self.unexpected(node, "a class expression")),
        })
    }

    fn load_object_property(&mut self, node: &OwlNode) -> LoadResult<ObjectPropertyExpression> {
        if is_call(node, "ObjectInverseOf") {
            let [property] = node.children.as_slice() else {
                return Err(self.arity(node, node.children.len(), "an object property"));
            };
            return Ok(ObjectPropertyExpression::ObjectInverseOf(
                self.load_entity_iri(property, "ObjectProperty")?.into(),
            ));
        }
        Ok(ObjectPropertyExpression::ObjectProperty(
            self.load_entity_iri(node, "ObjectProperty")?.into(),
        ))
    }

    fn load_data_property(&mut self, node: &OwlNode) -> LoadResult<DataProperty> {
        Ok(self.load_entity_iri(node, "DataProperty")?.into())
    }

    fn load_individual(&mut self, node: &OwlNode) -> LoadResult<Individual> {
        Ok(match node.symbol {
            OwlSymbol::BlankNodeLabel => {
                Individual::Anonymous(self.scope.resolve(node.value(), &mut *self.factory))
            }
            _ => Individual::Named(self.load_entity_iri(node, "NamedIndividual")?),
        })
    }

    fn load_data_range(&mut self, node: &OwlNode) -> LoadResult<DataRange> {
        if node.symbol != OwlSymbol::Call {
            return Ok(DataRange::Datatype(self.load_iri(node)?.into()));
        }
        let args = node.children.as_slice();
        Ok(match node.value() {
            "Datatype" => DataRange::Datatype(self.load_entity_iri(node, "Datatype")?.into()),
            "DataIntersectionOf" => {
                DataRange::DataIntersectionOf(self.list(node, args, 2, Self::load_data_range)?)
            }
            "DataUnionOf" => {
                DataRange::DataUnionOf(self.list(node, args, 2, Self::load_data_range)?)
            }
            "DataComplementOf" => {
                let [range] = args else {
                    return Err(self.arity(node, args.len(), "a data range"));
                };
                DataRange::DataComplementOf(Box::new(self.load_data_range(range)?))
            }
            "DataOneOf" => DataRange::DataOneOf(self.list(node, args, 1, Self::load_literal)?),
            "DatatypeRestriction" => {
                let [datatype, facets @ ..] = args else {
                    return Err(self.arity(node, 0, "a datatype and facet restrictions"));
                };
                if facets.is_empty() || facets.len() % 2 != 0 {
                    return Err(self.arity(node, args.len(), "a datatype and facet/value pairs"));
                }
                let datatype = self.load_entity_iri(datatype, "Datatype")?.into();
                let mut restrictions = Vec::with_capacity(facets.len() / 2);
                for pair in facets.chunks_exact(2) {
                    if let [facet, value] = pair {
                        restrictions.push(FacetRestriction {
                            facet: self.load_iri(facet)?,
                            value: self.load_literal(value)?,
                        });
                    }
                }
                DataRange::DatatypeRestriction {
                    datatype,
                    facets: restrictions,
                }
            }
            _ => return Err(self.unexpected(node, "a data range")),
        })
    }

    fn load_literal(&mut self, node: &OwlNode) -> LoadResult<Literal> {
        match node.symbol {
            OwlSymbol::Integer => Ok(self
                .factory
                .literal_node(node.value(), xsd::INTEGER.as_str(), None)),
            OwlSymbol::Literal => match node.child(0) {
                Some(tag) if tag.symbol == OwlSymbol::LangTag => Ok(self.factory.literal_node(
                    node.value(),
                    rdf::LANG_STRING.as_str(),
                    Some(tag.value()),
                )),
                Some(datatype) => {
                    let datatype = self.load_iri(datatype)?;
                    Ok(self
                        .factory
                        .literal_node(node.value(), datatype.as_str(), None))
                }
                None => Ok(self
                    .factory
                    .literal_node(node.value(), xsd::STRING.as_str(), None)),
            },
            _ => Err(self.unexpected(node, "a literal")),
        }
    }

    fn load_cardinality(&self, node: &OwlNode) -> LoadResult<u32> {
        if node.symbol != OwlSymbol::Integer {
            return Err(self.unexpected(node, "a cardinality"));
        }
        node.value().parse().map_err(|_| {
            self.error(
                node,
                LoaderError::syntax(format!("Invalid cardinality {}", node.value())),
            )
        })
    }

    /// Returns the IRI of an entity, written as a bare IRI or wrapped like `Class(<iri>)`.
    fn load_entity_iri(&mut self, node: &OwlNode, kind: &str) -> LoadResult<NamedNode> {
        if node.symbol == OwlSymbol::Call {
            if node.value() != kind {
                return Err(self.unexpected(node, &format!("a {kind}")));
            }
            let [iri] = node.children.as_slice() else {
                return Err(self.arity(node, node.children.len(), "an IRI"));
            };
            return self.load_iri(iri);
        }
        self.load_iri(node)
    }

    /// Returns the IRI of an `IRI` or of a prefixed name.
    fn load_iri(&mut self, node: &OwlNode) -> LoadResult<NamedNode> {
        let iri = match node.symbol {
            OwlSymbol::Iri => self.resolve(node, node.value())?,
            OwlSymbol::PrefixedName => self.expand_prefixed_name(node)?,
            _ => return Err(self.unexpected(node, "an IRI")),
        };
        Ok(self.factory.iri_node(&iri))
    }

    /// Expands a prefixed name with the leftmost declared prefix, then resolves it against the base.
    fn expand_prefixed_name(&self, node: &OwlNode) -> LoadResult<String> {
        let name = node.value();
        for (i, _) in name.match_indices(':') {
            if let Some(namespace) = self.prefixes.get(&name[..i]) {
                let local = unescape_local_name(&name[i + 1..]);
                return self.resolve(node, &format!("{namespace}{local}"));
            }
        }
        Err(self.error(
            node,
            LoaderError::UnresolvableReference(format!(
                "Failed to resolve the prefixed name {name}"
            )),
        ))
    }

    fn resolve(&self, node: &OwlNode, reference: &str) -> LoadResult<String> {
        let iri = resolve_relative(&self.base, reference).map_err(|e| self.error(node, e))?;
        if !is_absolute(&iri) {
            return Err(self.error(
                node,
                MalformedUriError::new(iri, "an absolute IRI is expected"),
            ));
        }
        Ok(iri)
    }

    /// Loads every argument with `load`, checking there are at least `min` of them.
    fn list<T>(
        &mut self,
        parent: &OwlNode,
        args: &[OwlNode],
        min: usize,
        mut load: impl FnMut(&mut Self, &OwlNode) -> LoadResult<T>,
    ) -> LoadResult<Vec<T>> {
        if args.len() < min {
            return Err(self.arity(parent, args.len(), &format!("at least {min} arguments")));
        }
        args.iter().map(|arg| load(self, arg)).collect()
    }

    fn error(&self, node: &OwlNode, error: impl Into<LoaderError>) -> Diagnostic {
        let offset = node.position.byte_offset();
        Diagnostic::new(error).in_source(self.input, offset..offset)
    }

    fn unexpected(&self, node: &OwlNode, expected: &str) -> Diagnostic {
        self.error(
            node,
            LoaderError::syntax(format!("Expected {expected}, found {}", describe(node))),
        )
    }

    fn arity(&self, node: &OwlNode, found: usize, expected: &str) -> Diagnostic {
        self.error(
            node,
            LoaderError::syntax(format!(
                "{} expects {expected}, found {found} arguments",
                node.value()
            )),
        )
    }
}

fn is_call(node: &OwlNode, name: &str) -> bool {
    node.symbol == OwlSymbol::Call && node.value() == name
}

fn is_iri(node: &OwlNode) -> bool {
    matches!(node.symbol, OwlSymbol::Iri | OwlSymbol::PrefixedName)
}

fn describe(node: &OwlNode) -> String {
    match node.symbol {
        OwlSymbol::Call => format!("'{}'", node.value()),
        OwlSymbol::Group => "a parenthesized list".into(),
        OwlSymbol::Iri => format!("IRI <{}>", node.value()),
        OwlSymbol::PrefixedName => format!("prefixed name {}", node.value()),
        OwlSymbol::BlankNodeLabel => format!("blank node _:{}", node.value()),
        OwlSymbol::Literal => "a literal".into(),
        OwlSymbol::Integer => format!("integer {}", node.value()),
        OwlSymbol::Document | OwlSymbol::Prefix | OwlSymbol::LangTag => {
            format!("{:?}", node.symbol)
        }
    }
}
