//! OWL 2 axioms and annotations.
//!
//! Axioms are the basic statements in an OWL 2 ontology.

use crate::entity::{AnnotationProperty, DataProperty, Datatype, Entity, Individual, OwlClass};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression, Spaced};
use oxlmodel::{BlankNode, Literal, NamedNode};
use std::fmt;

/// An OWL 2 axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// Declaration(Class(C)), Declaration(ObjectProperty(P))...
    Declaration(Entity),

    // === Class Axioms ===
    /// SubClassOf(sub super)
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },
    /// EquivalentClasses(C1 ... Cn)
    EquivalentClasses(Vec<ClassExpression>),
    /// DisjointClasses(C1 ... Cn)
    DisjointClasses(Vec<ClassExpression>),
    /// DisjointUnion(C C1 ... Cn)
    DisjointUnion {
        class: OwlClass,
        disjoint_classes: Vec<ClassExpression>,
    },

    // === Object Property Axioms ===
    /// SubObjectPropertyOf(sub super)
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },
    /// SubObjectPropertyOf(ObjectPropertyChain(P1 ... Pn) P)
    SubPropertyChainOf {
        property_chain: Vec<ObjectPropertyExpression>,
        super_property: ObjectPropertyExpression,
    },
    /// EquivalentObjectProperties(P1 ... Pn)
    EquivalentObjectProperties(Vec<ObjectPropertyExpression>),
    /// DisjointObjectProperties(P1 ... Pn)
    DisjointObjectProperties(Vec<ObjectPropertyExpression>),
    /// InverseObjectProperties(P1 P2)
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),
    /// ObjectPropertyDomain(P C)
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },
    /// ObjectPropertyRange(P C)
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },
    /// FunctionalObjectProperty(P)
    FunctionalObjectProperty(ObjectPropertyExpression),
    /// InverseFunctionalObjectProperty(P)
    InverseFunctionalObjectProperty(ObjectPropertyExpression),
    /// ReflexiveObjectProperty(P)
    ReflexiveObjectProperty(ObjectPropertyExpression),
    /// IrreflexiveObjectProperty(P)
    IrreflexiveObjectProperty(ObjectPropertyExpression),
    /// SymmetricObjectProperty(P)
    SymmetricObjectProperty(ObjectPropertyExpression),
    /// AsymmetricObjectProperty(P)
    AsymmetricObjectProperty(ObjectPropertyExpression),
    /// TransitiveObjectProperty(P)
    TransitiveObjectProperty(ObjectPropertyExpression),

    // === Data Property Axioms ===
    /// SubDataPropertyOf(sub super)
    SubDataPropertyOf {
        sub_property: DataProperty,
        super_property: DataProperty,
    },
    /// EquivalentDataProperties(P1 ... Pn)
    EquivalentDataProperties(Vec<DataProperty>),
    /// DisjointDataProperties(P1 ... Pn)
    DisjointDataProperties(Vec<DataProperty>),
    /// DataPropertyDomain(P C)
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },
    /// DataPropertyRange(P D)
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },
    /// FunctionalDataProperty(P)
    FunctionalDataProperty(DataProperty),

    /// DatatypeDefinition(DT D)
    DatatypeDefinition {
        datatype: Datatype,
        range: DataRange,
    },

    /// HasKey(C (P1 ... Pm) (D1 ... Dn))
    HasKey {
        class: ClassExpression,
        object_properties: Vec<ObjectPropertyExpression>,
        data_properties: Vec<DataProperty>,
    },

    // === Assertions ===
    /// SameIndividual(a1 ... an)
    SameIndividual(Vec<Individual>),
    /// DifferentIndividuals(a1 ... an)
    DifferentIndividuals(Vec<Individual>),
    /// ClassAssertion(C a)
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
    /// ObjectPropertyAssertion(P a b)
    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },
    /// NegativeObjectPropertyAssertion(P a b)
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },
    /// DataPropertyAssertion(P a v)
    DataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },
    /// NegativeDataPropertyAssertion(P a v)
    NegativeDataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },

    // === Annotation Axioms ===
    /// AnnotationAssertion(AP s v)
    AnnotationAssertion {
        property: AnnotationProperty,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },
    /// SubAnnotationPropertyOf(sub super)
    SubAnnotationPropertyOf {
        sub_property: AnnotationProperty,
        super_property: AnnotationProperty,
    },
    /// AnnotationPropertyDomain(AP IRI)
    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: NamedNode,
    },
    /// AnnotationPropertyRange(AP IRI)
    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: NamedNode,
    },
}

impl Axiom {
    /// The functional syntax name of the axiom, e.g. `SubClassOf`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Declaration(_) => "Declaration",
            Self::SubClassOf { .. } => "SubClassOf",
            Self::EquivalentClasses(_) => "EquivalentClasses",
            Self::DisjointClasses(_) => "DisjointClasses",
            Self::DisjointUnion { .. } => "DisjointUnion",
            Self::SubObjectPropertyOf { .. } | Self::SubPropertyChainOf { .. } => {
                "SubObjectPropertyOf"
            }
            Self::EquivalentObjectProperties(_) => "EquivalentObjectProperties",
            Self::DisjointObjectProperties(_) => "DisjointObjectProperties",
            Self::InverseObjectProperties(..) => "InverseObjectProperties",
            Self::ObjectPropertyDomain { .. } => "ObjectPropertyDomain",
            Self::ObjectPropertyRange { .. } => "ObjectPropertyRange",
            Self::FunctionalObjectProperty(_) => "FunctionalObjectProperty",
            Self::InverseFunctionalObjectProperty(_) => "InverseFunctionalObjectProperty",
            Self::ReflexiveObjectProperty(_) => "ReflexiveObjectProperty",
            Self::IrreflexiveObjectProperty(_) => "IrreflexiveObjectProperty",
            Self::SymmetricObjectProperty(_) => "SymmetricObjectProperty",
            Self::AsymmetricObjectProperty(_) => "AsymmetricObjectProperty",
            Self::TransitiveObjectProperty(_) => "TransitiveObjectProperty",
            Self::SubDataPropertyOf { .. } => "SubDataPropertyOf",
            Self::EquivalentDataProperties(_) => "EquivalentDataProperties",
            Self::DisjointDataProperties(_) => "DisjointDataProperties",
            Self::DataPropertyDomain { .. } => "DataPropertyDomain",
            Self::DataPropertyRange { .. } => "DataPropertyRange",
            Self::FunctionalDataProperty(_) => "FunctionalDataProperty",
            Self::DatatypeDefinition { .. } => "DatatypeDefinition",
            Self::HasKey { .. } => "HasKey",
            Self::SameIndividual(_) => "SameIndividual",
            Self::DifferentIndividuals(_) => "DifferentIndividuals",
            Self::ClassAssertion { .. } => "ClassAssertion",
            Self::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Self::NegativeObjectPropertyAssertion { .. } => "NegativeObjectPropertyAssertion",
            Self::DataPropertyAssertion { .. } => "DataPropertyAssertion",
            Self::NegativeDataPropertyAssertion { .. } => "NegativeDataPropertyAssertion",
            Self::AnnotationAssertion { .. } => "AnnotationAssertion",
            Self::SubAnnotationPropertyOf { .. } => "SubAnnotationPropertyOf",
            Self::AnnotationPropertyDomain { .. } => "AnnotationPropertyDomain",
            Self::AnnotationPropertyRange { .. } => "AnnotationPropertyRange",
        }
    }

    /// Writes the arguments of the axiom in functional syntax, without the surrounding name.
    fn fmt_arguments(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration(entity) => write!(f, "{entity}"),
            Self::SubClassOf {
                sub_class,
                super_class,
            } => write!(f, "{sub_class} {super_class}"),
            Self::EquivalentClasses(c) | Self::DisjointClasses(c) => write!(f, "{}", Spaced(c)),
            Self::DisjointUnion {
                class,
                disjoint_classes,
            } => write!(f, "{class} {}", Spaced(disjoint_classes)),
            Self::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => write!(f, "{sub_property} {super_property}"),
            Self::SubPropertyChainOf {
                property_chain,
                super_property,
            } => write!(
                f,
                "ObjectPropertyChain({}) {super_property}",
                Spaced(property_chain)
            ),
            Self::EquivalentObjectProperties(p) | Self::DisjointObjectProperties(p) => {
                write!(f, "{}", Spaced(p))
            }
            Self::InverseObjectProperties(a, b) => write!(f, "{a} {b}"),
            Self::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | Self::ObjectPropertyRange {
                property,
                range: class,
            } => write!(f, "{property} {class}"),
            Self::FunctionalObjectProperty(p)
            | Self::InverseFunctionalObjectProperty(p)
            | Self::ReflexiveObjectProperty(p)
            | Self::IrreflexiveObjectProperty(p)
            | Self::SymmetricObjectProperty(p)
            | Self::AsymmetricObjectProperty(p)
            | Self::TransitiveObjectProperty(p) => write!(f, "{p}"),
            Self::SubDataPropertyOf {
                sub_property,
                super_property,
            } => write!(f, "{sub_property} {super_property}"),
            Self::EquivalentDataProperties(p) | Self::DisjointDataProperties(p) => {
                write!(f, "{}", Spaced(p))
            }
            Self::DataPropertyDomain { property, domain } => write!(f, "{property} {domain}"),
            Self::DataPropertyRange { property, range } => write!(f, "{property} {range}"),
            Self::FunctionalDataProperty(p) => write!(f, "{p}"),
            Self::DatatypeDefinition { datatype, range } => write!(f, "{datatype} {range}"),
            Self::HasKey {
                class,
                object_properties,
                data_properties,
            } => write!(
                f,
                "{class} ({}) ({})",
                Spaced(object_properties),
                Spaced(data_properties)
            ),
            Self::SameIndividual(i) | Self::DifferentIndividuals(i) => write!(f, "{}", Spaced(i)),
            Self::ClassAssertion { class, individual } => write!(f, "{class} {individual}"),
            Self::ObjectPropertyAssertion {
                property,
                source,
                target,
            }
            | Self::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => write!(f, "{property} {source} {target}"),
            Self::DataPropertyAssertion {
                property,
                source,
                target,
            }
            | Self::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => write!(f, "{property} {source} {target}"),
            Self::AnnotationAssertion {
                property,
                subject,
                value,
            } => write!(f, "{property} {subject} {value}"),
            Self::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => write!(f, "{sub_property} {super_property}"),
            Self::AnnotationPropertyDomain {
                property,
                domain: iri,
            }
            | Self::AnnotationPropertyRange {
                property,
                range: iri,
            } => write!(f, "{property} {iri}"),
        }
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        self.fmt_arguments(f)?;
        f.write_str(")")
    }
}

/// An axiom with the annotations attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatedAxiom {
    pub axiom: Axiom,
    pub annotations: Vec<Annotation>,
}

impl AnnotatedAxiom {
    #[inline]
    pub fn new(axiom: Axiom, annotations: Vec<Annotation>) -> Self {
        Self { axiom, annotations }
    }
}

impl From<Axiom> for AnnotatedAxiom {
    #[inline]
    fn from(axiom: Axiom) -> Self {
        Self::new(axiom, Vec::new())
    }
}

impl fmt::Display for AnnotatedAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.axiom.name())?;
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        self.axiom.fmt_arguments(f)?;
        f.write_str(")")
    }
}

/// An annotation, possibly annotated itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub property: AnnotationProperty,
    pub value: AnnotationValue,
    pub annotations: Vec<Annotation>,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Annotation(")?;
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        write!(f, "{} {})", self.property, self.value)
    }
}

/// What an annotation assertion is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationSubject {
    Iri(NamedNode),
    Anonymous(BlankNode),
}

impl fmt::Display for AnnotationSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => iri.fmt(f),
            Self::Anonymous(node) => node.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Iri(NamedNode),
    Anonymous(BlankNode),
    Literal(Literal),
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => iri.fmt(f),
            Self::Anonymous(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ObjectProperty;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    #[test]
    fn annotated_display() {
        let label = AnnotationProperty::new(NamedNode::new_unchecked(
            "http://www.w3.org/2000/01/rdf-schema#label",
        ));
        let axiom = AnnotatedAxiom::new(
            Axiom::SubClassOf {
                sub_class: OwlClass::new(iri("A")).into(),
                super_class: OwlClass::new(iri("B")).into(),
            },
            vec![Annotation {
                property: label,
                value: AnnotationValue::Literal(Literal::new_simple_literal("a")),
                annotations: Vec::new(),
            }],
        );
        assert_eq!(
            axiom.to_string(),
            "SubClassOf(Annotation(<http://www.w3.org/2000/01/rdf-schema#label> \"a\") <http://example.com/A> <http://example.com/B>)"
        );
        assert_eq!(
            axiom.axiom.to_string(),
            "SubClassOf(<http://example.com/A> <http://example.com/B>)"
        );
    }

    #[test]
    fn chain_and_keys_display() {
        let p = ObjectPropertyExpression::from(ObjectProperty::new(iri("p")));
        let chain = Axiom::SubPropertyChainOf {
            property_chain: vec![p.clone(), p.clone()],
            super_property: p.clone(),
        };
        assert_eq!(
            chain.to_string(),
            "SubObjectPropertyOf(ObjectPropertyChain(<http://example.com/p> <http://example.com/p>) <http://example.com/p>)"
        );
        let key = Axiom::HasKey {
            class: OwlClass::new(iri("A")).into(),
            object_properties: vec![p],
            data_properties: Vec::new(),
        };
        assert_eq!(
            key.to_string(),
            "HasKey(<http://example.com/A> (<http://example.com/p>) ())"
        );
    }

    #[test]
    fn single_and_list_argument_display() {
        let p = ObjectPropertyExpression::from(ObjectProperty::new(iri("p")));
        let a = ClassExpression::from(OwlClass::new(iri("A")));
        let b = ClassExpression::from(OwlClass::new(iri("B")));
        assert_eq!(
            Axiom::Declaration(Entity::Class(OwlClass::new(iri("A")))).to_string(),
            "Declaration(Class(<http://example.com/A>))"
        );
        assert_eq!(
            Axiom::EquivalentClasses(vec![a, b]).to_string(),
            "EquivalentClasses(<http://example.com/A> <http://example.com/B>)"
        );
        assert_eq!(
            Axiom::TransitiveObjectProperty(p.clone()).to_string(),
            "TransitiveObjectProperty(<http://example.com/p>)"
        );
        assert_eq!(
            Axiom::DisjointObjectProperties(vec![p.clone(), p]).to_string(),
            "DisjointObjectProperties(<http://example.com/p> <http://example.com/p>)"
        );
        assert_eq!(
            Axiom::FunctionalDataProperty(DataProperty::new(iri("d"))).to_string(),
            "FunctionalDataProperty(<http://example.com/d>)"
        );
        assert_eq!(
            Axiom::SameIndividual(vec![
                Individual::Named(iri("x")),
                Individual::Named(iri("y"))
            ])
            .to_string(),
            "SameIndividual(<http://example.com/x> <http://example.com/y>)"
        );
    }
}
