//! OWL 2 entities: classes, datatypes, properties and individuals.

use oxlmodel::{BlankNode, NamedNode};
use std::fmt;

macro_rules! entity {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(NamedNode);

        impl $name {
            #[inline]
            pub fn new(iri: NamedNode) -> Self {
                Self(iri)
            }

            /// Returns the IRI of this entity.
            #[inline]
            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> NamedNode {
                self.0
            }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<NamedNode> for $name {
            #[inline]
            fn from(iri: NamedNode) -> Self {
                Self(iri)
            }
        }

        impl From<$name> for NamedNode {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0
            }
        }
    };
}

entity!(
    /// An OWL class, a set of individuals.
    OwlClass
);
entity!(
    /// A datatype, a set of literals.
    Datatype
);
entity!(
    /// An object property, relating individuals to individuals.
    ObjectProperty
);
entity!(
    /// A data property, relating individuals to literals.
    DataProperty
);
entity!(
    /// An annotation property, for non-logical statements about ontology elements.
    AnnotationProperty
);

/// An individual, either named by an IRI or anonymous.
///
/// Anonymous individuals are blank nodes scoped to the document they are loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    Named(NamedNode),
    Anonymous(BlankNode),
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(iri) => iri.fmt(f),
            Self::Anonymous(node) => node.fmt(f),
        }
    }
}

impl From<NamedNode> for Individual {
    #[inline]
    fn from(iri: NamedNode) -> Self {
        Self::Named(iri)
    }
}

impl From<BlankNode> for Individual {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::Anonymous(node)
    }
}

/// An entity introduced by a `Declaration` axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Class(OwlClass),
    Datatype(Datatype),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    NamedIndividual(NamedNode),
}

impl Entity {
    /// Returns the IRI of the entity.
    pub fn iri(&self) -> &NamedNode {
        match self {
            Self::Class(e) => e.iri(),
            Self::Datatype(e) => e.iri(),
            Self::ObjectProperty(e) => e.iri(),
            Self::DataProperty(e) => e.iri(),
            Self::AnnotationProperty(e) => e.iri(),
            Self::NamedIndividual(iri) => iri,
        }
    }

    /// The functional syntax keyword of the kind of entity, e.g. `Class`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Class(_) => "Class",
            Self::Datatype(_) => "Datatype",
            Self::ObjectProperty(_) => "ObjectProperty",
            Self::DataProperty(_) => "DataProperty",
            Self::AnnotationProperty(_) => "AnnotationProperty",
            Self::NamedIndividual(_) => "NamedIndividual",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.iri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_display() {
        let iri = NamedNode::new_unchecked("http://example.com/A");
        assert_eq!(OwlClass::new(iri.clone()).to_string(), "<http://example.com/A>");
        let entity = Entity::Class(iri.clone().into());
        assert_eq!(entity.to_string(), "Class(<http://example.com/A>)");
        assert_eq!(entity.iri(), &iri);
        assert_eq!(
            Entity::NamedIndividual(iri).kind(),
            "NamedIndividual"
        );
    }
}
