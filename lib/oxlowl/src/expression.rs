//! OWL 2 class expressions, object property expressions and data ranges.

use crate::entity::{DataProperty, Datatype, Individual, ObjectProperty, OwlClass};
use oxlmodel::{Literal, NamedNode};
use std::fmt;

/// An OWL 2 class expression.
///
/// Class expressions describe sets of individuals through various constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named class
    Class(OwlClass),
    /// ObjectIntersectionOf(C1 ... Cn)
    ObjectIntersectionOf(Vec<ClassExpression>),
    /// ObjectUnionOf(C1 ... Cn)
    ObjectUnionOf(Vec<ClassExpression>),
    /// ObjectComplementOf(C)
    ObjectComplementOf(Box<ClassExpression>),
    /// ObjectOneOf(a1 ... an)
    ObjectOneOf(Vec<Individual>),
    /// ObjectSomeValuesFrom(P C)
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    /// ObjectAllValuesFrom(P C)
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    /// ObjectHasValue(P a)
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },
    /// ObjectHasSelf(P)
    ObjectHasSelf(ObjectPropertyExpression),
    /// ObjectMinCardinality(n P C?)
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// ObjectMaxCardinality(n P C?)
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// ObjectExactCardinality(n P C?)
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// DataSomeValuesFrom(P1 ... Pn D)
    DataSomeValuesFrom {
        properties: Vec<DataProperty>,
        filler: DataRange,
    },
    /// DataAllValuesFrom(P1 ... Pn D)
    DataAllValuesFrom {
        properties: Vec<DataProperty>,
        filler: DataRange,
    },
    /// DataHasValue(P v)
    DataHasValue {
        property: DataProperty,
        value: Literal,
    },
    /// DataMinCardinality(n P D?)
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    /// DataMaxCardinality(n P D?)
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    /// DataExactCardinality(n P D?)
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
}

impl ClassExpression {
    /// Returns true if this is a named class.
    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    /// Returns the named class if this is one.
    #[inline]
    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl From<OwlClass> for ClassExpression {
    #[inline]
    fn from(c: OwlClass) -> Self {
        Self::Class(c)
    }
}

impl fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(c) => c.fmt(f),
            Self::ObjectIntersectionOf(c) => write!(f, "ObjectIntersectionOf({})", Spaced(c)),
            Self::ObjectUnionOf(c) => write!(f, "ObjectUnionOf({})", Spaced(c)),
            Self::ObjectComplementOf(c) => write!(f, "ObjectComplementOf({c})"),
            Self::ObjectOneOf(i) => write!(f, "ObjectOneOf({})", Spaced(i)),
            Self::ObjectSomeValuesFrom { property, filler } => {
                write!(f, "ObjectSomeValuesFrom({property} {filler})")
            }
            Self::ObjectAllValuesFrom { property, filler } => {
                write!(f, "ObjectAllValuesFrom({property} {filler})")
            }
            Self::ObjectHasValue {
                property,
                individual,
            } => write!(f, "ObjectHasValue({property} {individual})"),
            Self::ObjectHasSelf(p) => write!(f, "ObjectHasSelf({p})"),
            Self::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => write_cardinality(f, "ObjectMinCardinality", *cardinality, property, filler.as_deref()),
            Self::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => write_cardinality(f, "ObjectMaxCardinality", *cardinality, property, filler.as_deref()),
            Self::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => write_cardinality(f, "ObjectExactCardinality", *cardinality, property, filler.as_deref()),
            Self::DataSomeValuesFrom { properties, filler } => {
                write!(f, "DataSomeValuesFrom({} {filler})", Spaced(properties))
            }
            Self::DataAllValuesFrom { properties, filler } => {
                write!(f, "DataAllValuesFrom({} {filler})", Spaced(properties))
            }
            Self::DataHasValue { property, value } => {
                write!(f, "DataHasValue({property} {value})")
            }
            Self::DataMinCardinality {
                cardinality,
                property,
                filler,
            } => write_cardinality(f, "DataMinCardinality", *cardinality, property, filler.as_ref()),
            Self::DataMaxCardinality {
                cardinality,
                property,
                filler,
            } => write_cardinality(f, "DataMaxCardinality", *cardinality, property, filler.as_ref()),
            Self::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => write_cardinality(f, "DataExactCardinality", *cardinality, property, filler.as_ref()),
        }
    }
}

fn write_cardinality(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    cardinality: u32,
    property: &impl fmt::Display,
    filler: Option<&impl fmt::Display>,
) -> fmt::Result {
    write!(f, "{name}({cardinality} {property}")?;
    if let Some(filler) = filler {
        write!(f, " {filler}")?;
    }
    f.write_str(")")
}

/// An OWL 2 object property expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    /// A named object property
    ObjectProperty(ObjectProperty),
    /// ObjectInverseOf(P)
    ObjectInverseOf(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// Returns the named property, removing the inverse if present.
    #[inline]
    pub fn base_property(&self) -> &ObjectProperty {
        match self {
            Self::ObjectProperty(p) | Self::ObjectInverseOf(p) => p,
        }
    }

    #[inline]
    pub fn is_inverse(&self) -> bool {
        matches!(self, Self::ObjectInverseOf(_))
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    #[inline]
    fn from(p: ObjectProperty) -> Self {
        Self::ObjectProperty(p)
    }
}

impl fmt::Display for ObjectPropertyExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectProperty(p) => p.fmt(f),
            Self::ObjectInverseOf(p) => write!(f, "ObjectInverseOf({p})"),
        }
    }
}

/// An OWL 2 data range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRange {
    /// A named datatype (e.g., xsd:string)
    Datatype(Datatype),
    /// DataIntersectionOf(D1 ... Dn)
    DataIntersectionOf(Vec<DataRange>),
    /// DataUnionOf(D1 ... Dn)
    DataUnionOf(Vec<DataRange>),
    /// DataComplementOf(D)
    DataComplementOf(Box<DataRange>),
    /// DataOneOf(v1 ... vn)
    DataOneOf(Vec<Literal>),
    /// DatatypeRestriction(D f1 v1 ... fn vn)
    DatatypeRestriction {
        datatype: Datatype,
        facets: Vec<FacetRestriction>,
    },
}

impl DataRange {
    /// Returns the datatype if this is a simple datatype.
    #[inline]
    pub fn as_datatype(&self) -> Option<&Datatype> {
        match self {
            Self::Datatype(dt) => Some(dt),
            _ => None,
        }
    }
}

impl From<Datatype> for DataRange {
    #[inline]
    fn from(datatype: Datatype) -> Self {
        Self::Datatype(datatype)
    }
}

impl fmt::Display for DataRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Datatype(dt) => dt.fmt(f),
            Self::DataIntersectionOf(r) => write!(f, "DataIntersectionOf({})", Spaced(r)),
            Self::DataUnionOf(r) => write!(f, "DataUnionOf({})", Spaced(r)),
            Self::DataComplementOf(r) => write!(f, "DataComplementOf({r})"),
            Self::DataOneOf(v) => write!(f, "DataOneOf({})", Spaced(v)),
            Self::DatatypeRestriction { datatype, facets } => {
                write!(f, "DatatypeRestriction({datatype} {})", Spaced(facets))
            }
        }
    }
}

/// A constraining facet and its value, e.g. `xsd:minInclusive "5"^^xsd:integer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacetRestriction {
    pub facet: NamedNode,
    pub value: Literal,
}

impl fmt::Display for FacetRestriction {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.facet, self.value)
    }
}

/// Writes a list of items separated by spaces.
pub(crate) struct Spaced<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for Spaced<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            item.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassExpression {
        OwlClass::new(NamedNode::new_unchecked(format!("http://example.com/{name}"))).into()
    }

    fn property(name: &str) -> ObjectProperty {
        ObjectProperty::new(NamedNode::new_unchecked(format!("http://example.com/{name}")))
    }

    #[test]
    fn nested_display() {
        let expression = ClassExpression::ObjectIntersectionOf(vec![
            class("A"),
            ClassExpression::ObjectMinCardinality {
                cardinality: 2,
                property: ObjectPropertyExpression::ObjectInverseOf(property("p")),
                filler: Some(Box::new(class("B"))),
            },
            ClassExpression::ObjectHasSelf(property("q").into()),
        ]);
        assert_eq!(
            expression.to_string(),
            "ObjectIntersectionOf(<http://example.com/A> ObjectMinCardinality(2 ObjectInverseOf(<http://example.com/p>) <http://example.com/B>) ObjectHasSelf(<http://example.com/q>))"
        );
    }

    #[test]
    fn base_property() {
        let inverse = ObjectPropertyExpression::ObjectInverseOf(property("p"));
        assert!(inverse.is_inverse());
        assert_eq!(inverse.base_property(), &property("p"));
        assert!(class("A").is_named());
    }
}
