use crate::builder::OntologyBuilder;
use crate::ontology::OntologyDocument;
use crate::parser::parse;
use oxlmodel::{Diagnostic, Loader, NodeFactory};
use tracing::debug;

/// An [OWL 2 functional syntax](https://www.w3.org/TR/owl2-syntax/) loader.
///
/// Prefixed names are expanded with the `Prefix` declarations of the document.
/// Once the ontology IRI is read, it becomes the base IRI of the rest of the document.
///
/// ```
/// use oxlmodel::{Loader, SimpleNodeFactory};
/// use oxlowl::{Axiom, FunctionalOwlLoader};
///
/// let file = r#"Prefix(:=<http://example.com/>)
/// Ontology(<http://example.com/ontology>
///   Declaration(Class(:Person))
///   SubClassOf(:Student :Person)
/// )"#;
///
/// let document = FunctionalOwlLoader::new()
///     .load(file, "http://example.com/ontology.ofn", &mut SimpleNodeFactory)
///     .unwrap();
/// assert_eq!(document.ontology_iri.as_deref(), Some("http://example.com/ontology"));
/// assert_eq!(document.len(), 2);
/// assert!(matches!(document.axioms[1].axiom, Axiom::SubClassOf { .. }));
/// ```
#[derive(Default, Clone, Debug)]
#[must_use]
pub struct FunctionalOwlLoader {
    base: Option<String>,
}

impl FunctionalOwlLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base IRI used until the ontology IRI is read, the document IRI by default.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base = Some(base_iri.into());
        self
    }
}

impl Loader for FunctionalOwlLoader {
    type Output = OntologyDocument;

    fn load<F: NodeFactory>(
        &self,
        input: &str,
        resource: &str,
        factory: &mut F,
    ) -> Result<OntologyDocument, Vec<Diagnostic>> {
        let tree = parse(input)?;
        let document = OntologyBuilder::new(input, self.base.as_deref().unwrap_or(resource), factory)
            .load_document(&tree)
            .map_err(|e| vec![e])?;
        debug!(
            "Loaded {} axioms from {resource} (OWL functional syntax)",
            document.len()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::{AnnotationValue, Axiom};
    use crate::entity::{Entity, Individual};
    use crate::expression::{ClassExpression, DataRange};
    use oxlmodel::{LoaderError, SimpleNodeFactory};

    fn load(input: &str) -> Result<OntologyDocument, Vec<Diagnostic>> {
        FunctionalOwlLoader::new().load(input, "http://example.com/doc.ofn", &mut SimpleNodeFactory)
    }

    #[test]
    fn header_and_relative_iris() {
        let document = load(
            "Ontology(<http://example.com/o/> <http://example.com/o/1.0>
               Import(<http://example.com/other>)
               Annotation(<label> \"An ontology\"@en)
               Declaration(Class(<A>))
            )",
        )
        .unwrap();
        assert_eq!(document.ontology_iri.as_deref(), Some("http://example.com/o/"));
        assert_eq!(document.version_iri.as_deref(), Some("http://example.com/o/1.0"));
        assert_eq!(document.imports, ["http://example.com/other"]);
        assert_eq!(
            document.annotations[0].to_string(),
            "Annotation(<http://example.com/o/label> \"An ontology\"@en)"
        );
        assert_eq!(
            document.axioms[0].to_string(),
            "Declaration(Class(<http://example.com/o/A>))"
        );
    }

    #[test]
    fn class_expressions() {
        let document = load(
            "Prefix(:=<http://example.com/>)
            Prefix(xsd:=<http://www.w3.org/2001/XMLSchema#>)
            Ontology(
              SubClassOf(:Parent ObjectMinCardinality(1 :hasChild :Person))
              EquivalentClasses(:Adult DataSomeValuesFrom(:age DatatypeRestriction(xsd:integer xsd:minInclusive \"18\"^^xsd:integer)))
            )",
        )
        .unwrap();
        let Axiom::SubClassOf { super_class, .. } = &document.axioms[0].axiom else {
            panic!("SubClassOf expected")
        };
        assert!(matches!(
            super_class,
            ClassExpression::ObjectMinCardinality {
                cardinality: 1,
                filler: Some(_),
                ..
            }
        ));
        let Axiom::EquivalentClasses(classes) = &document.axioms[1].axiom else {
            panic!("EquivalentClasses expected")
        };
        let ClassExpression::DataSomeValuesFrom { filler, .. } = &classes[1] else {
            panic!("DataSomeValuesFrom expected")
        };
        let DataRange::DatatypeRestriction { facets, .. } = filler else {
            panic!("DatatypeRestriction expected")
        };
        assert_eq!(
            facets[0].facet.as_str(),
            "http://www.w3.org/2001/XMLSchema#minInclusive"
        );
        assert_eq!(facets[0].value.value(), "18");
    }

    #[test]
    fn assertions_and_annotations() {
        let document = load(
            "Prefix(:=<http://example.com/>)
            Prefix(rdfs:=<http://www.w3.org/2000/01/rdf-schema#>)
            Ontology(
              ClassAssertion(:Person :alice)
              ObjectPropertyAssertion(:knows :alice _:b)
              DataPropertyAssertion(Annotation(rdfs:comment \"checked\") :age :alice 42)
              AnnotationAssertion(rdfs:label :alice \"Alice\")
              HasKey(:Person (:knows) ())
              SubObjectPropertyOf(ObjectPropertyChain(:parent :brother) :uncle)
            )",
        )
        .unwrap();
        assert_eq!(document.len(), 6);
        let Axiom::ObjectPropertyAssertion { target, .. } = &document.axioms[1].axiom else {
            panic!("ObjectPropertyAssertion expected")
        };
        assert!(matches!(target, Individual::Anonymous(_)));
        let assertion = &document.axioms[2];
        assert_eq!(assertion.annotations.len(), 1);
        let Axiom::DataPropertyAssertion { target, .. } = &assertion.axiom else {
            panic!("DataPropertyAssertion expected")
        };
        assert_eq!(
            target.datatype().as_str(),
            "http://www.w3.org/2001/XMLSchema#integer"
        );
        let Axiom::AnnotationAssertion { value, .. } = &document.axioms[3].axiom else {
            panic!("AnnotationAssertion expected")
        };
        let AnnotationValue::Literal(label) = value else {
            panic!("literal expected")
        };
        assert_eq!(
            label.datatype().as_str(),
            "http://www.w3.org/2001/XMLSchema#string"
        );
        assert!(matches!(
            &document.axioms[4].axiom,
            Axiom::HasKey { object_properties, data_properties, .. }
                if object_properties.len() == 1 && data_properties.is_empty()
        ));
        assert_eq!(
            document.axioms[5].to_string(),
            "SubObjectPropertyOf(ObjectPropertyChain(<http://example.com/parent> <http://example.com/brother>) <http://example.com/uncle>)"
        );
    }

    #[test]
    fn declarations() {
        let document = load(
            "Prefix(:=<http://example.com/>)
            Ontology(
              Declaration(ObjectProperty(:p))
              Declaration(NamedIndividual(:i))
              Declaration(ObjectProperty(:p))
            )",
        )
        .unwrap();
        let declared = document.declared_entities();
        assert_eq!(declared.len(), 2);
        assert!(declared.iter().any(|e| matches!(e, Entity::NamedIndividual(_))));
    }

    #[test]
    fn unknown_prefix() {
        let errors = load("Ontology(SubClassOf(ex:A ex:B))").unwrap_err();
        assert!(matches!(
            errors[0].error(),
            LoaderError::UnresolvableReference(_)
        ));
        assert_eq!(errors[0].location().unwrap().start.column, 20);
    }

    #[test]
    fn wrong_arity() {
        let errors = load("Prefix(:=<http://example.com/>) Ontology(SubClassOf(:A))").unwrap_err();
        assert_eq!(
            errors[0].error().to_string(),
            "SubClassOf expects two class expressions, found 1 arguments"
        );
    }

    #[test]
    fn unknown_axiom() {
        let errors = load("Prefix(:=<http://example.com/>) Ontology(Foo(:A))").unwrap_err();
        assert_eq!(errors[0].error().to_string(), "Unknown axiom Foo");
    }
}
