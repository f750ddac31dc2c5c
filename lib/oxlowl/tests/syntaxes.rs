#![allow(clippy::panic_in_result_fn)]

use oxlmodel::{Diagnostic, InterningNodeFactory, Loader, SimpleNodeFactory};
use oxlowl::{Axiom, ClassExpression, FunctionalOwlLoader, ObjectPropertyExpression, OwlXmlLoader};

const FUNCTIONAL: &str = r#"
Prefix(:=<http://example.com/pizza#>)
Prefix(xsd:=<http://www.w3.org/2001/XMLSchema#>)
Prefix(rdfs:=<http://www.w3.org/2000/01/rdf-schema#>)
Ontology(<http://example.com/pizza>
  Import(<http://example.com/food>)
  Annotation(rdfs:comment "A tiny pizza ontology"@en)

  Declaration(Class(:Pizza))
  Declaration(ObjectProperty(:hasTopping))
  Declaration(DataProperty(:calories))
  SubClassOf(Annotation(rdfs:label "veggie") :VegetarianPizza :Pizza)
  EquivalentClasses(:CheesyPizza ObjectIntersectionOf(:Pizza ObjectSomeValuesFrom(:hasTopping :Cheese)))
  DisjointClasses(:Pizza :Topping)
  ObjectPropertyDomain(:hasTopping :Pizza)
  InverseObjectProperties(:hasTopping :isToppingOf)
  TransitiveObjectProperty(ObjectInverseOf(:isToppingOf))
  DataPropertyRange(:calories xsd:integer)
  SubClassOf(:LightPizza DataAllValuesFrom(:calories DatatypeRestriction(xsd:integer xsd:maxExclusive "500"^^xsd:integer)))
  ClassAssertion(:Pizza :margherita)
  DataPropertyAssertion(:calories :margherita "800"^^xsd:integer)
)
"#;

const OWL_XML: &str = r#"<?xml version="1.0"?>
<Ontology xmlns="http://www.w3.org/2002/07/owl#" ontologyIRI="http://example.com/pizza">
  <Prefix name="" IRI="http://example.com/pizza#"/>
  <Prefix name="xsd" IRI="http://www.w3.org/2001/XMLSchema#"/>
  <Prefix name="rdfs" IRI="http://www.w3.org/2000/01/rdf-schema#"/>
  <Import>http://example.com/food</Import>
  <Annotation>
    <AnnotationProperty abbreviatedIRI="rdfs:comment"/>
    <Literal xml:lang="en">A tiny pizza ontology</Literal>
  </Annotation>
  <Declaration><Class abbreviatedIRI=":Pizza"/></Declaration>
  <Declaration><ObjectProperty abbreviatedIRI=":hasTopping"/></Declaration>
  <Declaration><DataProperty abbreviatedIRI=":calories"/></Declaration>
  <SubClassOf>
    <Annotation>
      <AnnotationProperty abbreviatedIRI="rdfs:label"/>
      <Literal>veggie</Literal>
    </Annotation>
    <Class abbreviatedIRI=":VegetarianPizza"/>
    <Class abbreviatedIRI=":Pizza"/>
  </SubClassOf>
  <EquivalentClasses>
    <Class abbreviatedIRI=":CheesyPizza"/>
    <ObjectIntersectionOf>
      <Class abbreviatedIRI=":Pizza"/>
      <ObjectSomeValuesFrom>
        <ObjectProperty abbreviatedIRI=":hasTopping"/>
        <Class abbreviatedIRI=":Cheese"/>
      </ObjectSomeValuesFrom>
    </ObjectIntersectionOf>
  </EquivalentClasses>
  <DisjointClasses>
    <Class abbreviatedIRI=":Pizza"/>
    <Class abbreviatedIRI=":Topping"/>
  </DisjointClasses>
  <ObjectPropertyDomain>
    <ObjectProperty abbreviatedIRI=":hasTopping"/>
    <Class abbreviatedIRI=":Pizza"/>
  </ObjectPropertyDomain>
  <InverseObjectProperties>
    <ObjectProperty abbreviatedIRI=":hasTopping"/>
    <ObjectProperty abbreviatedIRI=":isToppingOf"/>
  </InverseObjectProperties>
  <TransitiveObjectProperty>
    <ObjectInverseOf><ObjectProperty abbreviatedIRI=":isToppingOf"/></ObjectInverseOf>
  </TransitiveObjectProperty>
  <DataPropertyRange>
    <DataProperty abbreviatedIRI=":calories"/>
    <Datatype abbreviatedIRI="xsd:integer"/>
  </DataPropertyRange>
  <SubClassOf>
    <Class abbreviatedIRI=":LightPizza"/>
    <DataAllValuesFrom>
      <DataProperty abbreviatedIRI=":calories"/>
      <DatatypeRestriction>
        <Datatype abbreviatedIRI="xsd:integer"/>
        <FacetRestriction facet="http://www.w3.org/2001/XMLSchema#maxExclusive">
          <Literal datatypeIRI="http://www.w3.org/2001/XMLSchema#integer">500</Literal>
        </FacetRestriction>
      </DatatypeRestriction>
    </DataAllValuesFrom>
  </SubClassOf>
  <ClassAssertion>
    <Class abbreviatedIRI=":Pizza"/>
    <NamedIndividual abbreviatedIRI=":margherita"/>
  </ClassAssertion>
  <DataPropertyAssertion>
    <DataProperty abbreviatedIRI=":calories"/>
    <NamedIndividual abbreviatedIRI=":margherita"/>
    <Literal datatypeIRI="http://www.w3.org/2001/XMLSchema#integer">800</Literal>
  </DataPropertyAssertion>
</Ontology>
"#;

#[test]
fn both_syntaxes_load_the_same_document() -> Result<(), Vec<Diagnostic>> {
    let functional = FunctionalOwlLoader::new().load(
        FUNCTIONAL,
        "http://example.com/pizza.ofn",
        &mut SimpleNodeFactory,
    )?;
    let xml = OwlXmlLoader::new().load(
        OWL_XML,
        "http://example.com/pizza.owx",
        &mut SimpleNodeFactory,
    )?;
    assert_eq!(functional.len(), 13);
    assert_eq!(functional, xml);
    assert_eq!(functional.to_string(), xml.to_string());
    Ok(())
}

#[test]
fn document_display() -> Result<(), Vec<Diagnostic>> {
    let document = FunctionalOwlLoader::new().load(
        FUNCTIONAL,
        "http://example.com/pizza.ofn",
        &mut InterningNodeFactory::default(),
    )?;
    let display = document.to_string();
    let mut lines = display.lines();
    assert_eq!(lines.next(), Some("Ontology(<http://example.com/pizza>"));
    assert_eq!(lines.next(), Some("Import(<http://example.com/food>)"));
    assert!(display.contains(
        "SubClassOf(Annotation(<http://www.w3.org/2000/01/rdf-schema#label> \"veggie\") <http://example.com/pizza#VegetarianPizza> <http://example.com/pizza#Pizza>)"
    ));
    assert!(display.contains(
        "TransitiveObjectProperty(ObjectInverseOf(<http://example.com/pizza#isToppingOf>))"
    ));
    assert!(display.ends_with(')'));
    Ok(())
}

#[test]
fn expressions_are_typed() -> Result<(), Vec<Diagnostic>> {
    let document = FunctionalOwlLoader::new().load(
        FUNCTIONAL,
        "http://example.com/pizza.ofn",
        &mut SimpleNodeFactory,
    )?;
    let equivalent = document
        .axioms()
        .find_map(|axiom| match axiom {
            Axiom::EquivalentClasses(classes) => Some(classes),
            _ => None,
        })
        .ok_or_else(Vec::new)?;
    assert!(equivalent[0].is_named());
    assert!(matches!(
        &equivalent[1],
        ClassExpression::ObjectIntersectionOf(operands) if operands.len() == 2
    ));
    let transitive = document
        .axioms()
        .find_map(|axiom| match axiom {
            Axiom::TransitiveObjectProperty(property) => Some(property),
            _ => None,
        })
        .ok_or_else(Vec::new)?;
    assert!(matches!(
        transitive,
        ObjectPropertyExpression::ObjectInverseOf(_)
    ));
    Ok(())
}

#[test]
fn syntax_errors_are_located() {
    let errors = FunctionalOwlLoader::new()
        .load(
            "Ontology(\n  SubClassOf(<http://example.com/A> <http://example.com/B>\n  Declaration(Class(<http://example.com/C>)))\n ! )",
            "http://example.com/broken.ofn",
            &mut SimpleNodeFactory,
        )
        .unwrap_err();
    assert!(!errors.is_empty());
    assert!(errors[0].to_string().starts_with("Loader error at line"));
}

#[test]
fn owl_xml_requires_an_ontology_root() {
    let errors = OwlXmlLoader::new()
        .load(
            r#"<Class xmlns="http://www.w3.org/2002/07/owl#" IRI="http://example.com/A"/>"#,
            "http://example.com/broken.owx",
            &mut SimpleNodeFactory,
        )
        .unwrap_err();
    assert_eq!(
        errors[0].error().to_string(),
        "The root element must be Ontology, found Class"
    );
}
