#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod axiom;
mod builder;
mod entity;
mod expression;
mod functional;
pub mod lexer;
mod ontology;
mod owlxml;
pub mod parser;

pub use crate::axiom::{AnnotatedAxiom, Annotation, AnnotationSubject, AnnotationValue, Axiom};
pub use crate::entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, Individual, ObjectProperty, OwlClass,
};
pub use crate::expression::{
    ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression,
};
pub use crate::functional::FunctionalOwlLoader;
pub use crate::ontology::OntologyDocument;
pub use crate::owlxml::OwlXmlLoader;
