//! The result of an ontology document load.

use crate::axiom::{AnnotatedAxiom, Annotation, Axiom};
use crate::entity::Entity;
use rustc_hash::FxHashSet;
use std::fmt;

/// An OWL 2 ontology document: its header and its axioms in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyDocument {
    /// The ontology IRI, if any.
    pub ontology_iri: Option<String>,
    /// The version IRI, only set if the ontology IRI is.
    pub version_iri: Option<String>,
    /// The imported ontology IRIs, without duplicates.
    pub imports: Vec<String>,
    /// The annotations of the ontology itself.
    pub annotations: Vec<Annotation>,
    pub axioms: Vec<AnnotatedAxiom>,
}

impl OntologyDocument {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, iri: impl Into<String>) {
        let iri = iri.into();
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// The axioms without their annotations.
    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter().map(|a| &a.axiom)
    }

    /// The entities introduced by `Declaration` axioms.
    pub fn declared_entities(&self) -> FxHashSet<&Entity> {
        self.axioms()
            .filter_map(|axiom| match axiom {
                Axiom::Declaration(entity) => Some(entity),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for OntologyDocument {
    /// Writes the document in functional syntax with full IRIs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ontology(")?;
        if let Some(iri) = &self.ontology_iri {
            write!(f, "<{iri}>")?;
            if let Some(version) = &self.version_iri {
                write!(f, " <{version}>")?;
            }
        }
        writeln!(f)?;
        for import in &self.imports {
            writeln!(f, "Import(<{import}>)")?;
        }
        for annotation in &self.annotations {
            writeln!(f, "{annotation}")?;
        }
        for axiom in &self.axioms {
            writeln!(f, "{axiom}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::OwlClass;
    use oxlmodel::NamedNode;

    #[test]
    fn declarations_and_imports() {
        let a = NamedNode::new_unchecked("http://example.com/A");
        let mut document = OntologyDocument::new();
        document.ontology_iri = Some("http://example.com/o".into());
        document.add_import("http://example.com/i");
        document.add_import("http://example.com/i");
        document
            .axioms
            .push(Axiom::Declaration(Entity::Class(OwlClass::new(a.clone()))).into());
        document
            .axioms
            .push(Axiom::Declaration(Entity::Class(OwlClass::new(a))).into());
        assert_eq!(document.imports.len(), 1);
        assert_eq!(document.len(), 2);
        assert_eq!(document.declared_entities().len(), 1);
        assert_eq!(
            document.to_string(),
            "Ontology(<http://example.com/o>\nImport(<http://example.com/i>)\nDeclaration(Class(<http://example.com/A>))\nDeclaration(Class(<http://example.com/A>))\n)"
        );
    }
}
