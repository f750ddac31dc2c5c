use crate::named_node::NamedNode;
use crate::vocab::{rdf, xsd};
use std::fmt;
use std::fmt::Write;

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// A literal always has a datatype. It has a language tag if and only if its datatype is
/// `rdf:langString`: building a literal with both a language and another datatype keeps the
/// datatype and drops the language.
///
/// The default string formatter is returning an N-Triples compatible representation:
/// ```
/// use oxlmodel::Literal;
/// use oxlmodel::vocab::xsd;
///
/// assert_eq!(
///     "\"foo\\nbar\"",
///     Literal::new_simple_literal("foo\nbar").to_string()
/// );
///
/// assert_eq!(
///     r#""1999-01-01"^^<http://www.w3.org/2001/XMLSchema#date>"#,
///     Literal::new_typed_literal("1999-01-01", xsd::DATE.into_owned()).to_string()
/// );
///
/// assert_eq!(
///     r#""foo"@en"#,
///     Literal::new_language_tagged_literal("foo", "en").to_string()
/// );
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Literal {
    value: String,
    datatype: NamedNode,
    language: Option<String>,
}

impl Literal {
    /// Builds a literal from its three components.
    ///
    /// The language is kept only when `datatype` is `rdf:langString`.
    pub fn new(
        value: impl Into<String>,
        datatype: NamedNode,
        language: Option<String>,
    ) -> Self {
        let language = language.filter(|_| datatype == rdf::LANG_STRING);
        Self {
            value: value.into(),
            datatype,
            language,
        }
    }

    /// Builds an `xsd:string` literal.
    #[inline]
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self::new(value, xsd::STRING.into_owned(), None)
    }

    #[inline]
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self::new(value, datatype, None)
    }

    /// Builds an `rdf:langString` literal.
    #[inline]
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::new(
            value,
            rdf::LANG_STRING.into_owned(),
            Some(language.into()),
        )
    }

    /// The literal [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn datatype(&self) -> &NamedNode {
        &self.datatype
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns `true` for `xsd:string` literals.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.datatype == xsd::STRING
    }

    #[inline]
    pub fn destruct(self) -> (String, NamedNode, Option<String>) {
        (self.value, self.datatype, self.language)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_quoted_str(&self.value, f)?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if self.is_plain() {
            Ok(())
        } else {
            write!(f, "^^{}", self.datatype)
        }
    }
}

/// Writes a string between double quotes using N-Triples escapes.
pub fn print_quoted_str(string: &str, f: &mut impl Write) -> fmt::Result {
    f.write_char('"')?;
    for c in string.chars() {
        match c {
            '\u{08}' => f.write_str("\\b"),
            '\t' => f.write_str("\\t"),
            '\n' => f.write_str("\\n"),
            '\u{0c}' => f.write_str("\\f"),
            '\r' => f.write_str("\\r"),
            '"' => f.write_str("\\\""),
            '\\' => f.write_str("\\\\"),
            '\0'..='\u{1f}' | '\u{7f}' => write!(f, "\\u{:04X}", u32::from(c)),
            c => f.write_char(c),
        }?;
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_requires_lang_string() {
        let literal = Literal::new(
            "5",
            xsd::INTEGER.into_owned(),
            Some("en".into()),
        );
        assert_eq!(literal.language(), None);
        assert_eq!(literal.datatype(), &xsd::INTEGER.into_owned());
    }

    #[test]
    fn language_tagged() {
        let literal = Literal::new_language_tagged_literal("bonjour", "fr");
        assert_eq!(literal.value(), "bonjour");
        assert_eq!(literal.language(), Some("fr"));
        assert_eq!(*literal.datatype(), rdf::LANG_STRING);
    }

    #[test]
    fn display_escapes() {
        assert_eq!(
            Literal::new_simple_literal("a\"b\\c\u{1}").to_string(),
            "\"a\\\"b\\\\c\\u0001\""
        );
        assert_eq!(
            Literal::new_typed_literal("5", xsd::INTEGER.into_owned()).to_string(),
            "\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }
}
