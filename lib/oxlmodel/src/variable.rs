use std::fmt;

/// A rule [variable](https://www.w3.org/TR/sparql11-query/#sparqlQueryVariables).
///
/// Variables only appear in rules: they are placeholders matched by a rule engine, never
/// materialized as data.
///
/// ```
/// use oxlmodel::Variable;
///
/// assert_eq!("?foo", Variable::new_unchecked("foo").to_string());
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Builds a variable from its name, without the leading `?`.
    #[inline]
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}
