use crate::tree::MAX_NESTING_DEPTH;
use std::fmt;
use std::ops::Range;

/// A position in a text i.e. a `line` number starting from 0, a `column` number starting from 0 (in number of code points) and a global file `offset` starting from 0 (in number of bytes).
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default, Hash)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

impl TextPosition {
    /// Computes the line and column of a byte offset in `input`.
    ///
    /// ```
    /// use oxlmodel::TextPosition;
    ///
    /// let position = TextPosition::from_offset("ab\ncé d", 7);
    /// assert_eq!((position.line, position.column), (1, 3));
    /// ```
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: count(before.matches('\n').count()),
            column: count(before[line_start..].chars().count()),
            offset: count(offset),
        }
    }

    /// The byte offset as a `usize`.
    #[inline]
    pub fn byte_offset(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(usize::MAX)
    }
}

fn count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// An error raised by [`resolve_relative`](crate::uri::resolve_relative) or [`parse`](crate::uri::parse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed URI '{uri}': {reason}")]
pub struct MalformedUriError {
    uri: String,
    reason: String,
}

impl MalformedUriError {
    pub fn new(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// The URI that failed to parse.
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The reasons a document load fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError {
    /// The document does not follow the syntax of its format.
    #[error("{0}")]
    Syntax(String),
    /// A URI is structurally invalid or an absolute IRI was expected.
    #[error(transparent)]
    MalformedUri(#[from] MalformedUriError),
    /// A JSON-LD `@context` value has an unsupported shape.
    #[error("invalid JSON-LD context: {0}")]
    InvalidContext(String),
    /// An RDF/XML `rdf:ID` value is used twice in the same document.
    #[error("{0} has already been used as rdf:ID value")]
    DuplicateId(String),
    /// A prefixed name, a node identifier or a term cannot be resolved.
    #[error("{0}")]
    UnresolvableReference(String),
}

impl LoaderError {
    /// Builds a syntax error from a printable message.
    #[inline]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Builds the error of a document nesting more than [`MAX_NESTING_DEPTH`] `kind` elements.
    pub fn too_deep(kind: &str) -> Self {
        Self::Syntax(format!(
            "Too many nested {kind}, at most {MAX_NESTING_DEPTH} levels are allowed"
        ))
    }
}

/// A [`LoaderError`] located in the source document.
///
/// The context is the source line the error occurred on, when the syntax is line based enough
/// for it to be meaningful.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct Diagnostic {
    #[source]
    error: LoaderError,
    location: Option<Range<TextPosition>>,
    context: Option<String>,
}

impl Diagnostic {
    #[inline]
    pub fn new(error: impl Into<LoaderError>) -> Self {
        Self {
            error: error.into(),
            location: None,
            context: None,
        }
    }

    /// Sets the location of the error.
    #[inline]
    #[must_use]
    pub fn at(mut self, location: Range<TextPosition>) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the location of the error to a single position.
    #[inline]
    #[must_use]
    pub fn at_position(self, position: TextPosition) -> Self {
        self.at(position..position)
    }

    /// Locates the error at a byte offset range of `input` and attaches the source line as context.
    #[must_use]
    pub fn in_source(mut self, input: &str, offsets: Range<usize>) -> Self {
        let start = TextPosition::from_offset(input, offsets.start);
        let end = TextPosition::from_offset(input, offsets.end.max(offsets.start));
        self.context = source_line(input, offsets.start);
        self.location = Some(start..end);
        self
    }

    #[inline]
    pub fn error(&self) -> &LoaderError {
        &self.error
    }

    #[inline]
    pub fn into_error(self) -> LoaderError {
        self.error
    }

    /// The location of the error inside of the file.
    #[inline]
    pub fn location(&self) -> Option<Range<TextPosition>> {
        self.location.clone()
    }

    /// The source line of the error, if known.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location)
                if location.start.line != location.end.line
                    && location.start.offset < location.end.offset =>
            {
                write!(
                    f,
                    "Loader error between line {} column {} and line {} column {}: {}",
                    location.start.line + 1,
                    location.start.column + 1,
                    location.end.line + 1,
                    location.end.column + 1,
                    self.error
                )?;
            }
            Some(location) => write!(
                f,
                "Loader error at line {} column {}: {}",
                location.start.line + 1,
                location.start.column + 1,
                self.error
            )?,
            None => write!(f, "Loader error: {}", self.error)?,
        }
        if let Some(context) = &self.context {
            write!(f, "\n  | {context}")?;
        }
        Ok(())
    }
}

impl From<LoaderError> for Diagnostic {
    #[inline]
    fn from(error: LoaderError) -> Self {
        Self::new(error)
    }
}

impl From<MalformedUriError> for Diagnostic {
    #[inline]
    fn from(error: MalformedUriError) -> Self {
        Self::new(error)
    }
}

fn source_line(input: &str, offset: usize) -> Option<String> {
    let offset = offset.min(input.len());
    let start = input.get(..offset)?.rfind('\n').map_or(0, |i| i + 1);
    let end = input[offset..].find('\n').map_or(input.len(), |i| offset + i);
    let line = input[start..end].trim_end_matches('\r');
    (!line.trim().is_empty()).then(|| line.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display() {
        let input = "first line\nsecond line";
        let diagnostic =
            Diagnostic::new(LoaderError::syntax("Unexpected token")).in_source(input, 12..13);
        assert_eq!(
            diagnostic.to_string(),
            "Loader error at line 2 column 2: Unexpected token\n  | second line"
        );
    }

    #[test]
    fn diagnostic_without_location() {
        let diagnostic = Diagnostic::new(LoaderError::DuplicateId("http://example.com/#a".into()));
        assert_eq!(
            diagnostic.to_string(),
            "Loader error: http://example.com/#a has already been used as rdf:ID value"
        );
    }
}
