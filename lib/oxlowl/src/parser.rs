//! A recursive descent parser turning OWL 2 functional syntax into [`OwlNode`] trees.
//!
//! The tree is shaped after the functional syntax and the OWL/XML reader builds the same shape,
//! so a single walker loads both syntaxes.

use crate::lexer::{OwlToken, TokenWithPosition, tokenize};
use oxlmodel::{Diagnostic, LoaderError, MAX_NESTING_DEPTH, ParseNode, TextPosition};

/// The node kinds of the ontology parse trees.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum OwlSymbol {
    /// [`OwlSymbol::Prefix`] children followed by the ontology [`OwlSymbol::Call`].
    ///
    /// `value` is the base IRI set by the document itself, if any.
    Document,
    /// `value` is the prefix name without the colon, the child is the namespace IRI.
    Prefix,
    /// `value` is the constructor name, e.g. `SubClassOf`, the children are its arguments.
    Call,
    /// A parenthesized list of arguments without a name, e.g. the property lists of `HasKey`.
    Group,
    Iri,
    /// `value` is `prefix:local`.
    PrefixedName,
    BlankNodeLabel,
    /// `value` is the lexical form, the optional child is a [`OwlSymbol::LangTag`] or a datatype IRI.
    Literal,
    LangTag,
    Integer,
}

pub type OwlNode = ParseNode<OwlSymbol>;

/// Parses a whole functional syntax document.
///
/// An invalid axiom is skipped to report as many errors as possible.
pub fn parse(input: &str) -> Result<OwlNode, Vec<Diagnostic>> {
    let tokens = tokenize(input)?;
    let mut parser = FunctionalParser {
        input,
        line_starts: std::iter::once(0)
            .chain(memchr::memchr_iter(b'\n', input.as_bytes()).map(|i| i + 1))
            .collect(),
        tokens,
        cursor: 0,
        depth: 0,
        errors: Vec::new(),
    };
    let document = parser.parse_document();
    match document {
        Ok(document) if parser.errors.is_empty() => Ok(document),
        Ok(_) => Err(parser.errors),
        Err(error) => {
            parser.errors.push(error);
            Err(parser.errors)
        }
    }
}

type ParseResult<T> = Result<T, Diagnostic>;

struct FunctionalParser<'a> {
    input: &'a str,
    line_starts: Vec<usize>,
    tokens: Vec<TokenWithPosition<'a>>,
    cursor: usize,
    /// Number of open argument lists inside of the ontology.
    depth: usize,
    errors: Vec<Diagnostic>,
}

impl<'a> FunctionalParser<'a> {
    // ontologyDocument := prefixDeclaration* Ontology
    fn parse_document(&mut self) -> ParseResult<OwlNode> {
        let mut document = OwlNode::new(OwlSymbol::Document, TextPosition::default());
        while matches!(self.peek(), Some(OwlToken::Keyword("Prefix"))) {
            document.push(self.parse_prefix()?);
        }
        let (token, position) = self.next_token("'Ontology'")?;
        if token != OwlToken::Keyword("Ontology") {
            return Err(self.unexpected(&token, position, "'Ontology'"));
        }
        self.expect_punctuation("(")?;
        let mut ontology = OwlNode::new(OwlSymbol::Call, position);
        ontology.value = Some("Ontology".into());
        loop {
            if self.is_punctuation(")") {
                self.cursor += 1;
                break;
            }
            if self.peek().is_none() {
                return Err(self.end_of_file("')'"));
            }
            let start = self.cursor;
            match self.parse_argument() {
                Ok(argument) => ontology.push(argument),
                Err(error) => {
                    self.errors.push(error);
                    self.depth = 0;
                    self.skip_argument(start);
                }
            }
        }
        document.push(ontology);
        if let Some(token) = self.tokens.get(self.cursor) {
            let position = self.position(token.position.start);
            return Err(self.unexpected(&token.token.clone(), position, "the end of the document"));
        }
        Ok(document)
    }

    // prefixDeclaration := 'Prefix' '(' prefixName '=' fullIRI ')'
    fn parse_prefix(&mut self) -> ParseResult<OwlNode> {
        let position = self.current_position();
        self.cursor += 1;
        self.expect_punctuation("(")?;
        let name = match self.next_token("a prefix name")? {
            (OwlToken::PrefixedName(name), _) if name.ends_with(':') => name,
            (token, position) => return Err(self.unexpected(&token, position, "a prefix name")),
        };
        self.expect_punctuation("=")?;
        let iri = match self.next_token("an IRI")? {
            (OwlToken::IriRef(iri), position) => OwlNode::leaf(OwlSymbol::Iri, iri, position),
            (token, position) => return Err(self.unexpected(&token, position, "an IRI")),
        };
        self.expect_punctuation(")")?;
        Ok(OwlNode::leaf(OwlSymbol::Prefix, &name[..name.len() - 1], position).with_child(iri))
    }

    fn parse_argument(&mut self) -> ParseResult<OwlNode> {
        let expected = "an IRI, a literal, a blank node or an expression";
        Ok(match self.next_token(expected)? {
            (OwlToken::Keyword(name), position) => {
                self.expect_punctuation("(")?;
                let mut call = OwlNode::leaf(OwlSymbol::Call, name, position);
                self.parse_arguments(&mut call)?;
                call
            }
            (OwlToken::Punctuation("("), position) => {
                let mut group = OwlNode::new(OwlSymbol::Group, position);
                self.parse_arguments(&mut group)?;
                group
            }
            (OwlToken::IriRef(iri), position) => OwlNode::leaf(OwlSymbol::Iri, iri, position),
            (OwlToken::PrefixedName(name), position) => {
                OwlNode::leaf(OwlSymbol::PrefixedName, name, position)
            }
            (OwlToken::BlankNodeLabel(label), position) => {
                OwlNode::leaf(OwlSymbol::BlankNodeLabel, label, position)
            }
            (OwlToken::Integer(value), position) => {
                OwlNode::leaf(OwlSymbol::Integer, value, position)
            }
            (OwlToken::String(value), position) => self.parse_literal_suffix(value, position)?,
            (token, position) => return Err(self.unexpected(&token, position, expected)),
        })
    }

    fn parse_arguments(&mut self, parent: &mut OwlNode) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            let offset = parent.position.byte_offset();
            return Err(Diagnostic::new(LoaderError::too_deep("expressions"))
                .in_source(self.input, offset..offset));
        }
        self.depth += 1;
        let result = self.parse_argument_list(parent);
        self.depth -= 1;
        result
    }

    fn parse_argument_list(&mut self, parent: &mut OwlNode) -> ParseResult<()> {
        loop {
            if self.is_punctuation(")") {
                self.cursor += 1;
                return Ok(());
            }
            if self.peek().is_none() {
                return Err(self.end_of_file("')'"));
            }
            parent.push(self.parse_argument()?);
        }
    }

    // Literal := quotedString ( '^^' Datatype | languageTag )?
    fn parse_literal_suffix(&mut self, value: String, position: TextPosition) -> ParseResult<OwlNode> {
        let literal = OwlNode::leaf(OwlSymbol::Literal, value, position);
        Ok(match self.peek() {
            Some(OwlToken::LangTag(tag)) => {
                let tag = OwlNode::leaf(OwlSymbol::LangTag, *tag, self.current_position());
                self.cursor += 1;
                literal.with_child(tag)
            }
            Some(OwlToken::Punctuation("^^")) => {
                self.cursor += 1;
                let datatype = match self.next_token("a datatype IRI")? {
                    (OwlToken::IriRef(iri), position) => {
                        OwlNode::leaf(OwlSymbol::Iri, iri, position)
                    }
                    (OwlToken::PrefixedName(name), position) => {
                        OwlNode::leaf(OwlSymbol::PrefixedName, name, position)
                    }
                    (token, position) => {
                        return Err(self.unexpected(&token, position, "a datatype IRI"));
                    }
                };
                literal.with_child(datatype)
            }
            _ => literal,
        })
    }

    /// Moves the cursor after the argument starting at `start`.
    fn skip_argument(&mut self, start: usize) {
        self.cursor = start;
        if matches!(self.peek(), Some(OwlToken::Keyword(_))) {
            self.cursor += 1;
        }
        if !self.is_punctuation("(") {
            self.cursor += 1;
            return;
        }
        let mut depth = 0_usize;
        while self.peek().is_some() {
            let (open, close) = (self.is_punctuation("("), self.is_punctuation(")"));
            self.cursor += 1;
            if open {
                depth += 1;
            } else if close {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }

    fn peek(&self) -> Option<&OwlToken<'a>> {
        self.tokens.get(self.cursor).map(|t| &t.token)
    }

    fn is_punctuation(&self, punctuation: &str) -> bool {
        matches!(self.peek(), Some(OwlToken::Punctuation(p)) if *p == punctuation)
    }

    fn next_token(&mut self, expected: &str) -> ParseResult<(OwlToken<'a>, TextPosition)> {
        let Some(token) = self.tokens.get(self.cursor) else {
            return Err(self.end_of_file(expected));
        };
        let token = token.clone();
        self.cursor += 1;
        Ok((token.token, self.position(token.position.start)))
    }

    fn expect_punctuation(&mut self, punctuation: &str) -> ParseResult<()> {
        if self.is_punctuation(punctuation) {
            self.cursor += 1;
            return Ok(());
        }
        let (token, position) = self.next_token(&format!("'{punctuation}'"))?;
        Err(self.unexpected(&token, position, &format!("'{punctuation}'")))
    }

    fn end_of_file(&self, expected: &str) -> Diagnostic {
        Diagnostic::new(LoaderError::syntax(format!(
            "Unexpected end of file, expecting {expected}"
        )))
        .in_source(self.input, self.input.len()..self.input.len())
    }

    fn unexpected(&self, token: &OwlToken<'_>, position: TextPosition, expected: &str) -> Diagnostic {
        let offset = position.byte_offset();
        Diagnostic::new(LoaderError::syntax(format!(
            "Unexpected {}, expecting {expected}",
            describe(token)
        )))
        .in_source(self.input, offset..offset)
    }

    fn current_position(&self) -> TextPosition {
        self.tokens
            .get(self.cursor)
            .map_or_else(|| self.position(self.input.len()), |t| self.position(t.position.start))
    }

    fn position(&self, offset: usize) -> TextPosition {
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        let line_start = self.line_starts[line];
        TextPosition {
            line: to_u64(line),
            column: to_u64(
                self.input
                    .get(line_start..offset)
                    .map_or(0, |s| s.chars().count()),
            ),
            offset: to_u64(offset),
        }
    }
}

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn describe(token: &OwlToken<'_>) -> String {
    match token {
        OwlToken::IriRef(iri) => format!("IRI <{iri}>"),
        OwlToken::PrefixedName(name) => format!("prefixed name {name}"),
        OwlToken::BlankNodeLabel(label) => format!("blank node _:{label}"),
        OwlToken::String(_) => "string".into(),
        OwlToken::LangTag(tag) => format!("'@{tag}'"),
        OwlToken::Integer(value) => format!("integer {value}"),
        OwlToken::Keyword(k) => format!("'{k}'"),
        OwlToken::Punctuation(p) => format!("'{p}'"),
    }
}
