use memchr::memchr2;
use oxlmodel::escape::{unescape_iri, unescape_string};
use oxlmodel::{Diagnostic, LoaderError};
use std::ops::Range;

/// A token of the OWL 2 functional syntax.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OwlToken<'a> {
    /// The unescaped content of a `<...>` IRI reference.
    IriRef(String),
    /// `prefix:local`, or `prefix:` in prefix declarations.
    PrefixedName(&'a str),
    BlankNodeLabel(&'a str),
    /// The unescaped content of a quoted string.
    String(String),
    LangTag(&'a str),
    Integer(&'a str),
    /// A constructor name like `Ontology` or `SubClassOf`.
    Keyword(&'a str),
    Punctuation(&'static str),
}

#[derive(Debug, Clone)]
pub struct TokenWithPosition<'a> {
    pub token: OwlToken<'a>,
    pub position: Range<usize>,
}

/// Splits a whole document into tokens, skipping whitespaces and `#` comments.
///
/// Every invalid token is reported, the lexer resumes just after it.
pub fn tokenize(input: &str) -> Result<Vec<TokenWithPosition<'_>>, Vec<Diagnostic>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut start = 0;
    loop {
        start = skip_whitespaces_and_comments(input, start);
        let Some(c) = input[start..].chars().next() else {
            break;
        };
        match recognize_token(input, start, c) {
            Ok((end, token)) => {
                tokens.push(TokenWithPosition {
                    token,
                    position: start..end,
                });
                start = end;
            }
            Err((position, message)) => {
                errors.push(
                    Diagnostic::new(LoaderError::syntax(message)).in_source(input, position.clone()),
                );
                start = position.end.max(start + c.len_utf8());
            }
        }
    }
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

type TokenResult<'a> = Result<(usize, OwlToken<'a>), (Range<usize>, String)>;

fn recognize_token(input: &str, start: usize, c: char) -> TokenResult<'_> {
    match c {
        '(' => Ok((start + 1, OwlToken::Punctuation("("))),
        ')' => Ok((start + 1, OwlToken::Punctuation(")"))),
        '=' => Ok((start + 1, OwlToken::Punctuation("="))),
        '^' => {
            if input[start + 1..].starts_with('^') {
                Ok((start + 2, OwlToken::Punctuation("^^")))
            } else {
                Err((
                    start..start + 1,
                    "Unexpected character '^', expecting '^^'".into(),
                ))
            }
        }
        '<' => recognize_iri(input, start),
        '"' => recognize_string(input, start),
        '@' => {
            let end = scan(input, start + 1, |c| c.is_ascii_alphanumeric() || c == '-');
            let tag = &input[start + 1..end];
            if tag.is_empty() || tag.starts_with('-') || tag.ends_with('-') {
                Err((start..end, "Invalid language tag".into()))
            } else {
                Ok((end, OwlToken::LangTag(tag)))
            }
        }
        '_' if input[start + 1..].starts_with(':') => {
            let end = scan_name(input, start + 2);
            if end == start + 2 {
                Err((start..end, "A blank node label must not be empty".into()))
            } else {
                Ok((end, OwlToken::BlankNodeLabel(&input[start + 2..end])))
            }
        }
        '0'..='9' => {
            let end = scan(input, start, |c| c.is_ascii_digit());
            Ok((end, OwlToken::Integer(&input[start..end])))
        }
        c if is_name_char(c) => {
            let end = scan_name(input, start);
            let name = &input[start..end];
            if name.contains(':') {
                Ok((end, OwlToken::PrefixedName(name)))
            } else {
                Ok((end, OwlToken::Keyword(name)))
            }
        }
        c => Err((
            start..start + c.len_utf8(),
            format!("Unexpected character '{c}'"),
        )),
    }
}

fn recognize_iri(input: &str, start: usize) -> TokenResult<'_> {
    for (i, c) in input[start + 1..].char_indices() {
        let position = start + 1 + i;
        match c {
            '>' => {
                let iri = unescape_iri(&input[start + 1..position]).map_err(|(i, message)| {
                    (start + 1 + i..start + 1 + i + 1, message)
                })?;
                return Ok((position + 1, OwlToken::IriRef(iri)));
            }
            '<' | '"' | '{' | '}' | '|' | '^' | '`' => {
                return Err((
                    start..iri_end(input, position, c),
                    format!("Invalid character '{c}' in IRI"),
                ));
            }
            c if c.is_whitespace() || c.is_control() => {
                return Err((
                    start..iri_end(input, position, c),
                    "IRIs must not contain whitespaces".into(),
                ));
            }
            _ => (),
        }
    }
    Err((start..input.len(), "Unterminated IRI".into()))
}

/// The end of an invalid IRI, to resume after its closing `>` if any.
fn iri_end(input: &str, invalid: usize, c: char) -> usize {
    input[invalid..]
        .find('>')
        .map_or(invalid + c.len_utf8(), |p| invalid + p + 1)
}

fn recognize_string(input: &str, start: usize) -> TokenResult<'_> {
    let mut escaped = false;
    for (i, c) in input[start + 1..].char_indices() {
        let position = start + 1 + i;
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            let value = unescape_string(&input[start + 1..position]).map_err(|(i, message)| {
                (start + 1 + i..start + 1 + i + 1, message)
            })?;
            return Ok((position + 1, OwlToken::String(value)));
        }
    }
    Err((start..input.len(), "Unterminated string".into()))
}

fn skip_whitespaces_and_comments(input: &str, mut i: usize) -> usize {
    let bytes = input.as_bytes();
    loop {
        match bytes.get(i) {
            Some(b' ' | b'\t' | b'\r' | b'\n') => i += 1,
            Some(b'#') => {
                i += memchr2(b'\r', b'\n', &bytes[i..]).unwrap_or(bytes.len() - i);
            }
            _ => return i,
        }
    }
}

fn scan(input: &str, from: usize, accept: impl Fn(char) -> bool) -> usize {
    input[from..]
        .char_indices()
        .find(|(_, c)| !accept(*c))
        .map_or(input.len(), |(i, _)| from + i)
}

/// Scans a prefixed name or a keyword, `\` escaping the next character.
fn scan_name(input: &str, from: usize) -> usize {
    let mut chars = input[from..].char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            if chars.next().is_none() {
                return input.len();
            }
        } else if !is_name_char(c) {
            return from + i;
        }
    }
    input.len()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '%') || !c.is_ascii()
}
