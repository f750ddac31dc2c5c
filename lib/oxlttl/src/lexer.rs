#![allow(clippy::range_plus_one)]

use memchr::{memchr, memchr2};
use oxilangtag::LanguageTag;
use oxlmodel::{Diagnostic, LoaderError};
use std::borrow::Cow;
use std::cmp::min;
use std::ops::{Range, RangeInclusive};
use std::str;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TurtleToken<'a> {
    IriRef(String),
    PrefixedName {
        prefix: &'a str,
        local: Cow<'a, str>,
    },
    Variable(Cow<'a, str>),
    BlankNodeLabel(&'a str),
    String(String),
    LongString(String),
    Integer(&'a str),
    Decimal(&'a str),
    Double(&'a str),
    LangTag(&'a str),
    Punctuation(&'static str),
    PlainKeyword(&'a str),
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum LexerMode {
    /// N-Triples and N-Quads: no prefixed names, no long or single quoted strings.
    Line,
    /// Turtle and TriG.
    Turtle,
    /// Turtle plus `?variables` and `=>`.
    Rule,
}

pub struct TokenRecognizerError {
    pub position: Range<usize>,
    pub message: String,
}

impl<S: Into<String>> From<(Range<usize>, S)> for TokenRecognizerError {
    fn from((position, message): (Range<usize>, S)) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl<S: Into<String>> From<(RangeInclusive<usize>, S)> for TokenRecognizerError {
    fn from((position, message): (RangeInclusive<usize>, S)) -> Self {
        (*position.start()..*position.end() + 1, message).into()
    }
}

impl<S: Into<String>> From<(usize, S)> for TokenRecognizerError {
    fn from((position, message): (usize, S)) -> Self {
        (position..=position, message).into()
    }
}

#[derive(Debug, Clone)]
pub struct TokenWithPosition<T> {
    pub token: T,
    pub position: Range<usize>,
}

/// Splits a whole document into tokens, skipping whitespaces and `#` comments.
///
/// Every invalid token is reported, the lexer resumes just after it.
pub fn tokenize(
    input: &str,
    mode: LexerMode,
) -> Result<Vec<TokenWithPosition<TurtleToken<'_>>>, Vec<Diagnostic>> {
    let lexer = TurtleLexer::new(mode);
    let data = input.as_bytes();
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut start = 0;
    loop {
        start = skip_whitespaces_and_comments(data, start);
        if start >= data.len() {
            break;
        }
        let Some((consumed, result)) = lexer.recognize_next_token(&data[start..]) else {
            errors.push(
                Diagnostic::new(LoaderError::syntax("Unexpected end of file"))
                    .in_source(input, start..data.len()),
            );
            break;
        };
        match result {
            Ok(token) => tokens.push(TokenWithPosition {
                token,
                position: start..start + consumed,
            }),
            Err(e) => errors.push(
                Diagnostic::new(LoaderError::syntax(e.message))
                    .in_source(input, start + e.position.start..start + e.position.end),
            ),
        }
        start += consumed.max(1);
    }
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

fn skip_whitespaces_and_comments(data: &[u8], mut i: usize) -> usize {
    loop {
        match data.get(i) {
            Some(b' ' | b'\t' | b'\r' | b'\n') => i += 1,
            Some(b'#') => {
                i += memchr2(b'\r', b'\n', &data[i..]).unwrap_or(data.len() - i);
            }
            _ => return i,
        }
    }
}

pub struct TurtleLexer {
    mode: LexerMode,
}

impl TurtleLexer {
    pub fn new(mode: LexerMode) -> Self {
        Self { mode }
    }

    /// Recognizes the token at the beginning of `data`.
    ///
    /// Returns `None` if the input ends in the middle of the token.
    pub fn recognize_next_token<'a>(
        &self,
        data: &'a [u8],
    ) -> Option<(usize, Result<TurtleToken<'a>, TokenRecognizerError>)> {
        match *data.first()? {
            b'<' => Self::recognize_iri(data),
            b'_' => match data.get(1)? {
                b':' => Self::recognize_blank_node_label(data),
                c => Some((
                    1,
                    Err((0, format!("Unexpected character '{}'", char::from(*c))).into()),
                )),
            },
            b'"' => {
                if self.mode != LexerMode::Line
                    && data.get(1) == Some(&b'"')
                    && data.get(2) == Some(&b'"')
                {
                    Self::recognize_long_string(data, b'"')
                } else {
                    Self::recognize_string(data, b'"')
                }
            }
            b'\'' if self.mode != LexerMode::Line => {
                if data.get(1) == Some(&b'\'') && data.get(2) == Some(&b'\'') {
                    Self::recognize_long_string(data, b'\'')
                } else {
                    Self::recognize_string(data, b'\'')
                }
            }
            b'@' => Self::recognize_lang_tag(data),
            b'.' => match data.get(1) {
                Some(b'0'..=b'9') if self.mode != LexerMode::Line => {
                    Some(Self::recognize_number(data))
                }
                _ => Some((1, Ok(TurtleToken::Punctuation(".")))),
            },
            b'^' => {
                if *data.get(1)? == b'^' {
                    Some((2, Ok(TurtleToken::Punctuation("^^"))))
                } else {
                    Some((1, Err((0, "Unexpected character '^', expecting '^^'").into())))
                }
            }
            b'(' => Some((1, Ok(TurtleToken::Punctuation("(")))),
            b')' => Some((1, Ok(TurtleToken::Punctuation(")")))),
            b'[' => Some((1, Ok(TurtleToken::Punctuation("[")))),
            b']' => Some((1, Ok(TurtleToken::Punctuation("]")))),
            b'{' => Some((1, Ok(TurtleToken::Punctuation("{")))),
            b'}' => Some((1, Ok(TurtleToken::Punctuation("}")))),
            b',' => Some((1, Ok(TurtleToken::Punctuation(",")))),
            b';' => Some((1, Ok(TurtleToken::Punctuation(";")))),
            b'=' if self.mode == LexerMode::Rule && data.get(1) == Some(&b'>') => {
                Some((2, Ok(TurtleToken::Punctuation("=>"))))
            }
            b'0'..=b'9' | b'+' | b'-' if self.mode != LexerMode::Line => {
                Some(Self::recognize_number(data))
            }
            b'?' if self.mode == LexerMode::Rule => Some(Self::recognize_variable(data)),
            _ if self.mode == LexerMode::Line => Some(Self::recognize_keyword(data)),
            _ => Some(Self::recognize_pname_or_keyword(data)),
        }
    }

    fn recognize_iri(
        data: &[u8],
    ) -> Option<(usize, Result<TurtleToken<'static>, TokenRecognizerError>)> {
        // [18] IRIREF  ::=  '<' ([^#x00-#x20<>"{}|^`\] | UCHAR)* '>' /* #x00=NULL #01-#x1F=control codes #x20=space */
        let mut string = Vec::new();
        let mut i = 1;
        loop {
            let end = memchr2(b'>', b'\\', &data[i..])?;
            let chunk = &data[i..i + end];
            if let Some(bad) = chunk
                .iter()
                .position(|c| matches!(c, 0x00..=0x20 | b'<' | b'"' | b'{' | b'}' | b'|' | b'^' | b'`'))
            {
                let resume = memchr(b'>', &data[i + bad..]).map_or(data.len(), |e| i + bad + e + 1);
                return Some((
                    resume,
                    Err((
                        i + bad,
                        format!(
                            "The character {:?} is not allowed in IRIs",
                            char::from(chunk[bad])
                        ),
                    )
                        .into()),
                ));
            }
            string.extend_from_slice(chunk);
            i += end;
            match data[i] {
                b'>' => {
                    return Some((
                        i + 1,
                        string_from_utf8(string, 0..i + 1).map(TurtleToken::IriRef),
                    ));
                }
                _ => {
                    let (additional, c) = Self::recognize_escape(&data[i..], i, false)?;
                    i += additional + 1;
                    match c {
                        Ok(c) => {
                            let mut buf = [0; 4];
                            string.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                        }
                        Err(e) => return Some((i, Err(e))),
                    }
                }
            }
        }
    }

    fn recognize_keyword(data: &[u8]) -> (usize, Result<TurtleToken<'_>, TokenRecognizerError>) {
        let len = data
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric())
            .count();
        if len == 0 {
            let c = Self::recognize_unicode_char(data, 0)
                .and_then(Result::ok)
                .map_or('\u{FFFD}', |(c, _)| c);
            return (
                c.len_utf8(),
                Err((0, format!("Unexpected character '{c}'")).into()),
            );
        }
        (
            len,
            str_from_utf8(&data[..len], 0..len).map(TurtleToken::PlainKeyword),
        )
    }

    fn recognize_pname_or_keyword(
        data: &[u8],
    ) -> (usize, Result<TurtleToken<'_>, TokenRecognizerError>) {
        // [139s]  PNAME_NS   ::=  PN_PREFIX? ':'
        // [140s]  PNAME_LN   ::=  PNAME_NS PN_LOCAL
        // [167s]  PN_PREFIX  ::=  PN_CHARS_BASE ((PN_CHARS | '.')* PN_CHARS)?
        let mut i = 0;
        loop {
            let Some(r) = Self::recognize_unicode_char(&data[i..], i) else {
                while data[..i].ends_with(b".") {
                    i -= 1;
                }
                return if i == 0 {
                    (1, Err((0..1, format!("Unexpected byte {}", data[0])).into()))
                } else {
                    (
                        i,
                        str_from_utf8(&data[..i], 0..i).map(TurtleToken::PlainKeyword),
                    )
                };
            };
            match r {
                Ok((c, consumed)) => {
                    if c == ':' {
                        i += consumed;
                        break;
                    } else if i == 0 {
                        if !is_possible_pn_chars_base(c) {
                            return (
                                consumed,
                                Err((
                                    0..consumed,
                                    format!("'{c}' is not allowed at the beginning of a prefix name"),
                                )
                                    .into()),
                            );
                        }
                        i += consumed;
                    } else if is_possible_pn_chars(c) || c == '.' {
                        i += consumed;
                    } else {
                        while data[..i].ends_with(b".") {
                            i -= 1;
                        }
                        return (
                            i,
                            str_from_utf8(&data[..i], 0..i).map(TurtleToken::PlainKeyword),
                        );
                    }
                }
                Err(e) => return (e.position.end, Err(e)),
            }
        }
        let pn_prefix = match str_from_utf8(&data[..i - 1], 0..i - 1) {
            Ok(pn_prefix) => pn_prefix,
            Err(e) => return (i, Err(e)),
        };
        if pn_prefix.ends_with('.') {
            return (
                i,
                Err((
                    0..i,
                    format!(
                        "'{pn_prefix}' is not a valid prefix: prefixes are not allowed to end with '.'"
                    ),
                )
                    .into()),
            );
        }
        let (consumed, pn_local_result) = Self::recognize_optional_pn_local(&data[i..], i);
        (
            consumed + i,
            pn_local_result.map(|local| TurtleToken::PrefixedName {
                prefix: pn_prefix,
                local,
            }),
        )
    }

    fn recognize_variable(data: &[u8]) -> (usize, Result<TurtleToken<'_>, TokenRecognizerError>) {
        // [36]  QUICK_VAR_NAME  ::=  "?" PN_LOCAL
        let (consumed, result) = Self::recognize_optional_pn_local(&data[1..], 1);
        (
            consumed + 1,
            result.and_then(|name| {
                if name.is_empty() {
                    Err((0..consumed + 1, "A variable name is not allowed to be empty").into())
                } else {
                    Ok(TurtleToken::Variable(name))
                }
            }),
        )
    }

    fn recognize_optional_pn_local(
        data: &[u8],
        offset: usize,
    ) -> (usize, Result<Cow<'_, str>, TokenRecognizerError>) {
        // [168s]  PN_LOCAL  ::=  (PN_CHARS_U | ':' | [0-9] | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?
        let mut i = 0;
        let mut buffer = None; // Buffer if there are some escaped characters
        let mut position_that_is_already_in_buffer = 0;
        let mut ends_with_unescaped_dot = 0;
        loop {
            let r = match Self::recognize_unicode_char(&data[i..], i) {
                Some(Ok(r)) => Some(r),
                Some(Err(e)) => {
                    return (
                        e.position.end,
                        Err((offset + e.position.start..offset + e.position.end, e.message)
                            .into()),
                    );
                }
                None => None,
            };
            match r {
                Some(('%', _)) => {
                    let (Some(a), Some(b)) = (data.get(i + 1), data.get(i + 2)) else {
                        return (
                            data.len(),
                            Err((offset + i..offset + data.len(), "Unterminated % escape").into()),
                        );
                    };
                    let (a, b) = (char::from(*a), char::from(*b));
                    if !a.is_ascii_hexdigit() || !b.is_ascii_hexdigit() {
                        return (i + 3, Err((
                            offset + i..=offset + i + 2, format!("escapes in IRIs should be % followed by two hexadecimal characters, found '%{a}{b}'")
                        ).into()));
                    }
                    i += 3;
                    ends_with_unescaped_dot = 0;
                }
                Some(('\\', _)) => {
                    i += 1;
                    let Some(a) = data.get(i).map(|c| char::from(*c)) else {
                        return (
                            i,
                            Err((offset + i - 1, "Unterminated escape sequence").into()),
                        );
                    };
                    if !matches!(
                        a,
                        '_' | '~'
                            | '.'
                            | '-'
                            | '!'
                            | '$'
                            | '&'
                            | '\''
                            | '('
                            | ')'
                            | '*'
                            | '+'
                            | ','
                            | ';'
                            | '='
                            | '/'
                            | '?'
                            | '#'
                            | '@'
                            | '%'
                    ) {
                        return (i + 1, Err((
                            offset + i, format!("The character that are allowed to be escaped in IRIs are _~.-!$&'()*+,;=/?#@%, found '{a}'")
                        ).into()));
                    }
                    let buffer = buffer.get_or_insert_with(String::new);
                    // We add the missing bytes
                    if i - position_that_is_already_in_buffer > 1 {
                        match str_from_utf8(
                            &data[position_that_is_already_in_buffer..i - 1],
                            position_that_is_already_in_buffer..i - 1,
                        ) {
                            Ok(data) => buffer.push_str(data),
                            Err(e) => return (i, Err(e)),
                        }
                    }
                    buffer.push(a);
                    i += 1;
                    position_that_is_already_in_buffer = i;
                    ends_with_unescaped_dot = 0;
                }
                Some((c, consumed))
                    if (i == 0 && (is_possible_pn_chars_u(c) || c == ':' || c.is_ascii_digit()))
                        || (i > 0 && (is_possible_pn_chars(c) || c == ':')) =>
                {
                    i += consumed;
                    ends_with_unescaped_dot = 0;
                }
                Some(('.', consumed)) if i > 0 => {
                    i += consumed;
                    ends_with_unescaped_dot += 1;
                }
                _ => {
                    // We do not include the last dots
                    let local = if let Some(mut buffer) = buffer {
                        match str_from_utf8(
                            &data[position_that_is_already_in_buffer..i],
                            position_that_is_already_in_buffer..i,
                        ) {
                            Ok(data) => buffer.push_str(data),
                            Err(e) => return (i, Err(e)),
                        }
                        for _ in 0..ends_with_unescaped_dot {
                            buffer.pop();
                        }
                        Cow::Owned(buffer)
                    } else {
                        match str_from_utf8(&data[..i], 0..i) {
                            Ok(data) => Cow::Borrowed(&data[..data.len() - ends_with_unescaped_dot]),
                            Err(e) => return (i, Err(e)),
                        }
                    };
                    return (i - ends_with_unescaped_dot, Ok(local));
                }
            }
        }
    }

    fn recognize_blank_node_label(
        data: &[u8],
    ) -> Option<(usize, Result<TurtleToken<'_>, TokenRecognizerError>)> {
        // [141s]  BLANK_NODE_LABEL  ::=  '_:' (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?
        let mut i = 2;
        while let Some(c) = Self::recognize_unicode_char(&data[i..], i) {
            match c {
                Ok((c, consumed)) => {
                    if (i == 2 && (is_possible_pn_chars_u(c) || c.is_ascii_digit()))
                        || (i > 2 && (is_possible_pn_chars(c) || c == '.'))
                    {
                        i += consumed;
                    } else {
                        break;
                    }
                }
                Err(e) => return Some((e.position.end, Err(e))),
            }
        }
        while i > 2 && data[i - 1] == b'.' {
            i -= 1;
        }
        Some((
            i,
            if i > 2 {
                str_from_utf8(&data[2..i], 2..i).map(TurtleToken::BlankNodeLabel)
            } else {
                Err((0..i, "A blank node ID cannot be empty").into())
            },
        ))
    }

    fn recognize_lang_tag(
        data: &[u8],
    ) -> Option<(usize, Result<TurtleToken<'_>, TokenRecognizerError>)> {
        // [144s]  LANGTAG  ::=  '@' [a-zA-Z]+ ('-' [a-zA-Z0-9]+)*
        let first_block = data[1..]
            .iter()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        if first_block == 0 {
            return Some((
                1,
                Err((0..1, "A language code should always start with a letter").into()),
            ));
        }
        let mut i = 1 + first_block;
        while data.get(i) == Some(&b'-')
            && data.get(i + 1).is_some_and(|c| c.is_ascii_alphanumeric())
        {
            i += 1;
            i += data[i..]
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric())
                .count();
        }
        Some((i, Self::parse_lang_tag(&data[1..i], 1..i)))
    }

    fn parse_lang_tag(
        lang_tag: &[u8],
        position: Range<usize>,
    ) -> Result<TurtleToken<'_>, TokenRecognizerError> {
        let lang_tag = str_from_utf8(lang_tag, position.clone())?;
        if matches!(lang_tag, "prefix" | "base") {
            return Ok(TurtleToken::LangTag(lang_tag));
        }
        Ok(TurtleToken::LangTag(
            LanguageTag::parse(lang_tag)
                .map_err(|e| (position.clone(), e.to_string()))?
                .into_inner(),
        ))
    }

    fn recognize_string(
        data: &[u8],
        delimiter: u8,
    ) -> Option<(usize, Result<TurtleToken<'static>, TokenRecognizerError>)> {
        // [22]  STRING_LITERAL_QUOTE         ::=  '"' ([^#x22#x5C#xA#xD] | ECHAR | UCHAR)* '"' /* #x22=" #x5C=\ #xA=new line #xD=carriage return */
        // [23]  STRING_LITERAL_SINGLE_QUOTE  ::=  "'" ([^#x27#x5C#xA#xD] | ECHAR | UCHAR)* "'" /* #x27=' #x5C=\ #xA=new line #xD=carriage return */
        let mut string = String::new();
        let mut i = 1;
        loop {
            let mut end = memchr2(delimiter, b'\\', &data[i..])?;
            if let Some(line_jump_end) = memchr2(b'\n', b'\r', &data[i..i + end]) {
                end = line_jump_end;
            }
            match str_from_utf8(&data[i..i + end], i..i + end) {
                Ok(s) => string.push_str(s),
                Err(e) => return Some((i + end, Err(e))),
            };
            i += end;
            match data[i] {
                c if c == delimiter => {
                    return Some((i + 1, Ok(TurtleToken::String(string))));
                }
                b'\\' => {
                    let (additional, c) = Self::recognize_escape(&data[i..], i, true)?;
                    i += additional + 1;
                    match c {
                        Ok(c) => {
                            string.push(c);
                        }
                        Err(e) => {
                            // We read until the end of string char
                            let end = memchr(delimiter, &data[i..])?;
                            return Some((i + end + 1, Err(e)));
                        }
                    }
                }
                _ => {
                    // We read until the end of string char
                    let end = memchr(delimiter, &data[i..]).unwrap_or(0);
                    return Some((
                        i + end + 1,
                        Err((
                            i..i + 1,
                            "Line jumps are not allowed in string literals, use \\n",
                        )
                            .into()),
                    ));
                }
            }
        }
    }

    fn recognize_long_string(
        data: &[u8],
        delimiter: u8,
    ) -> Option<(usize, Result<TurtleToken<'static>, TokenRecognizerError>)> {
        // [24]  STRING_LITERAL_LONG_SINGLE_QUOTE  ::=  "'''" (("'" | "''")? ([^'\] | ECHAR | UCHAR))* "'''"
        // [25]  STRING_LITERAL_LONG_QUOTE         ::=  '"""' (('"' | '""')? ([^"\] | ECHAR | UCHAR))* '"""'
        let mut string = String::new();
        let mut i = 3;
        loop {
            let end = memchr2(delimiter, b'\\', &data[i..])?;
            match str_from_utf8(&data[i..i + end], i..i + end) {
                Ok(s) => string.push_str(s),
                Err(e) => return Some((i + end, Err(e))),
            };
            i += end;
            match data[i] {
                c if c == delimiter => {
                    if data.get(i + 1) == Some(&delimiter) && data.get(i + 2) == Some(&delimiter) {
                        // Quotes just before the closing ones belong to the string
                        let mut close = i;
                        while data.get(close + 3) == Some(&delimiter) {
                            string.push(char::from(delimiter));
                            close += 1;
                        }
                        return Some((close + 3, Ok(TurtleToken::LongString(string))));
                    }
                    i += 1;
                    string.push(char::from(delimiter));
                }
                _ => {
                    let (additional, c) = Self::recognize_escape(&data[i..], i, true)?;
                    i += additional + 1;
                    match c {
                        Ok(c) => {
                            string.push(c);
                        }
                        Err(e) => return Some((i, Err(e))),
                    }
                }
            }
        }
    }

    fn recognize_number(data: &[u8]) -> (usize, Result<TurtleToken<'_>, TokenRecognizerError>) {
        // [19]  INTEGER    ::=  [+-]? [0-9]+
        // [20]  DECIMAL    ::=  [+-]? [0-9]* '.' [0-9]+
        // [21]  DOUBLE     ::=  [+-]? ([0-9]+ '.' [0-9]* EXPONENT | '.' [0-9]+ EXPONENT | [0-9]+ EXPONENT)
        // [154s] EXPONENT  ::=  [eE] [+-]? [0-9]+
        let mut i = 0;
        if matches!(data.first(), Some(b'+' | b'-')) {
            i += 1;
        }
        // We read the digits before .
        let count_before = count_digits(&data[i..]);
        i += count_before;

        // We read the digits after .
        let count_after = if data.get(i) == Some(&b'.') {
            i += 1;
            let count_after = count_digits(&data[i..]);
            i += count_after;
            Some(count_after)
        } else {
            None
        };

        if matches!(data.get(i), Some(b'e' | b'E')) {
            i += 1;
            if matches!(data.get(i), Some(b'+' | b'-')) {
                i += 1;
            }
            let count_exp = count_digits(&data[i..]);
            i += count_exp;
            (
                i,
                if count_exp == 0 {
                    Err((0..i, "A double exponent cannot be empty").into())
                } else if count_before == 0 && count_after.unwrap_or(0) == 0 {
                    Err((0..i, "A double should not be empty").into())
                } else {
                    str_from_utf8(&data[..i], 0..i).map(TurtleToken::Double)
                },
            )
        } else if let Some(count_after) = count_after {
            if count_after == 0 {
                // We do not consume the '.' after all
                i -= 1;
                (
                    i,
                    if count_before == 0 {
                        Err((0..i.max(1), "An integer should not be empty").into())
                    } else {
                        str_from_utf8(&data[..i], 0..i).map(TurtleToken::Integer)
                    },
                )
            } else {
                (i, str_from_utf8(&data[..i], 0..i).map(TurtleToken::Decimal))
            }
        } else {
            (
                i.max(1),
                if count_before == 0 {
                    Err((0..i.max(1), "An integer should not be empty").into())
                } else {
                    str_from_utf8(&data[..i], 0..i).map(TurtleToken::Integer)
                },
            )
        }
    }

    fn recognize_escape(
        data: &[u8],
        position: usize,
        with_echar: bool,
    ) -> Option<(usize, Result<char, TokenRecognizerError>)> {
        // [26]   UCHAR  ::=  '\u' HEX HEX HEX HEX | '\U' HEX HEX HEX HEX HEX HEX HEX HEX
        // [159s] ECHAR  ::=  '\' [tbnrf"'\]
        match *data.get(1)? {
            b'u' => match Self::recognize_hex_char(&data[2..], 4, 'u', position) {
                Ok(c) => Some((5, Ok(c?))),
                Err(e) => Some((5, Err(e))),
            },
            b'U' => match Self::recognize_hex_char(&data[2..], 8, 'U', position) {
                Ok(c) => Some((9, Ok(c?))),
                Err(e) => Some((9, Err(e))),
            },
            b't' if with_echar => Some((1, Ok('\t'))),
            b'b' if with_echar => Some((1, Ok('\x08'))),
            b'n' if with_echar => Some((1, Ok('\n'))),
            b'r' if with_echar => Some((1, Ok('\r'))),
            b'f' if with_echar => Some((1, Ok('\x0C'))),
            b'"' if with_echar => Some((1, Ok('"'))),
            b'\'' if with_echar => Some((1, Ok('\''))),
            b'\\' if with_echar => Some((1, Ok('\\'))),
            c => Some((
                1,
                Err((
                    position..position + 2,
                    format!("Unexpected escape character '\\{}'", char::from(c)),
                )
                    .into()),
            )),
        }
    }

    fn recognize_hex_char(
        data: &[u8],
        len: usize,
        escape_char: char,
        position: usize,
    ) -> Result<Option<char>, TokenRecognizerError> {
        let Some(digits) = data.get(..len) else {
            return Ok(None);
        };
        let mut codepoint = 0;
        for (i, c) in digits.iter().enumerate() {
            let Some(digit) = char::from(*c).to_digit(16) else {
                let val = str::from_utf8(digits).unwrap_or_default();
                return Err((
                    position + i + 2..position + i + 3,
                    format!(
                        "The escape sequence '\\{escape_char}{val}' is not a valid hexadecimal string"
                    ),
                )
                    .into());
            };
            codepoint = codepoint * 16 + digit;
        }
        let c = char::from_u32(codepoint).ok_or_else(|| {
            let val = str::from_utf8(digits).unwrap_or_default();
            (
                position..position + len + 2,
                format!(
                    "The escape sequence '\\{escape_char}{val}' is encoding {codepoint:X} that is not a valid unicode character",
                ),
            )
        })?;
        Ok(Some(c))
    }

    fn recognize_unicode_char(
        data: &[u8],
        position: usize,
    ) -> Option<Result<(char, usize), TokenRecognizerError>> {
        let byte = *data.first()?;
        let len = match byte {
            0x00..=0x7F => return Some(Ok((char::from(byte), 1))),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => {
                return Some(Err(
                    (position..=position, "Invalid UTF-8 character encoding").into()
                ));
            }
        };
        let Some(bytes) = data.get(..len) else {
            return Some(Err((
                position..position + data.len(),
                "Invalid UTF-8 character encoding",
            )
                .into()));
        };
        Some(match str::from_utf8(bytes) {
            Ok(s) => s.chars().next().map(|c| (c, len)).ok_or_else(|| {
                (position..position + len, "Invalid UTF-8 character encoding").into()
            }),
            Err(_) => Err((position..position + len, "Invalid UTF-8 character encoding").into()),
        })
    }
}

fn count_digits(data: &[u8]) -> usize {
    data.iter().take_while(|c| c.is_ascii_digit()).count()
}

// [157s]  PN_CHARS_BASE  ::=  [A-Z] | [a-z] | [#x00C0-#x00D6] | [#x00D8-#x00F6] | [#x00F8-#x02FF] | [#x0370-#x037D] | [#x037F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
fn is_possible_pn_chars_base(c: char) -> bool {
    matches!(c,
    'A'..='Z'
    | 'a'..='z'
    | '\u{00C0}'..='\u{00D6}'
    | '\u{00D8}'..='\u{00F6}'
    | '\u{00F8}'..='\u{02FF}'
    | '\u{0370}'..='\u{037D}'
    | '\u{037F}'..='\u{1FFF}'
    | '\u{200C}'..='\u{200D}'
    | '\u{2070}'..='\u{218F}'
    | '\u{2C00}'..='\u{2FEF}'
    | '\u{3001}'..='\u{D7FF}'
    | '\u{F900}'..='\u{FDCF}'
    | '\u{FDF0}'..='\u{FFFD}'
    | '\u{10000}'..='\u{EFFFF}')
}

// [158s]  PN_CHARS_U  ::=  PN_CHARS_BASE | '_'
fn is_possible_pn_chars_u(c: char) -> bool {
    is_possible_pn_chars_base(c) || c == '_'
}

// [160s]  PN_CHARS  ::=  PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
fn is_possible_pn_chars(c: char) -> bool {
    is_possible_pn_chars_u(c)
        || matches!(c,
    '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

fn str_from_utf8(data: &[u8], range: Range<usize>) -> Result<&str, TokenRecognizerError> {
    str::from_utf8(data).map_err(|e| {
        (
            range.start + e.valid_up_to()..min(range.end, range.start + e.valid_up_to() + 4),
            format!("Invalid UTF-8: {e}"),
        )
            .into()
    })
}

fn string_from_utf8(data: Vec<u8>, range: Range<usize>) -> Result<String, TokenRecognizerError> {
    String::from_utf8(data).map_err(|e| {
        (
            range.start + e.utf8_error().valid_up_to()
                ..min(range.end, range.start + e.utf8_error().valid_up_to() + 4),
            format!("Invalid UTF-8: {e}"),
        )
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str, mode: LexerMode) -> Vec<TurtleToken<'_>> {
        tokenize(input, mode)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn turtle_tokens() {
        assert_eq!(
            tokens(
                "@prefix ex: <http://ex.com/> .\nex:s a ex:o ; ex:p \"v\"@en-GB , 1.5e0 . # end",
                LexerMode::Turtle
            ),
            [
                TurtleToken::LangTag("prefix"),
                TurtleToken::PrefixedName {
                    prefix: "ex",
                    local: Cow::Borrowed("")
                },
                TurtleToken::IriRef("http://ex.com/".into()),
                TurtleToken::Punctuation("."),
                TurtleToken::PrefixedName {
                    prefix: "ex",
                    local: Cow::Borrowed("s")
                },
                TurtleToken::PlainKeyword("a"),
                TurtleToken::PrefixedName {
                    prefix: "ex",
                    local: Cow::Borrowed("o")
                },
                TurtleToken::Punctuation(";"),
                TurtleToken::PrefixedName {
                    prefix: "ex",
                    local: Cow::Borrowed("p")
                },
                TurtleToken::String("v".into()),
                TurtleToken::LangTag("en-GB"),
                TurtleToken::Punctuation(","),
                TurtleToken::Double("1.5e0"),
                TurtleToken::Punctuation("."),
            ]
        );
    }

    #[test]
    fn numbers_and_trailing_dot() {
        assert_eq!(
            tokens("1 -2.5 3.", LexerMode::Turtle),
            [
                TurtleToken::Integer("1"),
                TurtleToken::Decimal("-2.5"),
                TurtleToken::Integer("3"),
                TurtleToken::Punctuation("."),
            ]
        );
    }

    #[test]
    fn local_name_trailing_dot_is_not_part_of_the_name() {
        assert_eq!(
            tokens("ex:a.b.", LexerMode::Turtle),
            [
                TurtleToken::PrefixedName {
                    prefix: "ex",
                    local: Cow::Borrowed("a.b")
                },
                TurtleToken::Punctuation("."),
            ]
        );
    }

    #[test]
    fn long_strings() {
        assert_eq!(
            tokens("'''a\n'b''' \"\"\"c\"\"\"\"", LexerMode::Turtle),
            [
                TurtleToken::LongString("a\n'b".into()),
                TurtleToken::LongString("c\"".into()),
            ]
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(
            tokens(r#"<http://ex.com/a> "\t\"""#, LexerMode::Line),
            [
                TurtleToken::IriRef("http://ex.com/a".into()),
                TurtleToken::String("\t\"".into()),
            ]
        );
    }

    #[test]
    fn rule_tokens() {
        assert_eq!(
            tokens("{ ?x a _:b } => { }", LexerMode::Rule),
            [
                TurtleToken::Punctuation("{"),
                TurtleToken::Variable(Cow::Borrowed("x")),
                TurtleToken::PlainKeyword("a"),
                TurtleToken::BlankNodeLabel("b"),
                TurtleToken::Punctuation("}"),
                TurtleToken::Punctuation("=>"),
                TurtleToken::Punctuation("{"),
                TurtleToken::Punctuation("}"),
            ]
        );
    }

    #[test]
    fn errors_are_all_reported() {
        let errors = tokenize("<http://ex.com/ a> \"a\\q\" ^", LexerMode::Turtle).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].location().unwrap().start.column, 15);
    }

    #[test]
    fn unterminated_string() {
        let errors = tokenize("<s> <p> \"abc", LexerMode::Line).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("Unexpected end of file"));
    }
}
