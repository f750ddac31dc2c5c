//! Unescaping of the lexical forms shared by the Turtle family and OWL functional syntaxes.

/// Decodes the `\t \b \n \r \f \" \' \\` escapes and the `\uXXXX` and `\UXXXXXXXX` numeric escapes.
///
/// Returns the byte offset and a message when an escape is invalid.
///
/// ```
/// use oxlmodel::escape::unescape_string;
///
/// assert_eq!(unescape_string(r"a\tbé").unwrap(), "a\tbé");
/// assert!(unescape_string(r"a\q").is_err());
/// ```
pub fn unescape_string(value: &str) -> Result<String, (usize, String)> {
    unescape(value, true)
}

/// Decodes the `\uXXXX` and `\UXXXXXXXX` escapes allowed inside of IRI references.
pub fn unescape_iri(value: &str) -> Result<String, (usize, String)> {
    unescape(value, false)
}

/// Decodes the `\` escapes of prefixed name local parts, e.g. `ex:a\.b` local part is `a.b`.
pub fn unescape_local_name(value: &str) -> String {
    if !value.contains('\\') {
        return value.into();
    }
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn unescape(value: &str, allow_character_escapes: bool) -> Result<String, (usize, String)> {
    if !value.contains('\\') {
        return Ok(value.into());
    }
    let mut result = String::with_capacity(value.len());
    let mut chars = value.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            return Err((i, "Unterminated escape sequence".into()));
        };
        match escape {
            'u' => result.push(read_hex_char(&mut chars, 4, i)?),
            'U' => result.push(read_hex_char(&mut chars, 8, i)?),
            't' if allow_character_escapes => result.push('\t'),
            'b' if allow_character_escapes => result.push('\u{8}'),
            'n' if allow_character_escapes => result.push('\n'),
            'r' if allow_character_escapes => result.push('\r'),
            'f' if allow_character_escapes => result.push('\u{C}'),
            '"' | '\'' | '\\' if allow_character_escapes => result.push(escape),
            c => return Err((i, format!("Unexpected escape character '\\{c}'"))),
        }
    }
    Ok(result)
}

fn read_hex_char(
    chars: &mut impl Iterator<Item = (usize, char)>,
    len: usize,
    position: usize,
) -> Result<char, (usize, String)> {
    let mut code_point = 0;
    for _ in 0..len {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| {
                (
                    position,
                    format!("The escape sequence must have {len} hexadecimal digits"),
                )
            })?;
        code_point = code_point * 16 + digit;
    }
    char::from_u32(code_point).ok_or_else(|| {
        (
            position,
            format!("The escaped code point {code_point:X} is not a valid character"),
        )
    })
}
