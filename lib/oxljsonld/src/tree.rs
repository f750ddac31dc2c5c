//! A JSON value tree built from [`json_event_parser`] events.
//!
//! Each value keeps the byte offset it starts at so that loader errors can point at it.

use json_event_parser::{JsonEvent, SliceJsonParser};
use oxlmodel::{Diagnostic, LoaderError, MAX_NESTING_DEPTH};

/// A JSON value and its position in the source document.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct JsonNode {
    pub value: JsonValue,
    /// The byte offset of the first character of the value.
    pub offset: usize,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum JsonValue {
    String(String),
    /// A number, kept in its lexical form.
    Number(String),
    Boolean(bool),
    Null,
    Array(Vec<JsonNode>),
    /// The object members in document order, duplicated keys included.
    Object(Vec<(String, JsonNode)>),
}

impl JsonNode {
    /// Parses a complete JSON document.
    ///
    /// ```
    /// use oxljsonld::tree::{JsonNode, JsonValue};
    ///
    /// let node = JsonNode::parse(r#"{"a": [1, "b"]}"#)?;
    /// let JsonValue::Array(items) = &node.member("a").unwrap().value else {
    ///     unreachable!()
    /// };
    /// assert_eq!(items[1].as_str(), Some("b"));
    /// assert_eq!(items[1].offset, 10);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, Diagnostic> {
        let mut parser = SliceJsonParser::new(input.as_bytes());
        let mut tokens = TokenOffsets::new(input.as_bytes());
        let mut stack = Vec::new();
        loop {
            let event = parser.parse_next().map_err(|e| {
                let location = e.location();
                Diagnostic::new(LoaderError::syntax(e.message())).in_source(
                    input,
                    to_usize(location.start.offset)..to_usize(location.end.offset),
                )
            })?;
            let new_value = match event {
                JsonEvent::String(value) => JsonValue::String(value.into()),
                JsonEvent::Number(value) => JsonValue::Number(value.into()),
                JsonEvent::Boolean(value) => JsonValue::Boolean(value),
                JsonEvent::Null => JsonValue::Null,
                JsonEvent::StartArray => {
                    let offset = nested_offset(input, &stack, &mut tokens)?;
                    stack.push(Building::Array(Vec::new(), offset));
                    continue;
                }
                JsonEvent::StartObject => {
                    let offset = nested_offset(input, &stack, &mut tokens)?;
                    stack.push(Building::Object(Vec::new(), offset));
                    continue;
                }
                JsonEvent::ObjectKey(key) => {
                    tokens.next_token();
                    if let Some(Building::Object(members, offset)) = stack.pop() {
                        stack.push(Building::ObjectWithPendingKey(members, offset, key.into()));
                    }
                    continue;
                }
                JsonEvent::EndArray | JsonEvent::EndObject => {
                    tokens.next_token();
                    let Some(building) = stack.pop() else {
                        return Err(unbalanced(input, tokens.position));
                    };
                    let node = match building {
                        Building::Array(items, offset) => JsonNode {
                            value: JsonValue::Array(items),
                            offset,
                        },
                        Building::Object(members, offset)
                        | Building::ObjectWithPendingKey(members, offset, _) => JsonNode {
                            value: JsonValue::Object(members),
                            offset,
                        },
                    };
                    if let Some(root) = after_node(&mut stack, node) {
                        return Ok(root);
                    }
                    continue;
                }
                JsonEvent::Eof => return Err(unbalanced(input, tokens.position)),
            };
            let node = JsonNode {
                value: new_value,
                offset: tokens.next_token(),
            };
            if let Some(root) = after_node(&mut stack, node) {
                return Ok(root);
            }
        }
    }

    /// The string value if this node is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        if let JsonValue::String(value) = &self.value {
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value == JsonValue::Null
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self.value, JsonValue::Object(_))
    }

    /// The members of an object, nothing for other values.
    #[inline]
    pub fn members(&self) -> &[(String, JsonNode)] {
        if let JsonValue::Object(members) = &self.value {
            members
        } else {
            &[]
        }
    }

    /// The value of the first member named `key`.
    pub fn member(&self, key: &str) -> Option<&JsonNode> {
        self.members()
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// The name of the kind of value, for error messages.
    pub fn kind(&self) -> &'static str {
        match self.value {
            JsonValue::String(_) => "a string",
            JsonValue::Number(_) => "a number",
            JsonValue::Boolean(_) => "a boolean",
            JsonValue::Null => "null",
            JsonValue::Array(_) => "an array",
            JsonValue::Object(_) => "an object",
        }
    }
}

enum Building {
    Object(Vec<(String, JsonNode)>, usize),
    ObjectWithPendingKey(Vec<(String, JsonNode)>, usize, String),
    Array(Vec<JsonNode>, usize),
}

fn after_node(stack: &mut Vec<Building>, node: JsonNode) -> Option<JsonNode> {
    match stack.pop() {
        Some(Building::ObjectWithPendingKey(mut members, offset, key)) => {
            members.push((key, node));
            stack.push(Building::Object(members, offset));
            None
        }
        Some(Building::Array(mut items, offset)) => {
            items.push(node);
            stack.push(Building::Array(items, offset));
            None
        }
        Some(building @ Building::Object(..)) => {
            stack.push(building);
            None
        }
        None => Some(node),
    }
}

/// The offset of an array or object start, if it does not nest too deep.
fn nested_offset(
    input: &str,
    stack: &[Building],
    tokens: &mut TokenOffsets<'_>,
) -> Result<usize, Diagnostic> {
    let offset = tokens.next_token();
    if stack.len() >= MAX_NESTING_DEPTH {
        return Err(Diagnostic::new(LoaderError::too_deep("arrays and objects"))
            .in_source(input, offset..offset));
    }
    Ok(offset)
}

fn unbalanced(input: &str, offset: usize) -> Diagnostic {
    Diagnostic::new(LoaderError::syntax("Unexpected end of the JSON document"))
        .in_source(input, offset..offset)
}

/// Walks the tokens of an already validated JSON document to give back their offsets.
///
/// Every parser event but `Eof` matches exactly one token that is not `,` or `:`.
struct TokenOffsets<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> TokenOffsets<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: if input.starts_with(b"\xEF\xBB\xBF") { 3 } else { 0 },
        }
    }

    /// Moves after the next token and returns its start offset.
    fn next_token(&mut self) -> usize {
        while self
            .input
            .get(self.position)
            .is_some_and(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b':'))
        {
            self.position += 1;
        }
        let start = self.position;
        match self.input.get(start) {
            Some(b'"') => {
                self.position += 1;
                while let Some(b) = self.input.get(self.position) {
                    self.position += 1;
                    match b {
                        b'\\' => self.position += 1,
                        b'"' => break,
                        _ => (),
                    }
                }
            }
            Some(b'{' | b'}' | b'[' | b']') => self.position += 1,
            Some(_) => {
                while self.input.get(self.position).is_some_and(|b| {
                    !matches!(
                        b,
                        b' ' | b'\t' | b'\n' | b'\r' | b',' | b':' | b'}' | b']'
                    )
                }) {
                    self.position += 1;
                }
            }
            None => (),
        }
        start
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
