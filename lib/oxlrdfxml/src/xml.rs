//! An XML element tree with its namespaces, `xml:base` and `xml:lang` already applied.

use oxlmodel::uri::{parse, resolve_relative};
use oxlmodel::{Diagnostic, LoaderError, MAX_NESTING_DEPTH};
use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{LocalName, Namespace, ResolveResult};
use std::ops::Range;
use std::str;

/// An XML element.
///
/// Names are expanded: a name in a namespace is the concatenation of the namespace IRI and
/// of the local name, a name outside of any namespace is the bare local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// The attributes without the namespace declarations and the `xml:` attributes.
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlContent>,
    /// The base IRI in scope, fragment removed.
    pub base: String,
    /// The `xml:lang` value in scope, `None` if unset or reset with `xml:lang=""`.
    pub language: Option<String>,
    /// Byte offset of the start tag.
    pub offset: usize,
    /// Byte range of the content between the start and the end tags.
    pub content: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlContent {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    /// Parses a whole XML document and returns its root element.
    ///
    /// `base` is the base IRI of the document, usually its IRI.
    ///
    /// ```
    /// use oxlrdfxml::xml::XmlElement;
    ///
    /// let root = XmlElement::parse(
    ///     "<ex:a xmlns:ex='http://example.com/' xml:lang='en'><ex:b ex:c='d'>e</ex:b></ex:a>",
    ///     "http://example.com/doc",
    /// )?;
    /// assert_eq!(root.name, "http://example.com/a");
    /// let child = root.elements().next().unwrap();
    /// assert_eq!(child.attribute("http://example.com/c"), Some("d"));
    /// assert_eq!(child.text(), "e");
    /// assert_eq!(child.language.as_deref(), Some("en"));
    /// # Result::<_, oxlmodel::Diagnostic>::Ok(())
    /// ```
    pub fn parse(input: &str, base: &str) -> Result<Self, Diagnostic> {
        let mut reader = NsReader::from_str(input);
        reader.config_mut().expand_empty_elements = true;
        let mut stack: Vec<Self> = Vec::new();
        let mut root = None;
        loop {
            let offset = to_usize(reader.buffer_position());
            let event = reader.read_event().map_err(|e| {
                let position = to_usize(reader.error_position());
                syntax_error(input, position, e.to_string())
            })?;
            match event {
                Event::Start(start) => {
                    if stack.len() >= MAX_NESTING_DEPTH {
                        return Err(Diagnostic::new(LoaderError::too_deep("XML elements"))
                            .in_source(input, offset..offset));
                    }
                    let (mut base, mut language) = stack.last().map_or_else(
                        || (strip_fragment(base), None),
                        |parent| (parent.base.clone(), parent.language.clone()),
                    );
                    let mut attributes = Vec::new();
                    for attribute in start.attributes() {
                        let attribute = attribute
                            .map_err(|e| syntax_error(input, offset, e.to_string()))?;
                        if attribute.key.as_namespace_binding().is_some() {
                            continue;
                        }
                        let value = attribute
                            .unescape_value()
                            .map_err(|e| syntax_error(input, offset, e.to_string()))?
                            .into_owned();
                        match attribute.key.as_ref() {
                            b"xml:lang" => language = (!value.is_empty()).then_some(value),
                            b"xml:base" => {
                                base = resolve_relative(&base, &value)
                                    .map(|iri| strip_fragment(&iri))
                                    .map_err(|e| Diagnostic::new(e).in_source(input, offset..offset))?;
                            }
                            key if key.starts_with(b"xml:") => (),
                            _ => {
                                let (namespace, local_name) =
                                    reader.resolve_attribute(attribute.key);
                                attributes.push(XmlAttribute {
                                    name: expand_name(namespace, local_name)
                                        .map_err(|e| Diagnostic::new(e).in_source(input, offset..offset))?,
                                    value,
                                });
                            }
                        }
                    }
                    let (namespace, local_name) = reader.resolve_element(start.name());
                    let name = expand_name(namespace, local_name)
                        .map_err(|e| Diagnostic::new(e).in_source(input, offset..offset))?;
                    let content_start = to_usize(reader.buffer_position());
                    stack.push(Self {
                        name,
                        attributes,
                        children: Vec::new(),
                        base,
                        language,
                        offset,
                        content: content_start..content_start,
                    });
                }
                Event::End(_) => {
                    let Some(mut element) = stack.pop() else {
                        return Err(syntax_error(input, offset, "Unexpected closing tag"));
                    };
                    element.content.end = offset;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlContent::Element(element));
                    } else if root.is_some() {
                        return Err(syntax_error(
                            input,
                            element.offset,
                            "The document has more than one root element",
                        ));
                    } else {
                        root = Some(element);
                    }
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| syntax_error(input, offset, e.to_string()))?;
                    push_text(&mut stack, text.into_owned(), input, offset)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8(data.into_inner().into_owned())
                        .map_err(|e| syntax_error(input, offset, e.to_string()))?;
                    push_text(&mut stack, text, input, offset)?;
                }
                Event::Eof => break,
                _ => (),
            }
        }
        root.ok_or_else(|| syntax_error(input, input.len(), "The document has no root element"))
    }

    /// The child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            XmlContent::Element(element) => Some(element),
            XmlContent::Text(_) => None,
        })
    }

    /// The concatenation of the text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlContent::Text(text) => Some(text.as_str()),
                XmlContent::Element(_) => None,
            })
            .collect()
    }

    /// Returns if the element has some text that is not only made of whitespaces.
    pub fn has_significant_text(&self) -> bool {
        self.children.iter().any(
            |child| matches!(child, XmlContent::Text(text) if !text.trim_matches(is_xml_whitespace).is_empty()),
        )
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }
}

fn push_text(
    stack: &mut [XmlElement],
    text: String,
    input: &str,
    offset: usize,
) -> Result<(), Diagnostic> {
    if let Some(parent) = stack.last_mut() {
        if let Some(XmlContent::Text(previous)) = parent.children.last_mut() {
            previous.push_str(&text);
        } else {
            parent.children.push(XmlContent::Text(text));
        }
    } else if !text.trim_matches(is_xml_whitespace).is_empty() {
        return Err(syntax_error(
            input,
            offset,
            "Unexpected text outside of the root element",
        ));
    }
    Ok(())
}

fn expand_name(namespace: ResolveResult<'_>, local_name: LocalName<'_>) -> Result<String, LoaderError> {
    let local_name = str::from_utf8(local_name.as_ref())
        .map_err(|_| LoaderError::syntax("XML names must be valid UTF-8"))?;
    match namespace {
        ResolveResult::Bound(Namespace(namespace)) => {
            let namespace = str::from_utf8(namespace)
                .map_err(|_| LoaderError::syntax("XML namespaces must be valid UTF-8"))?;
            Ok(format!("{namespace}{local_name}"))
        }
        ResolveResult::Unbound => Ok(local_name.into()),
        ResolveResult::Unknown(prefix) => Err(LoaderError::UnresolvableReference(format!(
            "The namespace prefix {}: has not been declared",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

/// Removes the fragment of a base IRI.
fn strip_fragment(iri: &str) -> String {
    match parse(iri) {
        Ok(mut components) => {
            components.fragment = None;
            components.recompose()
        }
        Err(_) => iri.split('#').next().unwrap_or(iri).into(),
    }
}

fn syntax_error(input: &str, offset: usize, message: impl Into<String>) -> Diagnostic {
    Diagnostic::new(LoaderError::syntax(message)).in_source(input, offset..offset)
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

pub(crate) fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Returns if `name` is an [XML NCName](https://www.w3.org/TR/xml-names/#NT-NCName).
pub fn is_nc_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c != ':' && is_name_start_char(c))
        && chars.all(|c| c != ':' && is_name_char(c))
}

// [4] NameStartChar ::= ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

// [4a] NameChar ::= NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c, '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}
