//! The JSON-LD active context, as a stack of immutable frames.
//!
//! Each `@context` value met during a load pushes new frames in a [`ContextStack`] arena and
//! gets back a [`ContextId`]. Frames are never changed once built: an inner object only
//! shadows the frames of its ancestors.

use crate::tree::{JsonNode, JsonValue};
use oxlmodel::uri::{is_absolute, resolve_relative};
use oxlmodel::{Diagnostic, LoaderError};
use rustc_hash::{FxHashMap, FxHashSet};
use std::rc::Rc;
use std::sync::Arc;
use std::{fmt, iter, mem};
use tracing::{debug, warn};

/// Gives access to the remote documents a `@context` may refer to by IRI.
pub trait ContextFetcher {
    /// Returns the content of the document at `iri`, or `None` if it is not available.
    fn fetch(&self, iri: &str) -> Option<String>;
}

impl<T: ContextFetcher + ?Sized> ContextFetcher for Arc<T> {
    #[inline]
    fn fetch(&self, iri: &str) -> Option<String> {
        (**self).fetch(iri)
    }
}

/// A [`ContextFetcher`] that never finds anything: remote contexts contribute no definition.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoContextFetcher;

impl ContextFetcher for NoContextFetcher {
    #[inline]
    fn fetch(&self, _: &str) -> Option<String> {
        None
    }
}

/// A [`ContextFetcher`] serving documents registered in memory.
///
/// ```
/// use oxljsonld::{ContextFetcher, StaticContextFetcher};
///
/// let fetcher = StaticContextFetcher::new().with_document(
///     "http://example.com/context.jsonld",
///     r#"{"@context": {"name": "http://schema.org/name"}}"#,
/// );
/// assert!(fetcher.fetch("http://example.com/context.jsonld").is_some());
/// assert!(fetcher.fetch("http://example.com/other.jsonld").is_none());
/// ```
#[derive(Debug, Default, Clone)]
#[must_use]
pub struct StaticContextFetcher {
    documents: FxHashMap<String, String>,
}

impl StaticContextFetcher {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the content of the document at `iri`.
    #[inline]
    pub fn with_document(mut self, iri: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(iri.into(), content.into());
        self
    }
}

impl ContextFetcher for StaticContextFetcher {
    fn fetch(&self, iri: &str) -> Option<String> {
        self.documents.get(iri).cloned()
    }
}

/// Identifies a context built by a [`ContextStack`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct ContextId(usize);

/// The value of `@language`, `@base` or `@vocab` in one frame.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub enum Setting {
    /// Not set by the frame, ancestors are looked at.
    #[default]
    Unset,
    /// Explicitly set to `null`, hiding the values of the ancestors.
    Reset,
    Value(String),
}

impl Setting {
    /// The value, if the setting has one.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        if let Self::Value(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

/// What a term maps to in a frame.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TermMapping {
    /// The term is mapped to `null`: it must not be expanded.
    Forbidden,
    Iri(String),
}

/// The `@container` of a term definition.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ContainerType {
    List,
    Set,
    Index,
    Language,
    /// Any other value, treated as no container.
    Undefined,
}

/// What the active context knows about a term.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct TermInfo {
    /// The expanded IRI of the term.
    pub full_iri: Option<String>,
    pub container: Option<ContainerType>,
    /// The datatype IRI the values are coerced to, or `@id` or `@vocab`.
    pub value_type: Option<String>,
    pub language: Setting,
    /// The expanded IRI of the property this term is the reverse of.
    pub reversed: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct TermAttributes {
    value_type: Option<String>,
    container: Option<ContainerType>,
    language: Setting,
    reverse: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Frame {
    parent: Option<ContextId>,
    language: Setting,
    base: Setting,
    vocab: Setting,
    mappings: FxHashMap<String, TermMapping>,
    attributes: FxHashMap<String, TermAttributes>,
}

struct RemoteContext {
    source: String,
    definition: JsonNode,
}

/// The contexts of one document load.
///
/// ```
/// use oxljsonld::tree::JsonNode;
/// use oxljsonld::{ContextStack, NoContextFetcher};
///
/// let mut contexts = ContextStack::new("http://example.com/doc", &NoContextFetcher);
/// let definition = r#"{"schema": "http://schema.org/", "name": "schema:name"}"#;
/// let context = contexts.build(contexts.root(), &JsonNode::parse(definition)?, definition)?;
/// assert_eq!(
///     contexts.expand_iri(context, "name", true).as_deref(),
///     Some("http://schema.org/name")
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct ContextStack<'a> {
    frames: Vec<Frame>,
    resource: String,
    fetcher: &'a dyn ContextFetcher,
    remote: FxHashMap<String, Option<Rc<RemoteContext>>>,
    including: Vec<String>,
}

impl<'a> ContextStack<'a> {
    /// Creates a stack with an empty root context.
    ///
    /// `resource` is the IRI relative IRIs fall back to and remote context IRIs are resolved against.
    pub fn new(resource: impl Into<String>, fetcher: &'a dyn ContextFetcher) -> Self {
        Self {
            frames: vec![Frame::default()],
            resource: resource.into(),
            fetcher,
            remote: FxHashMap::default(),
            including: Vec::new(),
        }
    }

    /// The empty context the loads start from.
    #[inline]
    pub fn root(&self) -> ContextId {
        ContextId(0)
    }

    /// The context a context has been built on, `None` for the root and after a `null` reset.
    #[inline]
    pub fn parent(&self, context: ContextId) -> Option<ContextId> {
        self.frames.get(context.0).and_then(|f| f.parent)
    }

    /// Builds the context defined by a `@context` value on top of `parent`.
    ///
    /// `source` is the text `definition` has been parsed from.
    pub fn build(
        &mut self,
        parent: ContextId,
        definition: &JsonNode,
        source: &str,
    ) -> Result<ContextId, Diagnostic> {
        match &definition.value {
            JsonValue::Null => Ok(self.push(Frame::default())),
            JsonValue::String(iri) => {
                let iri = resolve_relative(&self.resource, iri).map_err(|e| {
                    Diagnostic::new(e).in_source(source, definition.offset..definition.offset)
                })?;
                if self.including.contains(&iri) {
                    return Err(invalid(
                        format!("recursive inclusion of the context {iri}"),
                        definition,
                        source,
                    ));
                }
                let Some(remote) = self.fetch_remote(&iri)? else {
                    return Ok(parent);
                };
                self.including.push(iri);
                let built = self.build(parent, &remote.definition, &remote.source);
                self.including.pop();
                built
            }
            JsonValue::Array(definitions) => definitions
                .iter()
                .try_fold(parent, |current, definition| {
                    self.build(current, definition, source)
                }),
            JsonValue::Object(members) => {
                let frame = self.load_frame(parent, members, source)?;
                Ok(self.push(frame))
            }
            _ => Err(invalid(
                format!(
                    "a context must be null, an IRI, an array or an object, found {}",
                    definition.kind()
                ),
                definition,
                source,
            )),
        }
    }

    fn push(&mut self, frame: Frame) -> ContextId {
        self.frames.push(frame);
        ContextId(self.frames.len() - 1)
    }

    fn fetch_remote(&mut self, iri: &str) -> Result<Option<Rc<RemoteContext>>, Diagnostic> {
        if let Some(remote) = self.remote.get(iri) {
            return Ok(remote.clone());
        }
        let remote = match self.fetcher.fetch(iri) {
            Some(source) => {
                let document = JsonNode::parse(&source).map_err(|e| {
                    Diagnostic::new(LoaderError::InvalidContext(format!(
                        "the remote context {iri} is not valid JSON: {}",
                        e.error()
                    )))
                })?;
                debug!("Fetched the remote context {iri}");
                document.member("@context").cloned().map(|definition| {
                    Rc::new(RemoteContext { source, definition })
                })
            }
            None => {
                warn!("The remote context {iri} is not available, it is ignored");
                None
            }
        };
        self.remote.insert(iri.into(), remote.clone());
        Ok(remote)
    }

    fn load_frame(
        &self,
        parent: ContextId,
        members: &[(String, JsonNode)],
        source: &str,
    ) -> Result<Frame, Diagnostic> {
        let mut frame = Frame {
            parent: Some(parent),
            ..Frame::default()
        };
        for (key, value) in members {
            match key.as_str() {
                "@language" => frame.language = setting(value, source)?,
                "@base" => frame.base = setting(value, source)?,
                "@vocab" => frame.vocab = setting(value, source)?,
                _ if is_keyword(key) => (),
                _ => match &value.value {
                    JsonValue::String(iri) => {
                        frame
                            .mappings
                            .insert(key.clone(), TermMapping::Iri(iri.clone()));
                    }
                    JsonValue::Null => {
                        frame.mappings.insert(key.clone(), TermMapping::Forbidden);
                    }
                    JsonValue::Object(definition) => {
                        let (mapping, attributes) = term_definition(key, definition, source)?;
                        if let Some(mapping) = mapping {
                            frame.mappings.insert(key.clone(), mapping);
                        }
                        frame.attributes.insert(key.clone(), attributes);
                    }
                    _ => {
                        return Err(invalid(
                            format!("Unexpected name definition for {key}"),
                            value,
                            source,
                        ));
                    }
                },
            }
        }
        Ok(frame)
    }

    /// The frames of a context, closest first.
    fn frames(&self, context: ContextId) -> impl Iterator<Item = &Frame> {
        iter::successors(self.frames.get(context.0), |frame| {
            frame.parent.and_then(|p| self.frames.get(p.0))
        })
    }

    fn lookup(&self, context: ContextId, term: &str) -> Option<&TermMapping> {
        self.frames(context).find_map(|f| f.mappings.get(term))
    }

    /// Expands a term, a compact IRI or a relative IRI into an IRI.
    ///
    /// The expansion is repeated until it reaches a fixed point, a term cycle stops it.
    /// `None` is returned if the resolution of a relative IRI fails.
    ///
    /// ```
    /// use oxljsonld::tree::JsonNode;
    /// use oxljsonld::{ContextStack, NoContextFetcher};
    ///
    /// let mut contexts = ContextStack::new("http://example.com/doc", &NoContextFetcher);
    /// let definition = r#"{"@vocab": "http://schema.org/", "a": "b", "b": "a"}"#;
    /// let context = contexts.build(contexts.root(), &JsonNode::parse(definition)?, definition)?;
    /// assert_eq!(
    ///     contexts.expand_iri(context, "name", true).as_deref(),
    ///     Some("http://schema.org/name")
    /// );
    /// assert_eq!(
    ///     contexts.expand_iri(context, "name", false).as_deref(),
    ///     Some("http://example.com/name")
    /// );
    /// assert!(contexts.expand_iri(context, "a", true).is_some());
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn expand_iri(&self, context: ContextId, term: &str, use_vocab: bool) -> Option<String> {
        let mut visited = FxHashSet::default();
        let mut current = term.to_owned();
        loop {
            let next = self.expand_once(context, &current, use_vocab)?;
            if next == current || visited.contains(&next) {
                return Some(next);
            }
            visited.insert(mem::replace(&mut current, next));
        }
    }

    fn expand_once(&self, context: ContextId, term: &str, use_vocab: bool) -> Option<String> {
        if term.starts_with("_:") || is_keyword(term) {
            return Some(term.into());
        }
        // compact IRI, the leftmost known prefix wins
        for (i, _) in term.match_indices(':') {
            let (prefix, suffix) = (&term[..i], &term[i + 1..]);
            if suffix.starts_with("//") {
                continue;
            }
            if let Some(TermMapping::Iri(namespace)) = self.lookup(context, prefix) {
                if namespace != prefix {
                    return Some(format!("{namespace}{suffix}"));
                }
            }
        }
        match self.lookup(context, term) {
            Some(TermMapping::Forbidden) => return Some(term.into()),
            Some(TermMapping::Iri(iri)) => return Some(iri.clone()),
            None => (),
        }
        if is_absolute(term) {
            return Some(term.into());
        }
        for frame in self.frames(context) {
            match &frame.base {
                Setting::Value(base) => return resolve_relative(base, term).ok(),
                Setting::Reset => return Some(term.into()),
                Setting::Unset => (),
            }
        }
        if use_vocab {
            for frame in self.frames(context) {
                match &frame.vocab {
                    Setting::Value(vocab) => return Some(format!("{vocab}{term}")),
                    Setting::Reset => break,
                    Setting::Unset => (),
                }
            }
        }
        resolve_relative(&self.resource, term).ok()
    }

    /// Gathers what the context knows about a term.
    ///
    /// Each attribute is taken from the closest frame defining it, either for the term itself
    /// or for its expanded IRI.
    pub fn get_info(&self, context: ContextId, term: &str) -> TermInfo {
        let full_iri = self.expand_iri(context, term, true);
        let mut info = TermInfo::default();
        for frame in self.frames(context) {
            let keys = iter::once(term).chain(full_iri.as_deref().filter(|iri| *iri != term));
            for key in keys {
                let Some(attributes) = frame.attributes.get(key) else {
                    continue;
                };
                if info.value_type.is_none() {
                    info.value_type.clone_from(&attributes.value_type);
                }
                if info.container.is_none() {
                    info.container = attributes.container;
                }
                if info.language == Setting::Unset {
                    info.language = attributes.language.clone();
                }
                if info.reversed.is_none() {
                    info.reversed.clone_from(&attributes.reverse);
                }
            }
        }
        info.value_type = info.value_type.take().and_then(|value_type| {
            if value_type == "@id" || value_type == "@vocab" {
                Some(value_type)
            } else {
                self.expand_iri(context, &value_type, true)
            }
        });
        info.reversed = info
            .reversed
            .take()
            .and_then(|reversed| self.expand_iri(context, &reversed, true));
        info.full_iri = full_iri;
        info
    }

    /// The default language of the context, if any.
    pub fn current_language(&self, context: ContextId) -> Option<&str> {
        self.frames(context)
            .find(|f| f.language != Setting::Unset)
            .and_then(|f| f.language.value())
    }
}

impl fmt::Debug for ContextStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextStack")
            .field("frames", &self.frames)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

fn term_definition(
    term: &str,
    definition: &[(String, JsonNode)],
    source: &str,
) -> Result<(Option<TermMapping>, TermAttributes), Diagnostic> {
    let mut mapping = None;
    let mut attributes = TermAttributes::default();
    for (key, value) in definition {
        match key.as_str() {
            "@id" => {
                mapping = Some(match &value.value {
                    JsonValue::String(iri) => TermMapping::Iri(iri.clone()),
                    JsonValue::Null => TermMapping::Forbidden,
                    _ => return Err(invalid(format!("invalid @id of {term}"), value, source)),
                });
            }
            "@type" => attributes.value_type = Some(string(value, "@type", source)?.into()),
            "@reverse" => attributes.reverse = Some(string(value, "@reverse", source)?.into()),
            "@language" => attributes.language = setting(value, source)?,
            "@container" => {
                attributes.container = Some(match string(value, "@container", source)? {
                    "@list" => ContainerType::List,
                    "@set" => ContainerType::Set,
                    "@index" => ContainerType::Index,
                    "@language" => ContainerType::Language,
                    other => {
                        warn!("Unsupported container {other} for {term}, it is ignored");
                        ContainerType::Undefined
                    }
                });
            }
            _ => (),
        }
    }
    Ok((mapping, attributes))
}

fn setting(value: &JsonNode, source: &str) -> Result<Setting, Diagnostic> {
    match &value.value {
        JsonValue::String(value) => Ok(Setting::Value(value.clone())),
        JsonValue::Null => Ok(Setting::Reset),
        _ => Err(invalid(
            format!("expected a string or null, found {}", value.kind()),
            value,
            source,
        )),
    }
}

fn string<'a>(value: &'a JsonNode, key: &str, source: &str) -> Result<&'a str, Diagnostic> {
    value.as_str().ok_or_else(|| {
        invalid(
            format!("the value of {key} must be a string, found {}", value.kind()),
            value,
            source,
        )
    })
}

fn invalid(message: String, node: &JsonNode, source: &str) -> Diagnostic {
    Diagnostic::new(LoaderError::InvalidContext(message)).in_source(source, node.offset..node.offset)
}

/// The JSON-LD keywords, never expanded.
pub(crate) fn is_keyword(value: &str) -> bool {
    matches!(
        value,
        "@base"
            | "@container"
            | "@context"
            | "@graph"
            | "@id"
            | "@index"
            | "@language"
            | "@list"
            | "@reverse"
            | "@set"
            | "@type"
            | "@value"
            | "@vocab"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "http://example.com/dir/doc";

    fn build(
        contexts: &mut ContextStack<'_>,
        parent: ContextId,
        definition: &str,
    ) -> Result<ContextId, Diagnostic> {
        contexts.build(parent, &JsonNode::parse(definition)?, definition)
    }

    #[test]
    fn unknown_term_resolves_against_the_resource() {
        let contexts = ContextStack::new(DOC, &NoContextFetcher);
        assert_eq!(
            contexts.expand_iri(contexts.root(), "foo", true).as_deref(),
            Some("http://example.com/dir/foo")
        );
        assert_eq!(
            contexts
                .expand_iri(contexts.root(), "http://other.com/x", true)
                .as_deref(),
            Some("http://other.com/x")
        );
    }

    #[test]
    fn expansion_reaches_a_fixed_point() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let context = build(
            &mut contexts,
            root,
            r#"{"ex": "http://ex.com/", "name": "ex:name", "label": "name", "a": "b", "b": "a"}"#,
        )
        .unwrap();
        assert_eq!(
            contexts.expand_iri(context, "label", true).as_deref(),
            Some("http://ex.com/name")
        );
        let cycle = contexts.expand_iri(context, "a", true).unwrap();
        assert!(cycle == "a" || cycle == "b");
    }

    #[test]
    fn null_mapping_shadows_the_parent() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let parent = build(&mut contexts, root, r#"{"ex": "http://x.com/"}"#).unwrap();
        let child = build(&mut contexts, parent, r#"{"ex": null}"#).unwrap();
        assert_eq!(
            contexts.expand_iri(parent, "ex", true).as_deref(),
            Some("http://x.com/")
        );
        assert_eq!(contexts.expand_iri(child, "ex", true).as_deref(), Some("ex"));
        assert_eq!(
            contexts.expand_iri(child, "ex:a", true).as_deref(),
            Some("ex:a")
        );
    }

    #[test]
    fn null_language_resets_the_parent() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let parent = build(&mut contexts, root, r#"{"@language": "en"}"#).unwrap();
        let middle = build(&mut contexts, parent, r#"{"ex": "http://x.com/"}"#).unwrap();
        let child = build(&mut contexts, middle, r#"{"@language": null}"#).unwrap();
        assert_eq!(contexts.current_language(middle), Some("en"));
        assert_eq!(contexts.current_language(child), None);
    }

    #[test]
    fn leftmost_prefix_wins() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let context = build(
            &mut contexts,
            root,
            r#"{"a": "http://a.com/", "a:b": "http://ab.com/"}"#,
        )
        .unwrap();
        assert_eq!(
            contexts.expand_iri(context, "a:b:c", true).as_deref(),
            Some("http://a.com/b:c")
        );
        assert_eq!(
            contexts.expand_iri(context, "http://a.com/x", true).as_deref(),
            Some("http://a.com/x")
        );
    }

    #[test]
    fn base_is_used_before_vocab() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let vocab = build(
            &mut contexts,
            root,
            r#"{"@vocab": "http://schema.org/"}"#,
        )
        .unwrap();
        let based = build(&mut contexts, vocab, r#"{"@base": "http://base.com/"}"#).unwrap();
        assert_eq!(
            contexts.expand_iri(vocab, "name", true).as_deref(),
            Some("http://schema.org/name")
        );
        assert_eq!(
            contexts.expand_iri(based, "name", true).as_deref(),
            Some("http://base.com/name")
        );
        let no_base = build(&mut contexts, based, r#"{"@base": null}"#).unwrap();
        assert_eq!(
            contexts.expand_iri(no_base, "name", true).as_deref(),
            Some("name")
        );
    }

    #[test]
    fn null_context_is_a_hard_reset() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let parent = build(
            &mut contexts,
            root,
            r#"{"name": "http://schema.org/name", "@language": "fr"}"#,
        )
        .unwrap();
        let reset = build(&mut contexts, parent, "null").unwrap();
        assert_eq!(contexts.parent(reset), None);
        assert_eq!(contexts.current_language(reset), None);
        assert_eq!(
            contexts.expand_iri(reset, "name", true).as_deref(),
            Some("http://example.com/dir/name")
        );
    }

    #[test]
    fn arrays_are_folded_in_order() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let context = build(
            &mut contexts,
            root,
            r#"[{"p": "http://a.com/p"}, null, {"q": "http://b.com/q"}, {"p": "http://c.com/p"}]"#,
        )
        .unwrap();
        assert_eq!(
            contexts.expand_iri(context, "p", true).as_deref(),
            Some("http://c.com/p")
        );
        assert_eq!(
            contexts.expand_iri(context, "q", true).as_deref(),
            Some("http://b.com/q")
        );
    }

    #[test]
    fn term_attributes() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        let parent = build(
            &mut contexts,
            root,
            r#"{
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "age": {"@id": "http://schema.org/age", "@type": "xsd:integer", "@container": "@set"},
                "knows": {"@id": "http://schema.org/knows", "@type": "@id"},
                "parent": {"@reverse": "http://schema.org/children"},
                "tags": {"@id": "http://schema.org/tags", "@container": "@unknown"}
            }"#,
        )
        .unwrap();
        let child = build(
            &mut contexts,
            parent,
            r#"{"age": {"@container": "@list", "@language": "en"}}"#,
        )
        .unwrap();
        let info = contexts.get_info(child, "age");
        assert_eq!(info.full_iri.as_deref(), Some("http://schema.org/age"));
        assert_eq!(info.container, Some(ContainerType::List));
        assert_eq!(
            info.value_type.as_deref(),
            Some("http://www.w3.org/2001/XMLSchema#integer")
        );
        assert_eq!(info.language, Setting::Value("en".into()));
        assert_eq!(
            contexts.get_info(child, "knows").value_type.as_deref(),
            Some("@id")
        );
        assert_eq!(
            contexts.get_info(child, "parent").reversed.as_deref(),
            Some("http://schema.org/children")
        );
        assert_eq!(
            contexts.get_info(child, "tags").container,
            Some(ContainerType::Undefined)
        );
    }

    #[test]
    fn invalid_contexts() {
        let mut contexts = ContextStack::new(DOC, &NoContextFetcher);
        let root = contexts.root();
        for definition in ["12", "true", r#"{"a": 1}"#, r#"{"a": ["http://a.com/"]}"#, r#"{"@language": 1}"#] {
            let error = build(&mut contexts, root, definition).unwrap_err();
            assert!(
                matches!(error.error(), LoaderError::InvalidContext(_)),
                "{definition}"
            );
            assert!(error.location().is_some());
        }
    }

    #[test]
    fn remote_contexts() {
        let fetcher = StaticContextFetcher::new()
            .with_document(
                "http://example.com/dir/context.jsonld",
                r#"{"@context": ["other.jsonld", {"name": "http://schema.org/name"}]}"#,
            )
            .with_document(
                "http://example.com/dir/other.jsonld",
                r#"{"@context": {"@language": "de"}}"#,
            )
            .with_document("http://example.com/dir/empty.jsonld", r#"{"foo": 1}"#)
            .with_document("http://example.com/dir/loop.jsonld", r#"{"@context": "loop.jsonld"}"#);
        let mut contexts = ContextStack::new(DOC, &fetcher);
        let root = contexts.root();
        let context = build(&mut contexts, root, r#""context.jsonld""#).unwrap();
        assert_eq!(
            contexts.expand_iri(context, "name", true).as_deref(),
            Some("http://schema.org/name")
        );
        assert_eq!(contexts.current_language(context), Some("de"));
        assert_eq!(build(&mut contexts, root, r#""empty.jsonld""#).unwrap(), root);
        assert_eq!(build(&mut contexts, root, r#""missing.jsonld""#).unwrap(), root);
        assert!(matches!(
            build(&mut contexts, root, r#""loop.jsonld""#).unwrap_err().error(),
            LoaderError::InvalidContext(_)
        ));
    }
}
