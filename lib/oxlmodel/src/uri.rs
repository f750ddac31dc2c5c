//! [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986) reference parsing and resolution.
//!
//! These functions do not validate the IRI grammar beyond what resolution needs and never
//! percent-decode: decoding is a lexical concern of each syntax.

use crate::error::MalformedUriError;

/// The five components of a URI reference.
///
/// An absent component is `None` while a present but empty one is `Some("")`.
/// The path is always defined, possibly empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UriComponents<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl UriComponents<'_> {
    /// Serializes the components following [RFC 3986 section 5.3](https://www.rfc-editor.org/rfc/rfc3986#section-5.3).
    pub fn recompose(&self) -> String {
        recompose(
            self.scheme,
            self.authority,
            self.path,
            self.query,
            self.fragment,
        )
    }
}

/// Splits a URI reference into its components.
///
/// ```
/// use oxlmodel::uri::parse;
///
/// let components = parse("http://example.com/a/b?q#f")?;
/// assert_eq!(components.scheme, Some("http"));
/// assert_eq!(components.authority, Some("example.com"));
/// assert_eq!(components.path, "/a/b");
/// assert_eq!(components.query, Some("q"));
/// assert_eq!(components.fragment, Some("f"));
/// # Result::<_, oxlmodel::MalformedUriError>::Ok(())
/// ```
pub fn parse(uri: &str) -> Result<UriComponents<'_>, MalformedUriError> {
    if let Some(c) = uri.chars().find(|c| !is_legal_char(*c)) {
        return Err(MalformedUriError::new(
            uri,
            format!("the character {c:?} is not allowed"),
        ));
    }
    let mut components = UriComponents::default();
    let mut rest = uri;

    // scheme
    if let Some((scheme, after)) = split_scheme(rest) {
        components.scheme = Some(scheme);
        rest = after;
    }

    // authority
    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        components.authority = Some(&after[..end]);
        rest = &after[end..];
    }

    // path
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let path = &rest[..end];
    if components.authority.is_some() {
        if !path.is_empty() && !path.starts_with('/') {
            return Err(MalformedUriError::new(
                uri,
                "the path of a URI with an authority must start with / or be empty",
            ));
        }
    } else if path.starts_with("//") {
        return Err(MalformedUriError::new(
            uri,
            "the path of a URI without authority cannot start with //",
        ));
    }
    components.path = path;
    rest = &rest[end..];

    // query
    if let Some(after) = rest.strip_prefix('?') {
        let end = after.find('#').unwrap_or(after.len());
        components.query = Some(&after[..end]);
        rest = &after[end..];
    }

    // fragment
    if let Some(after) = rest.strip_prefix('#') {
        components.fragment = Some(after);
    }
    Ok(components)
}

/// Returns `true` if the URI has a scheme followed by an authority or a non-empty path.
///
/// ```
/// use oxlmodel::uri::is_absolute;
///
/// assert!(is_absolute("http://example.com"));
/// assert!(is_absolute("urn:isbn:0451450523"));
/// assert!(!is_absolute("foo/bar"));
/// assert!(!is_absolute("http:"));
/// assert!(!is_absolute("http:?q"));
/// ```
pub fn is_absolute(uri: &str) -> bool {
    let Some((_, rest)) = split_scheme(uri) else {
        return false;
    };
    if rest.starts_with("//") {
        return true;
    }
    !matches!(rest.chars().next(), None | Some('?' | '#'))
}

/// Resolves `reference` against `base` following [RFC 3986 section 5.2](https://www.rfc-editor.org/rfc/rfc3986#section-5.2).
///
/// An empty reference resolves to the base and an empty base leaves the reference unchanged.
///
/// ```
/// use oxlmodel::uri::resolve_relative;
///
/// assert_eq!(resolve_relative("http://a/b/c/d;p?q", "g")?, "http://a/b/c/g");
/// assert_eq!(resolve_relative("http://a/b/c/d;p?q", "../../../g")?, "http://a/g");
/// # Result::<_, oxlmodel::MalformedUriError>::Ok(())
/// ```
pub fn resolve_relative(base: &str, reference: &str) -> Result<String, MalformedUriError> {
    if reference.is_empty() {
        return Ok(base.into());
    }
    if base.is_empty() {
        return Ok(reference.into());
    }
    let base = parse(base)?;
    let reference = parse(reference)?;

    let target_scheme;
    let target_authority;
    let target_path;
    let target_query;
    if reference.scheme.is_some() {
        target_scheme = reference.scheme;
        target_authority = reference.authority;
        target_path = remove_dot_segments(reference.path);
        target_query = reference.query;
    } else {
        if reference.authority.is_some() {
            target_authority = reference.authority;
            target_path = remove_dot_segments(reference.path);
            target_query = reference.query;
        } else {
            if reference.path.is_empty() {
                target_path = base.path.into();
                target_query = reference.query.or(base.query);
            } else {
                target_path = if reference.path.starts_with('/') {
                    remove_dot_segments(reference.path)
                } else {
                    remove_dot_segments(&merge_paths(
                        base.authority,
                        base.path,
                        reference.path,
                    ))
                };
                target_query = reference.query;
            }
            target_authority = base.authority;
        }
        target_scheme = base.scheme;
    }
    Ok(recompose(
        target_scheme,
        target_authority,
        &target_path,
        target_query,
        reference.fragment,
    ))
}

/// Builds a URI from its components.
pub fn recompose(
    scheme: Option<&str>,
    authority: Option<&str>,
    path: &str,
    query: Option<&str>,
    fragment: Option<&str>,
) -> String {
    let mut result = String::with_capacity(
        scheme.map_or(0, |s| s.len() + 1)
            + authority.map_or(0, |a| a.len() + 2)
            + path.len()
            + query.map_or(0, |q| q.len() + 1)
            + fragment.map_or(0, |f| f.len() + 1),
    );
    if let Some(scheme) = scheme {
        result.push_str(scheme);
        result.push(':');
    }
    if let Some(authority) = authority {
        result.push_str("//");
        result.push_str(authority);
    }
    result.push_str(path);
    if let Some(query) = query {
        result.push('?');
        result.push_str(query);
    }
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}

/// Removes the `.` and `..` segments of a path following [RFC 3986 section 5.2.4](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.4).
///
/// The leading `/` of an absolute path is never removed and a path ending with a dot segment keeps its trailing `/`.
///
/// ```
/// use oxlmodel::uri::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
/// ```
pub fn remove_dot_segments(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let is_absolute = path.starts_with('/');
    let mut input = path.split('/').peekable();
    let mut output: Vec<&str> = Vec::new();
    while let Some(segment) = input.next() {
        let is_last = input.peek().is_none();
        match segment {
            ".." => {
                if output.is_empty() {
                    continue;
                }
                if is_absolute && output == [""] {
                    if is_last {
                        output.push("");
                    }
                    continue;
                }
                output.pop();
                if is_last {
                    output.push("");
                }
            }
            "." => {
                if is_last {
                    output.push("");
                }
            }
            segment => output.push(segment),
        }
    }
    output.join("/")
}

/// Merges a relative path with the base path following [RFC 3986 section 5.2.3](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.3).
pub fn merge_paths(base_authority: Option<&str>, base_path: &str, reference_path: &str) -> String {
    if base_path.is_empty() {
        if base_authority.is_some() {
            format!("/{reference_path}")
        } else {
            reference_path.into()
        }
    } else if let Some(index) = base_path.rfind('/') {
        format!("{}{reference_path}", &base_path[..=index])
    } else {
        reference_path.into()
    }
}

/// Splits `scheme ":" rest` when the text before the first `:` is a valid scheme.
fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    // scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    let (scheme, rest) = uri.split_once(':')?;
    let mut chars = scheme.chars();
    if !chars.next()?.is_ascii_alphabetic() {
        return None;
    }
    chars
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        .then_some((scheme, rest))
}

fn is_legal_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && c != '<' && c != '>'
}
