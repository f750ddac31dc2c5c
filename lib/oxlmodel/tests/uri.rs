#![allow(clippy::panic_in_result_fn)]

use oxlmodel::MalformedUriError;
use oxlmodel::uri::{is_absolute, parse, remove_dot_segments, resolve_relative};

const BASES: [&str; 5] = [
    "http://a/b/c/d;p?q",
    "http://example.com",
    "http://example.com/",
    "urn:example:base",
    "file:///home/user/doc.ttl",
];

#[test]
fn empty_reference_is_base() -> Result<(), MalformedUriError> {
    for base in BASES {
        assert_eq!(resolve_relative(base, "")?, base);
    }
    Ok(())
}

#[test]
fn absolute_reference_is_kept() -> Result<(), MalformedUriError> {
    for base in BASES {
        for reference in [
            "http://example.org/x",
            "urn:isbn:0451450523",
            "mailto:someone@example.com",
            "http://example.org/a/./b/../c?q#f",
        ] {
            let expected = resolve_relative("", reference)?;
            let resolved = resolve_relative(base, reference)?;
            assert!(is_absolute(&resolved), "{resolved} should be absolute");
            if !reference.contains("/.") {
                assert_eq!(resolved, expected);
            }
        }
    }
    assert_eq!(
        resolve_relative(BASES[0], "http://example.org/a/./b/../c?q#f")?,
        "http://example.org/a/c?q#f"
    );
    Ok(())
}

#[test]
fn resolved_references_are_absolute() -> Result<(), MalformedUriError> {
    for base in BASES {
        for reference in ["g", "../g", "/g", "?q", "#f", "g/h/../i"] {
            let resolved = resolve_relative(base, reference)?;
            assert!(is_absolute(&resolved), "{resolved} should be absolute");
        }
    }
    Ok(())
}

#[test]
fn empty_opaque_path_is_not_absolute() -> Result<(), MalformedUriError> {
    // An opaque base path has no "/" so the merged path is "./", removed entirely.
    let resolved = resolve_relative("urn:example:base", "./")?;
    assert_eq!(resolved, "urn:");
    assert!(!is_absolute(&resolved));
    assert_eq!(resolve_relative("http://a/b/c", "./")?, "http://a/b/");
    Ok(())
}

#[test]
fn dot_segment_removal_is_idempotent() -> Result<(), MalformedUriError> {
    for uri in [
        "http://a/b/c/./../../g",
        "http://a/./b/../../c/",
        "http://a/..",
        "file:///a/b/../../../c/./d/..",
    ] {
        let path = parse(uri)?.path;
        let once = remove_dot_segments(path);
        assert_eq!(remove_dot_segments(&once), once);
    }
    Ok(())
}

#[test]
fn file_uris() -> Result<(), MalformedUriError> {
    assert_eq!(
        resolve_relative("file:///home/user/doc.ttl", "other.ttl")?,
        "file:///home/user/other.ttl"
    );
    assert_eq!(
        resolve_relative("file:///home/user/doc.ttl", "../shared/a.ttl")?,
        "file:///home/shared/a.ttl"
    );
    Ok(())
}

#[test]
fn urn_base() -> Result<(), MalformedUriError> {
    assert_eq!(
        resolve_relative("urn:example:base", "#frag")?,
        "urn:example:base#frag"
    );
    Ok(())
}
