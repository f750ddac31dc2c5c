use std::fmt;

/// The document formats supported by [`DocumentLoader`](crate::DocumentLoader).
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum DocumentFormat {
    /// [N-Triples](https://www.w3.org/TR/n-triples/)
    NTriples,
    /// [N-Quads](https://www.w3.org/TR/n-quads/)
    NQuads,
    /// [Turtle](https://www.w3.org/TR/turtle/)
    Turtle,
    /// [TriG](https://www.w3.org/TR/trig/)
    TriG,
    /// [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/)
    RdfXml,
    /// [JSON-LD](https://www.w3.org/TR/json-ld/)
    JsonLd,
    /// RDFT, a Turtle-based syntax for transformation rules.
    Rdft,
    /// [OWL 2 functional syntax](https://www.w3.org/TR/owl2-syntax/)
    FunctionalOwl,
    /// [OWL 2 XML serialization](https://www.w3.org/TR/owl2-xml-serialization/)
    OwlXml,
}

impl DocumentFormat {
    /// All the supported formats, RDF formats first.
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert!(DocumentFormat::ALL.contains(&DocumentFormat::Rdft));
    /// ```
    pub const ALL: [Self; 9] = [
        Self::NTriples,
        Self::NQuads,
        Self::Turtle,
        Self::TriG,
        Self::RdfXml,
        Self::JsonLd,
        Self::Rdft,
        Self::FunctionalOwl,
        Self::OwlXml,
    ];

    /// The format canonical IRI according to the [Unique URIs for file formats registry](https://www.w3.org/ns/formats/).
    ///
    /// RDFT is not registered and uses a URN.
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert_eq!(
    ///     DocumentFormat::NTriples.iri(),
    ///     "http://www.w3.org/ns/formats/N-Triples"
    /// )
    /// ```
    #[inline]
    pub const fn iri(self) -> &'static str {
        match self {
            Self::NTriples => "http://www.w3.org/ns/formats/N-Triples",
            Self::NQuads => "http://www.w3.org/ns/formats/N-Quads",
            Self::Turtle => "http://www.w3.org/ns/formats/Turtle",
            Self::TriG => "http://www.w3.org/ns/formats/TriG",
            Self::RdfXml => "http://www.w3.org/ns/formats/RDF_XML",
            Self::JsonLd => "http://www.w3.org/ns/formats/JSON-LD",
            Self::Rdft => "urn:x-oxloader:format:rdft",
            Self::FunctionalOwl => "http://www.w3.org/ns/formats/OWL_Functional",
            Self::OwlXml => "http://www.w3.org/ns/formats/OWL_XML",
        }
    }

    /// The format [IANA media type](https://tools.ietf.org/html/rfc2046).
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::OwlXml.media_type(), "application/owl+xml")
    /// ```
    #[inline]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::NTriples => "application/n-triples",
            Self::NQuads => "application/n-quads",
            Self::Turtle => "text/turtle",
            Self::TriG => "application/trig",
            Self::RdfXml => "application/rdf+xml",
            Self::JsonLd => "application/ld+json",
            Self::Rdft => "application/x-rdft",
            Self::FunctionalOwl => "text/owl-functional",
            Self::OwlXml => "application/owl+xml",
        }
    }

    /// The format usual file extension.
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::FunctionalOwl.file_extension(), "ofn")
    /// ```
    #[inline]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::NTriples => "nt",
            Self::NQuads => "nq",
            Self::Turtle => "ttl",
            Self::TriG => "trig",
            Self::RdfXml => "rdf",
            Self::JsonLd => "jsonld",
            Self::Rdft => "rdft",
            Self::FunctionalOwl => "ofn",
            Self::OwlXml => "owx",
        }
    }

    /// The format name.
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::NTriples.name(), "N-Triples")
    /// ```
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NTriples => "N-Triples",
            Self::NQuads => "N-Quads",
            Self::Turtle => "Turtle",
            Self::TriG => "TriG",
            Self::RdfXml => "RDF/XML",
            Self::JsonLd => "JSON-LD",
            Self::Rdft => "RDFT",
            Self::FunctionalOwl => "OWL functional syntax",
            Self::OwlXml => "OWL/XML",
        }
    }

    /// Checks if the format describes an OWL ontology and is loaded into an [`OntologyDocument`](oxlowl::OntologyDocument)
    /// instead of a [`LoaderResult`](oxlmodel::LoaderResult).
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::Turtle.supports_ontology(), false);
    /// assert_eq!(DocumentFormat::OwlXml.supports_ontology(), true);
    /// ```
    #[inline]
    pub const fn supports_ontology(self) -> bool {
        matches!(self, Self::FunctionalOwl | Self::OwlXml)
    }

    /// Looks for a known format from a media type.
    ///
    /// It supports some media type aliases.
    /// For example, "application/xml" is going to return `DocumentFormat::RdfXml` even if it is not its canonical media type.
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert_eq!(
    ///     DocumentFormat::from_media_type("text/turtle; charset=utf-8"),
    ///     Some(DocumentFormat::Turtle)
    /// );
    /// assert_eq!(
    ///     DocumentFormat::from_media_type("text/owl-functional"),
    ///     Some(DocumentFormat::FunctionalOwl)
    /// );
    /// ```
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        const MEDIA_SUBTYPES: [(&str, DocumentFormat); 15] = [
            ("json", DocumentFormat::JsonLd),
            ("ld+json", DocumentFormat::JsonLd),
            ("jsonld", DocumentFormat::JsonLd),
            ("n-quads", DocumentFormat::NQuads),
            ("n-triples", DocumentFormat::NTriples),
            ("nquads", DocumentFormat::NQuads),
            ("ntriples", DocumentFormat::NTriples),
            ("owl+xml", DocumentFormat::OwlXml),
            ("owl-functional", DocumentFormat::FunctionalOwl),
            ("plain", DocumentFormat::NTriples),
            ("rdf+xml", DocumentFormat::RdfXml),
            ("rdft", DocumentFormat::Rdft),
            ("trig", DocumentFormat::TriG),
            ("turtle", DocumentFormat::Turtle),
            ("xml", DocumentFormat::RdfXml),
        ];
        const UTF8_CHARSETS: [&str; 3] = ["ascii", "utf8", "utf-8"];

        let (type_subtype, parameters) = media_type.split_once(';').unwrap_or((media_type, ""));

        let (r#type, subtype) = type_subtype.split_once('/')?;
        let r#type = r#type.trim();
        if !r#type.eq_ignore_ascii_case("application") && !r#type.eq_ignore_ascii_case("text") {
            return None;
        }
        let subtype = subtype.trim();
        let subtype = subtype.strip_prefix("x-").unwrap_or(subtype);

        for parameter in parameters.split(';') {
            if let Some((key, value)) = parameter.split_once('=') {
                if key.trim().eq_ignore_ascii_case("charset")
                    && !UTF8_CHARSETS
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(value.trim()))
                {
                    return None; // No other charset than UTF-8 is supported
                }
            }
        }

        MEDIA_SUBTYPES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(subtype))
            .map(|(_, format)| *format)
    }

    /// Looks for a known format from an extension.
    ///
    /// It supports some aliases.
    ///
    /// ```
    /// use oxloader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_extension("nt"), Some(DocumentFormat::NTriples));
    /// assert_eq!(DocumentFormat::from_extension("fs"), Some(DocumentFormat::FunctionalOwl));
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        const EXTENSIONS: [(&str, DocumentFormat); 14] = [
            ("fs", DocumentFormat::FunctionalOwl),
            ("json", DocumentFormat::JsonLd),
            ("jsonld", DocumentFormat::JsonLd),
            ("nq", DocumentFormat::NQuads),
            ("nt", DocumentFormat::NTriples),
            ("ofn", DocumentFormat::FunctionalOwl),
            ("owl", DocumentFormat::OwlXml),
            ("owx", DocumentFormat::OwlXml),
            ("rdf", DocumentFormat::RdfXml),
            ("rdft", DocumentFormat::Rdft),
            ("trig", DocumentFormat::TriG),
            ("ttl", DocumentFormat::Turtle),
            ("txt", DocumentFormat::NTriples),
            ("xml", DocumentFormat::RdfXml),
        ];
        EXTENSIONS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(extension))
            .map(|(_, format)| *format)
    }
}

impl fmt::Display for DocumentFormat {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_are_recognized() {
        for format in DocumentFormat::ALL {
            assert_eq!(
                DocumentFormat::from_extension(format.file_extension()),
                Some(format)
            );
            assert_eq!(
                DocumentFormat::from_media_type(format.media_type()),
                Some(format)
            );
        }
    }

    #[test]
    fn all_formats_are_distinct() {
        for (i, format) in DocumentFormat::ALL.iter().enumerate() {
            assert!(!DocumentFormat::ALL[..i].contains(format), "{format} is listed twice");
        }
    }

    #[test]
    fn test_from_media_type() {
        assert_eq!(DocumentFormat::from_media_type("foo/bar"), None);
        assert_eq!(DocumentFormat::from_media_type("text/csv"), None);
        assert_eq!(
            DocumentFormat::from_media_type("application/x-turtle"),
            Some(DocumentFormat::Turtle)
        );
        assert_eq!(
            DocumentFormat::from_media_type("text/turtle; charset=latin1"),
            None
        );
        assert_eq!(
            DocumentFormat::from_media_type("APPLICATION/OWL+XML ; charset=UTF-8"),
            Some(DocumentFormat::OwlXml)
        );
    }
}
